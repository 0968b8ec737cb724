//! CSV Loader
//!
//! Reads the per-state case file. Every row is checked against the
//! [`Schema`]; the first header or cell that does not fit aborts the load.

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use super::error::{LoadError, LoadResult};
use super::schema::{ColumnType, Schema, DATE_FORMAT};
use super::types::{CaseRecord, Dataset};

/// Loads [`Dataset`]s from CSV sources
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    schema: Schema,
}

impl DatasetLoader {
    /// Create a loader for the standard case-record schema
    pub fn new() -> Self {
        Self {
            schema: Schema::case_records(),
        }
    }

    /// The schema rows are validated against
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load a dataset from a file
    pub fn load_path(&self, path: &Path) -> LoadResult<Dataset> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Loading dataset");
        self.load_reader(file)
    }

    /// Load a dataset from a CSV string (useful for testing)
    pub fn load_str(&self, csv_data: &str) -> LoadResult<Dataset> {
        self.load_reader(csv_data.as_bytes())
    }

    /// Load a dataset from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> LoadResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let positions = self
            .schema
            .resolve(&headers)
            .map_err(LoadError::MissingColumn)?;

        let columns = self.schema.columns();
        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // Header is line 1
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(idx as u64 + 2);

            let cell = |i: usize| record.get(positions[i]).unwrap_or("");

            records.push(CaseRecord {
                date: parse_date(cell(0), line, &columns[0])?,
                state: cell(1).to_string(),
                cases: parse_integer(cell(2), line, &columns[2])?,
                deaths: parse_integer(cell(3), line, &columns[3])?,
            });
        }

        let dataset = Dataset::new(records);

        if dataset.is_empty() {
            tracing::warn!("Dataset loaded with zero records");
        } else {
            tracing::info!(
                records = dataset.len(),
                states = dataset.state_names().len(),
                "Dataset loaded"
            );
        }

        Ok(dataset)
    }
}

fn parse_date(raw: &str, line: u64, column: &(String, ColumnType)) -> LoadResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| mismatch(raw, line, column))
}

fn parse_integer(raw: &str, line: u64, column: &(String, ColumnType)) -> LoadResult<i64> {
    raw.parse::<i64>().map_err(|_| mismatch(raw, line, column))
}

fn mismatch(raw: &str, line: u64, (name, expected): &(String, ColumnType)) -> LoadError {
    LoadError::TypeMismatch {
        line,
        column: name.clone(),
        expected: *expected,
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_nyt_layout() {
        let csv_data = "date,state,fips,cases,deaths
2020-01-21,Washington,53,1,0
2020-01-22,Washington,53,1,0
2020-01-24,Illinois,17,1,0";

        let dataset = DatasetLoader::new().load_str(csv_data).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.state_names(), &["Illinois", "Washington"]);
        assert_eq!(dataset.records()[2].state, "Illinois");
        assert_eq!(
            dataset.records()[0].date,
            NaiveDate::from_ymd_opt(2020, 1, 21).unwrap()
        );
    }

    #[test]
    fn test_missing_column_fails() {
        let csv_data = "date,state,cases
2020-01-21,Washington,1";

        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "deaths"));
    }

    #[test]
    fn test_type_mismatch_reports_line() {
        let csv_data = "date,state,cases,deaths
2020-01-21,Washington,1,0
2020-01-22,Washington,lots,0";

        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        match err {
            LoadError::TypeMismatch {
                line,
                column,
                expected,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "cases");
                assert_eq!(expected, ColumnType::Integer);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_date_fails() {
        let csv_data = "date,state,cases,deaths
01/21/2020,Washington,1,0";

        let err = DatasetLoader::new().load_str(csv_data).unwrap_err();
        assert!(matches!(err, LoadError::TypeMismatch { ref column, .. } if column == "date"));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let dataset = DatasetLoader::new()
            .load_str("date,state,cases,deaths\n")
            .unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,state,cases,deaths").unwrap();
        writeln!(file, "2020-03-01,Ohio,5,1").unwrap();

        let dataset = DatasetLoader::new().load_path(file.path()).unwrap();
        assert_eq!(dataset.records()[0].cases, 5);
        assert_eq!(dataset.records()[0].deaths, 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetLoader::new()
            .load_path(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
