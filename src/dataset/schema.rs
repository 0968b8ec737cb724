//! Explicit column schema for the case CSV.

use std::fmt;

/// Date format accepted in the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Target type of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Calendar date in [`DATE_FORMAT`]
    Date,
    /// Free text, kept as-is after trimming
    Text,
    /// Signed 64-bit integer
    Integer,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Date => "date (YYYY-MM-DD)",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
        };
        f.write_str(name)
    }
}

/// Ordered list of required columns and their types
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<(String, ColumnType)>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::case_records()
    }
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Add a required column
    pub fn column(mut self, name: &str, column_type: ColumnType) -> Self {
        self.columns.push((name.to_string(), column_type));
        self
    }

    /// The schema of the per-state case file
    pub fn case_records() -> Self {
        Self::new()
            .column("date", ColumnType::Date)
            .column("state", ColumnType::Text)
            .column("cases", ColumnType::Integer)
            .column("deaths", ColumnType::Integer)
    }

    /// Required columns in declaration order
    pub fn columns(&self) -> &[(String, ColumnType)] {
        &self.columns
    }

    /// Declared type of a column
    pub fn type_of(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, column_type)| *column_type)
    }

    /// Resolve each schema column to its position in the header row.
    ///
    /// Header names are matched case-insensitively after trimming. Columns
    /// not named by the schema are ignored.
    pub fn resolve(&self, headers: &csv::StringRecord) -> Result<Vec<usize>, String> {
        self.columns
            .iter()
            .map(|(name, _)| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
                    .ok_or_else(|| name.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_extra_columns() {
        let headers = csv::StringRecord::from(vec!["date", "state", "fips", "cases", "deaths"]);
        let positions = Schema::case_records().resolve(&headers).unwrap();
        assert_eq!(positions, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_resolve_reports_missing_column() {
        let headers = csv::StringRecord::from(vec!["date", "state", "cases"]);
        let missing = Schema::case_records().resolve(&headers).unwrap_err();
        assert_eq!(missing, "deaths");
    }

    #[test]
    fn test_type_lookup() {
        let schema = Schema::case_records();
        assert_eq!(schema.type_of("cases"), Some(ColumnType::Integer));
        assert_eq!(schema.type_of("date"), Some(ColumnType::Date));
        assert_eq!(schema.type_of("fips"), None);
        assert_eq!(ColumnType::Date.to_string(), "date (YYYY-MM-DD)");
    }
}
