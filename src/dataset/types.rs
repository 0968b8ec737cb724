//! Core data types
//!
//! - [`CaseRecord`]: One (state, date) observation
//! - [`Dataset`]: All records in file order plus the sorted state names

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// One row of the source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// State or territory name
    pub state: String,
    /// Cumulative case count
    pub cases: i64,
    /// Cumulative death count
    pub deaths: i64,
}

impl CaseRecord {
    /// Create a new record
    pub fn new(date: NaiveDate, state: impl Into<String>, cases: i64, deaths: i64) -> Self {
        Self {
            date,
            state: state.into(),
            cases,
            deaths,
        }
    }
}

/// The loaded dataset. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CaseRecord>,
    state_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, computing the sorted distinct state names once
    pub fn new(records: Vec<CaseRecord>) -> Self {
        let state_names: Vec<String> = records
            .iter()
            .map(|r| r.state.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            records,
            state_names,
        }
    }

    /// Records in source order
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Distinct state names, sorted ascending
    pub fn state_names(&self) -> &[String] {
        &self.state_names
    }

    /// Whether a state appears anywhere in the dataset
    pub fn has_state(&self, state: &str) -> bool {
        self.state_names
            .binary_search_by(|s| s.as_str().cmp(state))
            .is_ok()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest date, if any records exist
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_state_names_sorted_and_distinct() {
        let dataset = Dataset::new(vec![
            CaseRecord::new(date("2020-01-01"), "Texas", 1, 0),
            CaseRecord::new(date("2020-01-01"), "Alabama", 2, 0),
            CaseRecord::new(date("2020-01-02"), "Texas", 3, 0),
        ]);

        assert_eq!(dataset.state_names(), &["Alabama", "Texas"]);
        assert!(dataset.has_state("Texas"));
        assert!(!dataset.has_state("Ohio"));
        assert_eq!(
            dataset.date_extent(),
            Some((date("2020-01-01"), date("2020-01-02")))
        );
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.state_names().is_empty());
        assert_eq!(dataset.date_extent(), None);
    }
}
