//! Aggregations
//!
//! Pure derivations of the [`Dataset`] used by the scene renderers:
//!
//! - [`national_series`]: Total cases per date across all states
//! - [`latest_state_snapshot`]: Per-state totals at the latest date
//! - [`state_series`]: One state's records in date order
//!
//! None of these mutate their input, and identical inputs always produce
//! identical outputs. Sums saturate at `i64::MAX` instead of overflowing.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::dataset::{CaseRecord, Dataset};

/// National total for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NationalPoint {
    pub date: NaiveDate,
    pub total_cases: i64,
}

/// One state's total at the snapshot date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTotal {
    pub state: String,
    pub total_cases: i64,
}

/// Per-state totals at the latest date in the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// The latest date, `None` for an empty dataset
    pub date: Option<NaiveDate>,
    /// Ordered by total descending, then state name ascending
    pub entries: Vec<StateTotal>,
}

impl StateSnapshot {
    /// Largest total in the snapshot
    pub fn max_total(&self) -> Option<i64> {
        self.entries.iter().map(|e| e.total_cases).max()
    }
}

/// Sum cases by date, ascending by date.
pub fn national_series(dataset: &Dataset) -> Vec<NationalPoint> {
    let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in dataset.records() {
        let total = totals.entry(record.date).or_insert(0);
        *total = total.saturating_add(record.cases);
    }

    totals
        .into_iter()
        .map(|(date, total_cases)| NationalPoint { date, total_cases })
        .collect()
}

/// Sum cases by state at the maximum date, largest first.
///
/// Equal totals are ordered alphabetically by state name.
pub fn latest_state_snapshot(dataset: &Dataset) -> StateSnapshot {
    let latest = match dataset.records().iter().map(|r| r.date).max() {
        Some(date) => date,
        None => return StateSnapshot::default(),
    };

    let mut order: Vec<StateTotal> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for record in dataset.records().iter().filter(|r| r.date == latest) {
        match slots.get(record.state.as_str()) {
            Some(&slot) => {
                let entry = &mut order[slot];
                entry.total_cases = entry.total_cases.saturating_add(record.cases);
            }
            None => {
                slots.insert(record.state.as_str(), order.len());
                order.push(StateTotal {
                    state: record.state.clone(),
                    total_cases: record.cases,
                });
            }
        }
    }

    order.sort_by(|a, b| {
        b.total_cases
            .cmp(&a.total_cases)
            .then_with(|| a.state.cmp(&b.state))
    });

    StateSnapshot {
        date: Some(latest),
        entries: order,
    }
}

/// All records for one state, ascending by date.
///
/// Returns an empty series for a state that does not appear in the dataset.
pub fn state_series(dataset: &Dataset, state: &str) -> Vec<CaseRecord> {
    let mut series: Vec<CaseRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.state == state)
        .cloned()
        .collect();

    series.sort_by_key(|r| r.date);
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn two_state_dataset() -> Dataset {
        Dataset::new(vec![
            CaseRecord::new(date("2020-01-01"), "A", 10, 1),
            CaseRecord::new(date("2020-01-01"), "B", 5, 0),
            CaseRecord::new(date("2020-01-02"), "A", 20, 2),
            CaseRecord::new(date("2020-01-02"), "B", 15, 1),
        ])
    }

    #[test]
    fn test_national_series_sums_by_date() {
        let series = national_series(&two_state_dataset());

        assert_eq!(
            series,
            vec![
                NationalPoint {
                    date: date("2020-01-01"),
                    total_cases: 15
                },
                NationalPoint {
                    date: date("2020-01-02"),
                    total_cases: 35
                },
            ]
        );
    }

    #[test]
    fn test_national_series_strictly_ascending_for_unordered_input() {
        let dataset = Dataset::new(vec![
            CaseRecord::new(date("2020-02-03"), "A", 3, 0),
            CaseRecord::new(date("2020-02-01"), "B", 1, 0),
            CaseRecord::new(date("2020-02-02"), "A", 2, 0),
            CaseRecord::new(date("2020-02-01"), "A", 4, 0),
        ]);

        let series = national_series(&dataset);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));

        for point in &series {
            let expected: i64 = dataset
                .records()
                .iter()
                .filter(|r| r.date == point.date)
                .map(|r| r.cases)
                .sum();
            assert_eq!(point.total_cases, expected);
        }
    }

    #[test]
    fn test_snapshot_latest_date_descending() {
        let snapshot = latest_state_snapshot(&two_state_dataset());

        assert_eq!(snapshot.date, Some(date("2020-01-02")));
        assert_eq!(
            snapshot.entries,
            vec![
                StateTotal {
                    state: "A".to_string(),
                    total_cases: 20
                },
                StateTotal {
                    state: "B".to_string(),
                    total_cases: 15
                },
            ]
        );
        assert_eq!(snapshot.max_total(), Some(20));
    }

    #[test]
    fn test_snapshot_only_states_at_latest_date() {
        let dataset = Dataset::new(vec![
            CaseRecord::new(date("2020-01-01"), "Gone", 500, 0),
            CaseRecord::new(date("2020-01-02"), "Kept", 1, 0),
        ]);

        let snapshot = latest_state_snapshot(&dataset);
        let states: Vec<&str> = snapshot.entries.iter().map(|e| e.state.as_str()).collect();
        assert_eq!(states, vec!["Kept"]);
    }

    #[test]
    fn test_snapshot_ties_break_alphabetically() {
        let dataset = Dataset::new(vec![
            CaseRecord::new(date("2020-01-01"), "Zeta", 7, 0),
            CaseRecord::new(date("2020-01-01"), "Alpha", 7, 0),
            CaseRecord::new(date("2020-01-01"), "Mid", 9, 0),
        ]);

        let snapshot = latest_state_snapshot(&dataset);
        let states: Vec<&str> = snapshot.entries.iter().map(|e| e.state.as_str()).collect();
        assert_eq!(states, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_snapshot_empty_dataset() {
        let snapshot = latest_state_snapshot(&Dataset::default());
        assert_eq!(snapshot.date, None);
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.max_total(), None);
    }

    #[test]
    fn test_sums_saturate_on_huge_counts() {
        let csv = "date,state,cases,deaths\n\
                   2020-01-01,A,9223372036854775807,0\n\
                   2020-01-01,B,1,0\n\
                   2020-01-01,A,5,0\n";
        let dataset = crate::dataset::DatasetLoader::new().load_str(csv).unwrap();

        let series = national_series(&dataset);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total_cases, i64::MAX);

        let snapshot = latest_state_snapshot(&dataset);
        assert_eq!(snapshot.entries[0].state, "A");
        assert_eq!(snapshot.entries[0].total_cases, i64::MAX);
        assert_eq!(snapshot.entries[1].total_cases, 1);
    }

    #[test]
    fn test_state_series_filtered_and_sorted() {
        let dataset = Dataset::new(vec![
            CaseRecord::new(date("2020-01-03"), "B", 30, 3),
            CaseRecord::new(date("2020-01-01"), "B", 10, 1),
            CaseRecord::new(date("2020-01-02"), "A", 99, 9),
            CaseRecord::new(date("2020-01-02"), "B", 20, 2),
        ]);

        let series = state_series(&dataset, "B");
        let cases: Vec<i64> = series.iter().map(|r| r.cases).collect();
        assert_eq!(cases, vec![10, 20, 30]);
        assert!(series.iter().all(|r| r.state == "B"));

        assert_eq!(series, state_series(&dataset, "B"));
        assert!(state_series(&dataset, "Nowhere").is_empty());
    }
}
