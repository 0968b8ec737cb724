//! Display formatting for counts, dates and axis ticks.
//!
//! Counts use `,` thousands separators and dates render as `M/D/YYYY`,
//! matching the en-US conventions of the narration text.

use chrono::{Datelike, NaiveDate, Weekday};

/// Format an integer with thousands separators: `1234567` -> `1,234,567`
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    out.push_str(&group_digits(&digits));
    out
}

/// Format a calendar date as `M/D/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Format a linear-axis tick.
///
/// The number of decimals is derived from the tick step, so a step of `0.2`
/// yields one decimal and integer steps yield grouped integers.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };

    if decimals == 0 {
        return format_count(value.round() as i64);
    }

    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let sign = if value < 0.0 && text.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, group_digits(int_part), frac_part)
}

/// Label for a date tick on a time axis.
///
/// Year starts show the year, month starts the month name, Sundays the
/// abbreviated month and day, any other day the weekday and day.
pub fn format_time_tick(date: NaiveDate) -> String {
    let pattern = if date.month() == 1 && date.day() == 1 {
        "%Y"
    } else if date.day() == 1 {
        "%B"
    } else if date.weekday() == Weekday::Sun {
        "%b %d"
    } else {
        "%a %d"
    };
    date.format(pattern).to_string()
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(-45000), "-45,000");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(format_date(date), "1/2/2020");

        let date = NaiveDate::from_ymd_opt(2021, 12, 25).unwrap();
        assert_eq!(format_date(date), "12/25/2021");
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2_000_000.0, 500_000.0), "2,000,000");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
        assert_eq!(format_tick(1200.5, 0.5), "1,200.5");
    }

    #[test]
    fn test_format_time_tick() {
        let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(format_time_tick(ymd(2021, 1, 1)), "2021");
        assert_eq!(format_time_tick(ymd(2020, 4, 1)), "April");
        // 2020-03-08 is a Sunday
        assert_eq!(format_time_tick(ymd(2020, 3, 8)), "Mar 08");
        assert_eq!(format_time_tick(ymd(2020, 3, 10)), "Tue 10");
    }
}
