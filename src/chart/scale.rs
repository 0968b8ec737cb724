//! Scales
//!
//! Map data values to pixel positions:
//!
//! - [`LinearScale`]: Continuous magnitudes, with round-number `nice()`
//! - [`TimeScale`]: Calendar dates, with calendar-aligned ticks
//! - [`BandScale`]: Discrete categories laid out as padded bands
//!
//! Tick selection follows the 1-2-5 progression, so a domain of
//! `[0, 35]` with ten requested ticks yields steps of 5.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Step between ticks for a domain split into roughly `count` intervals.
///
/// Positive results are the step itself; negative results `-k` mean a step
/// of `1/k`, which keeps small fractional steps exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !(step.is_finite() && step > 0.0) {
        return 0.0;
    }

    let power = step.log10().floor() as i32;
    let error = step / 10f64.powi(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0 {
        factor * 10f64.powi(power)
    } else {
        -10f64.powi(-power) / factor
    }
}

/// Continuous scale from a numeric domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale. Non-finite domains fall back to `[0, 1]`; a
    /// zero-width domain is widened by one unit.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, d1) = domain;
        let domain = if !(d0.is_finite() && d1.is_finite()) {
            (0.0, 1.0)
        } else if d0 == d1 {
            (d0, d0 + 1.0)
        } else {
            domain
        };

        Self { domain, range }
    }

    /// Scale whose domain starts at zero and ends at `max`.
    ///
    /// A missing or non-positive maximum falls back to `[0, 1]`.
    pub fn from_zero(max: Option<f64>, range: (f64, f64)) -> Self {
        let max = max.filter(|m| *m > 0.0).unwrap_or(1.0);
        Self::new((0.0, max), range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Extend the domain outward to round tick values
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Map a domain value to the range
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Absolute distance between consecutive ticks
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.ordered_domain();
        let step = tick_increment(d0, d1, count);
        if step < 0.0 {
            1.0 / -step
        } else {
            step
        }
    }

    /// Round-valued ticks inside the domain, ascending
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.ordered_domain();
        let step = tick_increment(d0, d1, count);

        if step > 0.0 {
            let i0 = (d0 / step).ceil() as i64;
            let i1 = (d1 / step).floor() as i64;
            (i0..=i1).map(|i| i as f64 * step).collect()
        } else if step < 0.0 {
            let inc = -step;
            let i0 = (d0 * inc).ceil() as i64;
            let i1 = (d1 * inc).floor() as i64;
            (i0..=i1).map(|i| i as f64 / inc).collect()
        } else {
            vec![d0]
        }
    }

    fn ordered_domain(&self) -> (f64, f64) {
        let (d0, d1) = self.domain;
        if d1 < d0 {
            (d1, d0)
        } else {
            (d0, d1)
        }
    }
}

/// Calendar interval between time-axis ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInterval {
    /// Every n-th day of the month, counted from the 1st
    Days(u32),
    /// Sundays
    Weeks,
    /// First of every n-th month, counted from January
    Months(u32),
    /// January 1st of years divisible by n
    Years(i32),
}

impl TickInterval {
    /// Approximate length in days, used to pick an interval
    fn approx_days(&self) -> f64 {
        match self {
            TickInterval::Days(n) => *n as f64,
            TickInterval::Weeks => 7.0,
            TickInterval::Months(n) => *n as f64 * 30.0,
            TickInterval::Years(n) => *n as f64 * 365.0,
        }
    }

    fn contains(&self, date: NaiveDate) -> bool {
        match self {
            TickInterval::Days(n) => (date.day() - 1) % n == 0,
            TickInterval::Weeks => date.weekday() == Weekday::Sun,
            TickInterval::Months(n) => date.day() == 1 && (date.month() - 1) % n == 0,
            TickInterval::Years(n) => date.ordinal() == 1 && date.year() % n == 0,
        }
    }
}

const TIME_INTERVALS: [TickInterval; 6] = [
    TickInterval::Days(1),
    TickInterval::Days(2),
    TickInterval::Weeks,
    TickInterval::Months(1),
    TickInterval::Months(3),
    TickInterval::Years(1),
];

/// Scale from a date domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    range: (f64, f64),
}

impl TimeScale {
    /// Create a scale over a date extent.
    ///
    /// A missing extent falls back to a one-day span starting at the Unix
    /// epoch, so an empty series still yields a drawable axis.
    pub fn new(extent: Option<(NaiveDate, NaiveDate)>, range: (f64, f64)) -> Self {
        let (start, end) = extent.unwrap_or_else(|| {
            let epoch = NaiveDate::default();
            (epoch, epoch + Duration::days(1))
        });
        Self { start, end, range }
    }

    /// Create a scale over the min/max of an iterator of dates
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>, range: (f64, f64)) -> Self {
        let extent = dates.into_iter().fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((d.min(lo), d.max(hi))),
        });
        Self::new(extent, range)
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Map a date to the range. A single-day domain maps to the midpoint.
    pub fn apply(&self, date: NaiveDate) -> f64 {
        let (r0, r1) = self.range;
        let span = (self.end - self.start).num_days();
        if span == 0 {
            return (r0 + r1) / 2.0;
        }
        let offset = (date - self.start).num_days() as f64;
        r0 + offset / span as f64 * (r1 - r0)
    }

    /// Pick the tick interval for roughly `count` ticks.
    ///
    /// The target spacing is bracketed by two candidate intervals and the
    /// one nearer by ratio wins.
    pub fn interval(&self, count: usize) -> TickInterval {
        let span = (self.end - self.start).num_days().max(1) as f64;
        let target = span / count.max(1) as f64;

        let next = TIME_INTERVALS.partition_point(|i| i.approx_days() <= target);
        if next == 0 {
            return TIME_INTERVALS[0];
        }
        if next < TIME_INTERVALS.len() {
            let below = TIME_INTERVALS[next - 1];
            let above = TIME_INTERVALS[next];
            return if target / below.approx_days() < above.approx_days() / target {
                below
            } else {
                above
            };
        }

        let years = span / 365.0;
        let step = tick_increment(0.0, years, count).max(1.0);
        TickInterval::Years(step as i32)
    }

    /// Calendar-aligned ticks within the domain, ascending
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let interval = self.interval(count);
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .filter(|d| interval.contains(*d))
            .collect()
    }
}

/// Discrete scale assigning each category an equal-width band
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Create a band scale with the same inner and outer padding,
    /// bands centred within the range
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);

        Self {
            domain,
            start,
            step,
            bandwidth,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Start of the band for a category
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Width of every band
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}
