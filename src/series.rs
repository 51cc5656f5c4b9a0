//! Hourly market-clearing-price time series types.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One hourly market clearing price sample.
///
/// `timestamp` carries whatever clock the ingested data used; no timezone
/// is attached or invented downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample instant at hourly resolution.
    pub timestamp: NaiveDateTime,
    /// Market clearing price in currency per MWh.
    pub mcp: f64,
}

impl PricePoint {
    /// Creates a new price point.
    pub fn new(timestamp: NaiveDateTime, mcp: f64) -> Self {
        Self { timestamp, mcp }
    }
}

/// Chronologically ordered sequence of [`PricePoint`] samples.
///
/// Construction sorts by timestamp so downstream consumers can assume
/// ascending order even when the upload was shuffled. Gaps between hours
/// are tolerated and never filled. The series is read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<PricePoint>,
}

impl TimeSeries {
    /// Builds a series from raw points, sorting by timestamp ascending.
    ///
    /// The sort is stable, so points sharing a timestamp keep their
    /// relative upload order.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    /// Number of samples in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last (most recent) sample, if any.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Read-only view of the underlying samples.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Iterator over the samples in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Arithmetic mean of the trailing `window` prices.
    ///
    /// Uses all available samples when fewer than `window` exist.
    /// Non-finite prices are skipped; returns `0.0` when no finite price
    /// remains.
    pub fn trailing_mean(&self, window: usize) -> f64 {
        let start = self.points.len().saturating_sub(window);
        let mut sum = 0.0;
        let mut count = 0usize;
        for p in &self.points[start..] {
            if p.mcp.is_finite() {
                sum += p.mcp;
                count += 1;
            }
        }
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Median price over the entire series, or `None` when empty.
    ///
    /// For an even sample count this is the mean of the two middle values.
    pub fn median_price(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let mut prices: Vec<f64> = self.points.iter().map(|p| p.mcp).collect();
        prices.sort_by(f64::total_cmp);
        let mid = prices.len() / 2;
        if prices.len() % 2 == 0 {
            Some((prices[mid - 1] + prices[mid]) / 2.0)
        } else {
            Some(prices[mid])
        }
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One hour, the fixed resolution of every series in this crate.
pub fn one_hour() -> TimeDelta {
    TimeDelta::hours(1)
}

/// Accepted input timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses an uploaded timestamp string.
///
/// Accepts ISO-8601 with `T` or space separator, with or without seconds.
/// Returns `None` when no layout matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Formats a timestamp for CSV output (`%Y-%m-%dT%H:%M:%S`).
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}
