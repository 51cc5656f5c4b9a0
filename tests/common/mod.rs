//! Shared test fixtures for integration tests.

use std::path::Path;

use bess_dispatch::dispatch::BessRating;
use bess_dispatch::registry::ModelRegistry;
use bess_dispatch::series::{PricePoint, TimeSeries};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Midnight on 2024-01-01, the anchor for fixture series.
pub fn series_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// Hourly series starting at [`series_start`] with the given prices.
pub fn hourly_series(prices: &[f64]) -> TimeSeries {
    let start = series_start();
    TimeSeries::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, &mcp)| PricePoint::new(start + TimeDelta::hours(i as i64), mcp))
            .collect(),
    )
}

/// Prices alternating 10, 20, 10, 20, ... (median 15).
pub fn alternating_prices(n: usize) -> Vec<f64> {
    (0..n).map(|i| if i % 2 == 0 { 10.0 } else { 20.0 }).collect()
}

/// Registry with every artifact absent (no models trained).
pub fn empty_registry() -> ModelRegistry {
    ModelRegistry::load(Path::new("/nonexistent/models-dir"))
}

/// Default battery rating used across scenarios (2 MW, 10 MWh).
pub fn default_rating() -> BessRating {
    BessRating::new(2.0, 10.0)
}
