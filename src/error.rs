//! Input-validation failures shared by the forecast engine and scheduler.

use thiserror::Error;

/// Failures detected before any computation starts.
///
/// All variants are deterministic input-validation failures; retrying a
/// call with the same inputs cannot succeed. Translation into user-facing
/// text is left to the boundary (CLI or HTTP handlers).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The input series holds no samples, so there is no timestamp to
    /// anchor a forecast and no median to derive a dispatch threshold.
    #[error("input series is empty")]
    EmptySeries,

    /// Forecast horizon below one day.
    #[error("horizon_days must be >= 1, got {horizon_days}")]
    InvalidHorizon {
        /// The rejected horizon value.
        horizon_days: u32,
    },

    /// Non-positive battery power or energy rating.
    #[error("{field} must be > 0, got {value}")]
    InvalidRating {
        /// Name of the offending rating field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}
