//! Short-horizon MCP forecast production.

use rand::Rng;

use crate::error::CoreError;
use crate::registry::ModelRegistry;
use crate::series::{PricePoint, TimeSeries, one_hour};

/// Output points per horizon day.
pub const HOURS_PER_DAY: u32 = 24;

/// Trailing observation window for the baseline mean.
pub const TRAILING_WINDOW: usize = 24;

/// Half-width of the uniform noise band around the baseline mean, in the
/// same price unit as the input series.
pub const NOISE_BAND: f64 = 2.0;

/// Produces hourly price forecasts from a historical series.
///
/// The engine borrows a read-only [`ModelRegistry`]; constructing one per
/// request is free, and a shared registry serves concurrent requests
/// without locking.
///
/// The baseline projection is deliberately naive: every output point is
/// the trailing-24h mean plus independent uniform noise on
/// [-[`NOISE_BAND`], +[`NOISE_BAND`]]. There is no trend, seasonality, or
/// autocorrelation. A present registry artifact marks a model as eligible,
/// but until a real inference path ships, every request runs the baseline
/// and the caller is told which model was *requested*, not which path ran.
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> ForecastEngine<'a> {
    /// Creates an engine over a loaded registry.
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Forecasts `horizon_days * 24` hourly points using the given rng.
    ///
    /// Output timestamps are consecutive hourly instants starting one hour
    /// after the last observed timestamp, carrying the input's clock
    /// through unchanged.
    ///
    /// # Errors
    ///
    /// * [`CoreError::InvalidHorizon`] when `horizon_days < 1`
    /// * [`CoreError::EmptySeries`] when `series` has no points
    pub fn forecast_with_rng<R: Rng + ?Sized>(
        &self,
        series: &TimeSeries,
        horizon_days: u32,
        model_name: &str,
        rng: &mut R,
    ) -> Result<TimeSeries, CoreError> {
        if horizon_days < 1 {
            return Err(CoreError::InvalidHorizon { horizon_days });
        }
        let last = series.last().ok_or(CoreError::EmptySeries)?;

        // Placeholder artifacts are never executed; a present artifact
        // only marks the name as eligible for a future inference path.
        let _eligible = self.registry.has(model_name);

        let periods = horizon_days as usize * HOURS_PER_DAY as usize;
        let mean = series.trailing_mean(TRAILING_WINDOW);
        let step = one_hour();

        let mut points = Vec::with_capacity(periods);
        let mut timestamp = last.timestamp;
        for _ in 0..periods {
            timestamp += step;
            let mcp = mean + rng.random_range(-NOISE_BAND..=NOISE_BAND);
            points.push(PricePoint::new(timestamp, mcp));
        }
        Ok(TimeSeries::new(points))
    }

    /// Forecasts using a fresh thread-local rng.
    ///
    /// See [`ForecastEngine::forecast_with_rng`] for semantics and errors.
    pub fn forecast(
        &self,
        series: &TimeSeries,
        horizon_days: u32,
        model_name: &str,
    ) -> Result<TimeSeries, CoreError> {
        self.forecast_with_rng(series, horizon_days, model_name, &mut rand::rng())
    }
}
