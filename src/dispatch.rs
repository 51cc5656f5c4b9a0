//! Price-threshold BESS dispatch and state-of-charge simulation.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::CoreError;
use crate::series::TimeSeries;

/// Battery power and energy ratings.
///
/// Both values must be strictly positive; see [`BessRating::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BessRating {
    /// Maximum charge/discharge power in MW.
    pub power_mw: f64,
    /// Usable energy capacity in MWh.
    pub energy_mwh: f64,
}

impl BessRating {
    /// Creates a rating; call [`BessRating::validate`] before dispatching.
    pub fn new(power_mw: f64, energy_mwh: f64) -> Self {
        Self {
            power_mw,
            energy_mwh,
        }
    }

    /// Rejects non-positive ratings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRating`] naming the first offending
    /// field (`bess_power` before `bess_energy`).
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.power_mw > 0.0) {
            return Err(CoreError::InvalidRating {
                field: "bess_power",
                value: self.power_mw,
            });
        }
        if !(self.energy_mwh > 0.0) {
            return Err(CoreError::InvalidRating {
                field: "bess_energy",
                value: self.energy_mwh,
            });
        }
        Ok(())
    }

    /// Hourly action magnitude: power capped by usable energy.
    fn action_magnitude_mw(&self) -> f64 {
        self.power_mw.min(self.energy_mwh)
    }
}

/// One hour of the dispatch plan.
///
/// `action_mw` is signed: negative charges the battery, positive
/// discharges it. `soc_mwh` is the state of charge after this hour's
/// action, always within `[0, energy_mwh]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchPoint {
    /// Hour this action applies to (same clock as the input series).
    pub timestamp: NaiveDateTime,
    /// Observed market clearing price for this hour.
    pub mcp: f64,
    /// Signed dispatch action in MW (negative = charge).
    pub action_mw: f64,
    /// State of charge after this hour, in MWh.
    pub soc_mwh: f64,
}

impl fmt::Display for DispatchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.action_mw < 0.0 {
            "charge"
        } else {
            "discharge"
        };
        write!(
            f,
            "{} | mcp={:>8.2}  {action:<9} {:>7.2} MW  soc={:>7.2} MWh",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.mcp,
            self.action_mw,
            self.soc_mwh,
        )
    }
}

/// Derives a charge/discharge plan from observed prices.
///
/// The threshold is the median price over the whole series, computed
/// once. Hours priced strictly below the median charge at
/// `min(power_mw, energy_mwh)`; every other hour, ties included,
/// discharges at the same magnitude. The state of charge starts half
/// full and is clamped to `[0, energy_mwh]` after each hour — a clamped
/// discharge silently truncates rather than signaling infeasibility, and
/// no round-trip efficiency loss is modeled.
///
/// `horizon_days` is accepted for parity with the forecast interface but
/// does not truncate or extend the plan: one [`DispatchPoint`] is emitted
/// per input sample. The computation is deterministic and pure.
///
/// # Errors
///
/// * [`CoreError::InvalidRating`] when either rating is non-positive
/// * [`CoreError::EmptySeries`] when `series` has no points
pub fn schedule(
    series: &TimeSeries,
    rating: &BessRating,
    _horizon_days: u32,
) -> Result<Vec<DispatchPoint>, CoreError> {
    rating.validate()?;
    let median = series.median_price().ok_or(CoreError::EmptySeries)?;

    let magnitude = rating.action_magnitude_mw();
    let mut soc = rating.energy_mwh / 2.0;

    let plan = series
        .iter()
        .map(|point| {
            let action_mw = if point.mcp < median {
                -magnitude
            } else {
                magnitude
            };
            // Discharge (positive action) drains the battery; charge
            // (negative action) fills it.
            soc = (soc - action_mw).clamp(0.0, rating.energy_mwh);
            DispatchPoint {
                timestamp: point.timestamp,
                mcp: point.mcp,
                action_mw,
                soc_mwh: soc,
            }
        })
        .collect();
    Ok(plan)
}

/// Aggregate figures for a completed dispatch plan.
///
/// Computed post-hoc from the plan so printed totals always agree with
/// the per-hour records.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Number of hours in the plan.
    pub hours: usize,
    /// Hours classified as charging.
    pub charge_hours: usize,
    /// Hours classified as discharging.
    pub discharge_hours: usize,
    /// Sum of |action| over the plan, in MWh (1 h steps).
    pub throughput_mwh: f64,
    /// Lowest state of charge reached, in MWh.
    pub min_soc_mwh: f64,
    /// Highest state of charge reached, in MWh.
    pub max_soc_mwh: f64,
}

impl PlanSummary {
    /// Computes summary figures from a plan; zeroed for an empty plan.
    pub fn from_plan(plan: &[DispatchPoint]) -> Self {
        let mut summary = Self {
            hours: plan.len(),
            charge_hours: 0,
            discharge_hours: 0,
            throughput_mwh: 0.0,
            min_soc_mwh: f64::INFINITY,
            max_soc_mwh: f64::NEG_INFINITY,
        };
        if plan.is_empty() {
            summary.min_soc_mwh = 0.0;
            summary.max_soc_mwh = 0.0;
            return summary;
        }
        for point in plan {
            if point.action_mw < 0.0 {
                summary.charge_hours += 1;
            } else {
                summary.discharge_hours += 1;
            }
            summary.throughput_mwh += point.action_mw.abs();
            summary.min_soc_mwh = summary.min_soc_mwh.min(point.soc_mwh);
            summary.max_soc_mwh = summary.max_soc_mwh.max(point.soc_mwh);
        }
        summary
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dispatch plan summary")?;
        writeln!(f, "  hours:            {}", self.hours)?;
        writeln!(f, "  charge hours:     {}", self.charge_hours)?;
        writeln!(f, "  discharge hours:  {}", self.discharge_hours)?;
        writeln!(f, "  throughput:       {:.2} MWh", self.throughput_mwh)?;
        write!(
            f,
            "  soc range:        {:.2} – {:.2} MWh",
            self.min_soc_mwh, self.max_soc_mwh
        )
    }
}
