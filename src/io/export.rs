//! CSV export for forecasts and dispatch plans.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::dispatch::DispatchPoint;
use crate::series::{TimeSeries, format_timestamp};

/// Column header for forecast export.
const FORECAST_HEADER: &str = "timestamp,mcp";

/// Column header for dispatch plan export.
const SCHEDULE_HEADER: &str = "timestamp,mcp,action_mw,soc_mwh";

/// Exports a forecast series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_forecast_csv(series: &TimeSeries, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_forecast_csv(series, buf)
}

/// Writes a forecast series as CSV to any writer.
///
/// Writes a header row followed by one `timestamp,mcp` row per point.
/// Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_forecast_csv(series: &TimeSeries, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(FORECAST_HEADER.split(','))?;
    for p in series {
        wtr.write_record(&[format_timestamp(p.timestamp), format!("{:.4}", p.mcp)])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a dispatch plan to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_schedule_csv(plan: &[DispatchPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_schedule_csv(plan, buf)
}

/// Writes a dispatch plan as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_schedule_csv(plan: &[DispatchPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(SCHEDULE_HEADER.split(','))?;
    for p in plan {
        wtr.write_record(&[
            format_timestamp(p.timestamp),
            format!("{:.4}", p.mcp),
            format!("{:.4}", p.action_mw),
            format!("{:.4}", p.soc_mwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
