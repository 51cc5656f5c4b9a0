//! CSV ingestion of hourly price series.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::series::{PricePoint, TimeSeries, parse_timestamp};

/// Ingestion failure: the upload is rejected before reaching the core.
#[derive(Debug, Error)]
pub enum ImportError {
    /// File could not be read or a record could not be parsed as CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A row carried a timestamp no accepted layout matches.
    #[error("row {row}: unparsable timestamp {raw:?}")]
    BadTimestamp {
        /// 1-based data row number.
        row: usize,
        /// The offending raw value.
        raw: String,
    },
    /// A row carried a non-finite price.
    #[error("row {row}: non-finite mcp value")]
    BadPrice {
        /// 1-based data row number.
        row: usize,
    },
}

/// Raw CSV row before timestamp parsing.
#[derive(Debug, Deserialize)]
struct RawRow {
    timestamp: String,
    mcp: f64,
}

/// Reads a `timestamp,mcp` CSV file into a [`TimeSeries`].
///
/// Expects a header row. Rows are sorted chronologically by
/// [`TimeSeries::new`], so a shuffled upload is accepted. Rows with
/// unparsable timestamps or non-finite prices reject the whole upload —
/// malformed input never reaches the forecast engine or scheduler.
///
/// # Errors
///
/// Returns an [`ImportError`] for I/O failures, malformed CSV, bad
/// timestamps, or non-finite prices.
pub fn read_series_csv(path: &Path) -> Result<TimeSeries, ImportError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    read_series(&mut reader)
}

/// Reads a `timestamp,mcp` CSV from any configured reader.
fn read_series<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<TimeSeries, ImportError> {
    let mut points = Vec::new();
    for (idx, record) in reader.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let raw = record?;
        let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
            ImportError::BadTimestamp {
                row,
                raw: raw.timestamp.clone(),
            }
        })?;
        if !raw.mcp.is_finite() {
            return Err(ImportError::BadPrice { row });
        }
        points.push(PricePoint::new(timestamp, raw.mcp));
    }
    Ok(TimeSeries::new(points))
}

/// Parses a `timestamp,mcp` CSV from an in-memory string.
///
/// # Errors
///
/// Same failure modes as [`read_series_csv`].
pub fn read_series_str(raw: &str) -> Result<TimeSeries, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());
    read_series(&mut reader)
}
