//! Hourly electricity-price forecasting and BESS dispatch planning.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod forecast;
/// CSV ingestion and export.
pub mod io;
pub mod registry;
pub mod series;

#[cfg(feature = "api")]
pub mod api;
