//! CSV ingestion and export for price series and dispatch plans.

pub mod export;
pub mod import;
