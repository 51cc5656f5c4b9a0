//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use super::types::{
    ErrorResponse, PredictRequest, PredictResponse, RootResponse, ScheduleRequest,
    ScheduleResponse, SeriesRow,
};
use crate::dispatch::{BessRating, schedule};
use crate::forecast::ForecastEngine;
use crate::series::{PricePoint, TimeSeries, parse_timestamp};

/// Shorthand for the 400-with-message rejection every handler uses.
type Rejection = (StatusCode, Json<ErrorResponse>);

/// Health root.
///
/// `GET /` → 200 + `RootResponse` JSON
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        message: "BESS dispatch backend",
    })
}

/// Produces an hourly price forecast.
///
/// `POST /predict` → 200 + `PredictResponse` JSON
/// Validation failures (bad timestamp, empty series, zero horizon) → 400.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, Rejection> {
    let series = parse_series(&req.data)?;
    let engine = ForecastEngine::new(&state.registry);
    let forecast = engine
        .forecast(&series, req.horizon_days, &req.model_name)
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(PredictResponse {
        forecast: forecast.points().to_vec(),
        model_used: req.model_name,
    }))
}

/// Derives a dispatch plan with SOC trajectory.
///
/// `POST /schedule` → 200 + `ScheduleResponse` JSON
/// Validation failures (bad timestamp, empty series, bad rating) → 400.
pub async fn run_schedule(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, Rejection> {
    let series = parse_series(&req.data)?;
    let rating = BessRating::new(req.bess_power, req.bess_energy);
    let plan = schedule(&series, &rating, req.horizon_days)
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(ScheduleResponse { schedule: plan }))
}

/// Parses uploaded rows into a chronological series.
///
/// Timestamp parsing is the boundary's job; the core only ever sees
/// well-formed series.
fn parse_series(rows: &[SeriesRow]) -> Result<TimeSeries, Rejection> {
    let mut points = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
            bad_request(format!(
                "data[{idx}]: unparsable timestamp {:?}",
                row.timestamp
            ))
        })?;
        points.push(PricePoint::new(timestamp, row.mcp));
    }
    Ok(TimeSeries::new(points))
}

fn bad_request(message: String) -> Rejection {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}
