//! API request and response types.
//!
//! Request timestamps arrive as strings and are parsed at the boundary;
//! responses serialize [`PricePoint`](crate::series::PricePoint) and
//! [`DispatchPoint`](crate::dispatch::DispatchPoint) directly.

use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchPoint;
use crate::series::PricePoint;

/// One uploaded series row, timestamp still unparsed.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRow {
    /// Raw timestamp string (ISO-8601, `T` or space separator).
    pub timestamp: String,
    /// Market clearing price.
    pub mcp: f64,
}

/// `POST /predict` request body.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Historical price series.
    pub data: Vec<SeriesRow>,
    /// Forecast horizon in days.
    pub horizon_days: u32,
    /// Requested model name; defaults to `"ensemble"`.
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_model_name() -> String {
    "ensemble".to_string()
}

/// `POST /predict` response body.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Forecast points, one per future hour.
    pub forecast: Vec<PricePoint>,
    /// Echo of the requested model name.
    ///
    /// This reports what was asked for, not which computation path ran;
    /// downstream consumers rely on the literal echo.
    pub model_used: String,
}

/// `POST /schedule` request body.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    /// Historical price series.
    pub data: Vec<SeriesRow>,
    /// Battery power rating (MW).
    pub bess_power: f64,
    /// Battery energy capacity (MWh).
    pub bess_energy: f64,
    /// Accepted for interface symmetry; the plan spans the full series.
    #[serde(default)]
    pub horizon_days: u32,
}

/// `POST /schedule` response body.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    /// Per-hour dispatch records aligned with the input series.
    pub schedule: Vec<DispatchPoint>,
}

/// `GET /` response body.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Always `"ok"` when the process is serving.
    pub status: &'static str,
    /// Service banner.
    pub message: &'static str,
}

/// Error response body for 400-class failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_defaults_model_name() {
        let body = r#"{"data":[{"timestamp":"2024-01-01T00:00","mcp":40.0}],"horizon_days":1}"#;
        let req: PredictRequest = serde_json::from_str(body).expect("body should deserialize");
        assert_eq!(req.model_name, "ensemble");
        assert_eq!(req.data.len(), 1);
    }

    #[test]
    fn predict_request_honors_explicit_model_name() {
        let body = r#"{"data":[],"horizon_days":2,"model_name":"sarimax"}"#;
        let req: PredictRequest = serde_json::from_str(body).expect("body should deserialize");
        assert_eq!(req.model_name, "sarimax");
        assert_eq!(req.horizon_days, 2);
    }

    #[test]
    fn schedule_request_parses() {
        let body = r#"{"data":[{"timestamp":"2024-01-01 05:00","mcp":12.5}],"bess_power":2.0,"bess_energy":8.0,"horizon_days":1}"#;
        let req: ScheduleRequest = serde_json::from_str(body).expect("body should deserialize");
        assert_eq!(req.bess_power, 2.0);
        assert_eq!(req.bess_energy, 8.0);
        assert_eq!(req.data[0].mcp, 12.5);
    }

    #[test]
    fn schedule_response_serializes_plan_fields() {
        use chrono::NaiveDate;

        let point = DispatchPoint {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .expect("valid date")
                .and_hms_opt(0, 0, 0)
                .expect("valid time"),
            mcp: 10.0,
            action_mw: -2.0,
            soc_mwh: 7.0,
        };
        let json = serde_json::to_value(ScheduleResponse {
            schedule: vec![point],
        })
        .expect("response should serialize");
        let row = &json["schedule"][0];
        assert_eq!(row["timestamp"], "2024-01-01T00:00:00");
        assert_eq!(row["mcp"], 10.0);
        assert_eq!(row["action_mw"], -2.0);
        assert_eq!(row["soc_mwh"], 7.0);
    }
}
