//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use bess_dispatch::api::{AppState, router};

fn app() -> Router {
    router(Arc::new(AppState {
        registry: common::empty_registry(),
    }))
}

fn hourly_rows(n: usize) -> Vec<Value> {
    common::hourly_series(&common::alternating_prices(n))
        .iter()
        .map(|p| {
            json!({
                "timestamp": p.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
                "mcp": p.mcp,
            })
        })
        .collect()
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    let resp = app.oneshot(req).await.expect("request should be served");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, value)
}

#[tokio::test]
async fn predict_then_schedule_round_trip() {
    let rows = hourly_rows(48);

    let (status, predict_body) = post_json(
        app(),
        "/predict",
        json!({"data": rows, "horizon_days": 2, "model_name": "lightgbm"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(predict_body["model_used"], "lightgbm");
    let forecast = predict_body["forecast"].as_array().expect("forecast array");
    assert_eq!(forecast.len(), 48);

    let rows = hourly_rows(48);
    let (status, schedule_body) = post_json(
        app(),
        "/schedule",
        json!({
            "data": rows,
            "bess_power": 2.0,
            "bess_energy": 10.0,
            "horizon_days": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let plan = schedule_body["schedule"].as_array().expect("schedule array");
    assert_eq!(plan.len(), 48);
    for row in plan {
        let soc = row["soc_mwh"].as_f64().expect("numeric soc");
        assert!((0.0..=10.0).contains(&soc));
    }
}

#[tokio::test]
async fn forecast_continues_one_hour_after_upload() {
    let (status, body) = post_json(
        app(),
        "/predict",
        json!({"data": hourly_rows(24), "horizon_days": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let forecast = body["forecast"].as_array().expect("forecast array");
    // Upload ends 2024-01-01T23:00; forecast covers all of 2024-01-02.
    assert_eq!(forecast[0]["timestamp"], "2024-01-02T00:00:00");
    assert_eq!(forecast[23]["timestamp"], "2024-01-02T23:00:00");
}

#[tokio::test]
async fn schedule_handles_shuffled_upload() {
    let mut rows = hourly_rows(24);
    rows.reverse();

    let (status, body) = post_json(
        app(),
        "/schedule",
        json!({
            "data": rows,
            "bess_power": 2.0,
            "bess_energy": 10.0,
            "horizon_days": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let plan = body["schedule"].as_array().expect("schedule array");
    assert_eq!(plan[0]["timestamp"], "2024-01-01T00:00:00");
    assert_eq!(plan[23]["timestamp"], "2024-01-01T23:00:00");
}

#[tokio::test]
async fn validation_failures_return_400_with_message() {
    let (status, body) = post_json(
        app(),
        "/predict",
        json!({"data": [], "horizon_days": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "input series is empty");

    let (status, body) = post_json(
        app(),
        "/schedule",
        json!({
            "data": hourly_rows(4),
            "bess_power": -1.0,
            "bess_energy": 10.0,
            "horizon_days": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bess_power must be > 0, got -1");
}
