//! REST API exposing the forecast engine and dispatch scheduler.
//!
//! Provides three endpoints:
//! - `GET /` — health root
//! - `POST /predict` — hourly price forecast for a requested horizon
//! - `POST /schedule` — dispatch plan with SOC trajectory

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::registry::ModelRegistry;

/// Immutable application state shared across all request handlers.
///
/// The registry is loaded once at startup and wrapped in `Arc` — no locks
/// needed since artifacts never mutate after load.
pub struct AppState {
    /// Model artifact registry.
    pub registry: ModelRegistry,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict))
        .route("/schedule", post(handlers::run_schedule))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
