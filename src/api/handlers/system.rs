//! Health and metrics endpoints

use crate::api::response::ErrorResponse;
use crate::core::app_state::SharedState;
use crate::core::error::{Error, Result};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// System health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Seconds since startup
    pub uptime_seconds: u64,
}

/// `GET /api/health`
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        uptime_seconds: state.uptime().as_secs(),
    })
}

/// `GET /metrics`
pub async fn metrics(State(state): State<SharedState>) -> Result<impl IntoResponse> {
    if !state.config.metrics.enable_prometheus {
        return Err(Error::not_found("Metrics are disabled"));
    }

    let body = state.metrics.encode()?;
    Ok(([(CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

/// Fallback for unknown routes
pub async fn route_not_found() -> Error {
    Error::not_found("Route not found")
}
