use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::formatter::ErrorResponseFormatter;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub formatter: ErrorResponseFormatter,
}

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: START_TIME.elapsed().as_secs(),
    })
}

/// Raise the posted JSON value as an application error
///
/// Structured values (objects with a numeric `status`) come back as the
/// canonical error body; anything else gets the default 500.
#[utoipa::path(
    post,
    path = "/errors/raise",
    tag = "errors",
    responses(
        (status = "4XX", description = "Formatted client error", body = crate::errors::ErrorResponse),
        (status = "5XX", description = "Formatted or default server error", body = crate::errors::ErrorResponse)
    )
)]
pub async fn raise_error(Json(error): Json<Value>) -> Result<StatusCode, ApiError> {
    Err(ApiError::raw(error))
}

/// Raise a structured error with the given status
#[utoipa::path(
    get,
    path = "/errors/{status}",
    tag = "errors",
    params(
        ("status" = u16, Path, description = "HTTP status code to raise")
    ),
    responses(
        (status = "4XX", description = "Formatted client error", body = crate::errors::ErrorResponse),
        (status = "5XX", description = "Formatted server error", body = crate::errors::ErrorResponse)
    )
)]
pub async fn raise_status(Path(status): Path<u16>) -> Result<StatusCode, ApiError> {
    Err(ApiError::with_status(status))
}
