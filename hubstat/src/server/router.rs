//! HTTP router for the status API
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/endpoints/:id/dockerhub/status`

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use libhubstat::{HubStatError, RateLimitStatus, StatusService};
use serde::{Deserialize, Serialize};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: StatusService,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned for every failed API call
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    pub details: String,
}

/// A library error on its way to becoming an HTTP response
pub struct ApiError(HubStatError);

impl From<HubStatError> for ApiError {
    fn from(err: HubStatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::warn!(
                error = %self.0,
                credentials_rejected = self.0.is_credentials_rejected(),
                "dockerhub status request failed"
            );
        } else {
            tracing::debug!(error = %self.0, "rejected dockerhub status request");
        }

        let body = ErrorResponse {
            message: self.0.summary().to_string(),
            details: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/endpoints/:id/dockerhub/status",
            get(dockerhub_status_handler),
        )
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Remaining DockerHub pulls for the endpoint named in the path
async fn dockerhub_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RateLimitStatus>, ApiError> {
    tracing::debug!(endpoint = %id, "dockerhub status requested");
    let status = state.service.endpoint_dockerhub_status(&id).await?;
    Ok(Json(status))
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
