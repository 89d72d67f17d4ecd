//! Health and credential-diagnostic endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /v1/health
///
/// Intentionally unauthenticated for load balancer probes. Reports
/// liveness only; upstream reachability is not checked here.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Credential diagnostic response. Reports presence and length of the
/// configured cookie, never its value.
#[derive(Debug, Serialize)]
pub struct CredentialStatusResponse {
    pub status: &'static str,
    pub cookie_exists: bool,
    pub cookie_length: usize,
}

/// GET /v1/status
pub async fn credential_status(
    State(state): State<AppState>,
) -> ApiResult<Json<CredentialStatusResponse>> {
    let cookie = state.config.upstream.cookie.as_deref();
    Ok(Json(CredentialStatusResponse {
        status: "ok",
        cookie_exists: cookie.is_some(),
        cookie_length: cookie.map(str::len).unwrap_or(0),
    }))
}

/// Fallback for unknown paths: a JSON 404 instead of axum's empty body.
pub async fn not_found(req: Request) -> ApiError {
    ApiError::NotFound(format!("path {} not found", req.uri().path()))
}
