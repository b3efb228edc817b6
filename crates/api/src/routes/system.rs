//! Banner and health routes.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Text served at `/`.
pub const BANNER: &str = "This is a REST API example over the customer table using sqlx";

/// Fixed banner at the root path.
pub async fn banner() -> &'static str {
    BANNER
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
