use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store did not answer.
    pub status: &'static str,
    pub version: &'static str,
    /// `postgres` or `memory`.
    pub store_backend: &'static str,
    pub store_healthy: bool,
}

/// GET /health
///
/// Answers 503 while the store is unreachable so load balancers stop
/// routing here. The catalog is not checked; its failures are per request.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = state.movies.store_healthy().await;
    let (code, status) = if store_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_backend: state.config.store.backend.as_str(),
        store_healthy,
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1` and without authentication.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
