use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the hosted data service is reachable.
    pub service_healthy: bool,
}

/// GET /health -- returns server and hosted service health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let service_healthy = match worldweaver_db::health_check(&state.client).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Hosted service health check failed");
            false
        }
    };

    let status = if service_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        service_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
