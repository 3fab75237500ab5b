//! Liveness endpoint, mounted at the root rather than under `/api/v1` so
//! load balancers and uptime checks need no auth and no version prefix.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

const STATUS_OK: &str = "ok";
const STATUS_DEGRADED: &str = "degraded";

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// False when the `SELECT 1` probe fails; the endpoint still answers 200
    /// so the probe distinguishes "API down" from "database down".
    pub db_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = nextif_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { STATUS_OK } else { STATUS_DEGRADED },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
