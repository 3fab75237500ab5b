//! Ambassador-facing surface under `/ambassador`.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Currently just the dashboard statistics endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(stats::dashboard_stats))
}
