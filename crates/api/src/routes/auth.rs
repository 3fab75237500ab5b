//! Login endpoints, one per audience.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Nested under `/auth`. Admins and ambassadors live in different tables
/// and get different token roles, so each audience has its own login.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(auth::admin_login))
        .route("/ambassador/login", post(auth::ambassador_login))
}
