//! Ambassador account management, admin side.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::ambassador_admin;
use crate::state::AppState;

/// Nested under `/admin/ambassadors`.
///
/// ```text
/// GET    /             -> list_ambassadors
/// POST   /             -> create_ambassador
/// GET    /{id}         -> get_ambassador
/// DELETE /{id}         -> delete_ambassador
/// PATCH  /{id}/status  -> update_ambassador_status
/// ```
pub fn ambassadors_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ambassador_admin::list_ambassadors).post(ambassador_admin::create_ambassador),
        )
        .route(
            "/{id}",
            get(ambassador_admin::get_ambassador).delete(ambassador_admin::delete_ambassador),
        )
        .route(
            "/{id}/status",
            patch(ambassador_admin::update_ambassador_status),
        )
}
