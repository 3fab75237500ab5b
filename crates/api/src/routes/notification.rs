//! The caller's notification inbox, under `/notifications`.
//!
//! Both roles share these routes; every query is scoped by the recipient
//! id and role taken from the token, never from the request.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list_notifications))
        .route("/read-all", patch(notification::mark_all_read))
        .route("/{id}/read", patch(notification::mark_read))
}
