//! The `/tasks` tree: task CRUD plus the submission workflow.
//!
//! Role checks live in the handlers, via extractors. Static segments
//! (`/submissions`, `/my`) coexist with the `{id}` captures because axum
//! matches static segments first.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{submission, task};
use crate::state::AppState;

/// ```text
/// GET    /                        -> list_tasks (admin)
/// POST   /                        -> create_task (admin)
/// GET    /submissions             -> list_submissions (admin)
/// PATCH  /submissions/{id}/verify -> verify_submission (admin)
/// GET    /my/all                  -> my_tasks (ambassador)
/// POST   /{id}/submit             -> submit_task (ambassador)
/// GET    /{id}                    -> get_task (role-branched)
/// PATCH  /{id}                    -> update_task (admin)
/// DELETE /{id}                    -> delete_task (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list_tasks).post(task::create_task))
        // Admin review surface.
        .route("/submissions", get(submission::list_submissions))
        .route(
            "/submissions/{id}/verify",
            patch(submission::verify_submission),
        )
        // Ambassador surface.
        .route("/my/all", get(submission::my_tasks))
        .route("/{id}/submit", post(submission::submit_task))
        // Shared + admin detail routes.
        .route(
            "/{id}",
            get(task::get_task)
                .patch(task::update_task)
                .delete(task::delete_task),
        )
}
