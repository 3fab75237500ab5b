pub mod admin;
pub mod ambassador;
pub mod auth;
pub mod health;
pub mod notification;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Everything served under `/api/v1`, one nested router per resource.
///
/// ```text
/// /auth/admin/login                    admin login (public)
/// /auth/ambassador/login               ambassador login (public)
///
/// /tasks                               list, create (admin only)
/// /tasks/submissions                   list submissions (admin only)
/// /tasks/submissions/{id}/verify       verify submission (PATCH, admin only)
/// /tasks/my/all                        assigned tasks + own status (ambassador)
/// /tasks/{id}/submit                   submit proof (POST, ambassador)
/// /tasks/{id}                          get (any role), update, delete (admin)
///
/// /ambassador/dashboard/stats          dashboard statistics (ambassador)
///
/// /admin/ambassadors                   list, create (admin only)
/// /admin/ambassadors/{id}              get, delete
/// /admin/ambassadors/{id}/status       activate / suspend (PATCH)
///
/// /notifications                       list own inbox (?unread_only, limit, offset)
/// /notifications/read-all              mark all read (PATCH)
/// /notifications/{id}/read             mark one read (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (separate admin / ambassador logins).
        .nest("/auth", auth::router())
        // Task registry, submissions, and verification.
        .nest("/tasks", task::router())
        // Ambassador-facing dashboard.
        .nest("/ambassador", ambassador::router())
        // Admin-facing ambassador onboarding and account management.
        .nest("/admin/ambassadors", admin::ambassadors_router())
        // Notification inbox.
        .nest("/notifications", notification::router())
}
