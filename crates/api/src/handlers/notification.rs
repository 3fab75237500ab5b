//! Handlers for the notification inbox (`/notifications`).
//!
//! Both admins and ambassadors share these endpoints; the authenticated
//! role scopes every query so recipients only ever see their own inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nextif_core::error::CoreError;
use nextif_core::types::DbId;
use nextif_db::models::notification::Notification;
use nextif_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of notifications returned per request.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of notifications returned per request.
const MAX_LIMIT: i64 = 100;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for `PATCH /notifications/read-all`.
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_read: u64,
}

/// GET /api/v1/notifications
///
/// The caller's inbox, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListNotificationsQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let notifications = NotificationRepo::list_for_recipient(
        &state.pool,
        user.user_id,
        &user.role,
        params.unread_only,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// PATCH /api/v1/notifications/{id}/read
///
/// Mark one notification as read. 404 when the notification does not exist
/// or belongs to someone else, so ids cannot be probed across inboxes.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let marked = NotificationRepo::mark_read(&state.pool, id, user.user_id, &user.role).await?;
    if !marked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/notifications/read-all
///
/// Mark every unread notification as read, returning how many were flipped.
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<MarkAllReadResponse>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, user.user_id, &user.role).await?;
    Ok(Json(DataResponse {
        data: MarkAllReadResponse { marked_read },
    }))
}
