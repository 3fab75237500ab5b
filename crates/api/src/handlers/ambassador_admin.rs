//! Handlers for admin-side ambassador onboarding and account management
//! (`/admin/ambassadors`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nextif_core::ambassador::{validate_account_status, validate_email, validate_status_update};
use nextif_core::error::CoreError;
use nextif_core::types::DbId;
use nextif_db::models::ambassador::{AmbassadorFilter, AmbassadorResponse, CreateAmbassador};
use nextif_db::repositories::AmbassadorRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{PageMeta, Paginated};
use crate::state::AppState;

/// Default page size for the ambassador listing.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for the ambassador listing.
const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/ambassadors`.
#[derive(Debug, Deserialize)]
pub struct CreateAmbassadorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: Option<String>,
    pub phone: Option<String>,
}

/// Query parameters for `GET /admin/ambassadors`.
#[derive(Debug, Deserialize)]
pub struct ListAmbassadorsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub account_status: Option<String>,
    /// Case-insensitive match against first name, last name, or email.
    pub search: Option<String>,
}

/// Request body for `PATCH /admin/ambassadors/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/ambassadors
///
/// Onboard an ambassador. The account starts PRELOADED with no password
/// hash; credentials are provisioned through the external onboarding flow.
pub async fn create_ambassador(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateAmbassadorRequest>,
) -> AppResult<(StatusCode, Json<AmbassadorResponse>)> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "First and last name are required".into(),
        )));
    }
    validate_email(&input.email)?;

    // Friendly duplicate check; the uq_ambassadors_email constraint still
    // backs this under concurrent creates.
    if AmbassadorRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Ambassador with this email already exists".into(),
        )));
    }

    let create = CreateAmbassador {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        university: input.university,
        phone: input.phone,
    };
    let created = AmbassadorRepo::create(&state.pool, &create).await?;

    Ok((StatusCode::CREATED, Json(AmbassadorResponse::from(&created))))
}

/// GET /api/v1/admin/ambassadors
///
/// Paginated listing with optional status filter and name/email search.
pub async fn list_ambassadors(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListAmbassadorsQuery>,
) -> AppResult<Json<Paginated<AmbassadorResponse>>> {
    if let Some(ref status) = params.account_status {
        validate_account_status(status)?;
    }

    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;

    let filter = AmbassadorFilter {
        account_status: params.account_status,
        search: params.search,
    };

    let total = AmbassadorRepo::count(&state.pool, &filter).await?;
    let rows = AmbassadorRepo::list(&state.pool, &filter, limit, offset).await?;

    let data = rows.iter().map(AmbassadorResponse::from).collect();
    Ok(Json(Paginated {
        data,
        meta: PageMeta { total, page, limit },
    }))
}

/// GET /api/v1/admin/ambassadors/{id}
pub async fn get_ambassador(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<AmbassadorResponse>> {
    let ambassador = AmbassadorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ambassador",
            id,
        }))?;
    Ok(Json(AmbassadorResponse::from(&ambassador)))
}

/// PATCH /api/v1/admin/ambassadors/{id}/status
///
/// Toggle an account between ACTIVE and SUSPENDED. Onboarding states are
/// never set by hand.
pub async fn update_ambassador_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<AmbassadorResponse>> {
    validate_status_update(&input.status)?;

    let updated = AmbassadorRepo::set_account_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ambassador",
            id,
        }))?;
    Ok(Json(AmbassadorResponse::from(&updated)))
}

/// DELETE /api/v1/admin/ambassadors/{id}
///
/// Remove the account and its assignments. Submissions are kept as audit
/// history. Returns 204 No Content.
pub async fn delete_ambassador(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AmbassadorRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ambassador",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
