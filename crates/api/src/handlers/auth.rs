//! Handlers for the `/auth` resource (admin and ambassador login).
//!
//! The portal has two separate login endpoints because admins and
//! ambassadors live in different tables with different account gates.
//! Both return the same `{ token, user }` shape on success.

use axum::extract::State;
use axum::Json;
use nextif_core::ambassador::ACCOUNT_STATUS_SUSPENDED;
use nextif_core::error::CoreError;
use nextif_core::roles::{ROLE_ADMIN, ROLE_AMBASSADOR};
use nextif_core::types::DbId;
use nextif_db::repositories::{AdminRepo, AmbassadorRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for both login endpoints.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful admin login response.
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: AdminInfo,
}

/// Public admin info embedded in [`AdminLoginResponse`].
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
}

/// Successful ambassador login response.
#[derive(Debug, Serialize)]
pub struct AmbassadorLoginResponse {
    pub token: String,
    pub user: AmbassadorInfo,
}

/// Public ambassador info embedded in [`AmbassadorLoginResponse`].
#[derive(Debug, Serialize)]
pub struct AmbassadorInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/admin/login
///
/// Authenticate an admin with email + password. Returns a JWT and the
/// admin's public profile.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    // 1. Find admin by email (case-insensitive).
    let admin = AdminRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    // 2. An account without a stored hash cannot log in.
    let hash = admin
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Password not set for this account".into()))?;

    // 3. Verify password.
    let password_valid = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 4. Issue the access token.
    let token = generate_access_token(admin.id, ROLE_ADMIN, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AdminLoginResponse {
        token,
        user: AdminInfo {
            id: admin.id,
            email: admin.email,
            role: ROLE_ADMIN.to_string(),
            first_name: admin.first_name,
            last_name: admin.last_name,
            title: admin.title,
        },
    }))
}

/// POST /api/v1/auth/ambassador/login
///
/// Authenticate an ambassador with email + password. Suspended accounts
/// are refused before any password work.
pub async fn ambassador_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AmbassadorLoginResponse>> {
    // 1. Find ambassador by email (case-insensitive).
    let ambassador = AmbassadorRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    // 2. Suspended accounts are locked out entirely.
    if ambassador.account_status == ACCOUNT_STATUS_SUSPENDED {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account suspended".into(),
        )));
    }

    // 3. An account without a stored hash cannot log in.
    let hash = ambassador
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Password not set for this account".into()))?;

    // 4. Verify password.
    let password_valid = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 5. Issue the access token.
    let token = generate_access_token(ambassador.id, ROLE_AMBASSADOR, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AmbassadorLoginResponse {
        token,
        user: AmbassadorInfo {
            id: ambassador.id,
            email: ambassador.email,
            role: ROLE_AMBASSADOR.to_string(),
            first_name: ambassador.first_name,
            last_name: ambassador.last_name,
        },
    }))
}
