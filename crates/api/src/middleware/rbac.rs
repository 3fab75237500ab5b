//! Role gates layered on top of [`AuthUser`].
//!
//! A handler states its requirement in its signature: taking
//! `RequireAdmin(admin)` instead of `AuthUser` makes the admin check part of
//! the route's type. The two roles are disjoint; neither extractor accepts
//! the other's tokens, because admin and ambassador ids come from different
//! tables and a crossed-over id would address the wrong account.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use nextif_core::error::CoreError;
use nextif_core::roles::{ROLE_ADMIN, ROLE_AMBASSADOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authed_with_role(
    parts: &mut Parts,
    state: &AppState,
    role: &str,
    rejection: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Core(CoreError::Forbidden(rejection.to_string())));
    }
    Ok(user)
}

/// Admits only `ADMIN` tokens; otherwise 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authed_with_role(parts, state, ROLE_ADMIN, "Admin role required").await?;
        Ok(RequireAdmin(user))
    }
}

/// Admits only `AMBASSADOR` tokens; otherwise 403.
///
/// Admins do not pass this check. Ambassador-facing endpoints act on "the
/// calling ambassador", which has no meaning for an admin token.
pub struct RequireAmbassador(pub AuthUser);

impl FromRequestParts<AppState> for RequireAmbassador {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            authed_with_role(parts, state, ROLE_AMBASSADOR, "Ambassador role required").await?;
        Ok(RequireAmbassador(user))
    }
}
