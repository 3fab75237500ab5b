//! Bearer-token authentication for the portal's protected routes.
//!
//! [`AuthUser`] is an extractor: listing it as a handler parameter makes the
//! route require a valid `Authorization: Bearer <token>` header and hands the
//! handler the verified identity. Rejections reuse the standard error
//! contract, so an unauthenticated call gets the same JSON shape as any
//! other failure.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use nextif_core::error::CoreError;
use nextif_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The verified identity behind a request.
///
/// Carries exactly what the token proves: who is calling and as which role.
/// Handlers that need the full account row look it up themselves.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Account id from the token's `sub` claim.
    pub user_id: DbId,
    /// `"ADMIN"` or `"AMBASSADOR"`, from the token's `role` claim.
    pub role: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        // Signature, expiry, and malformed-token failures all collapse into
        // one client-facing message.
        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
