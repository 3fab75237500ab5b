//! Access tokens for both portal roles.
//!
//! A token is an HS256-signed JWT whose [`Claims`] carry the caller's
//! database id and role. The portal issues a single long-lived token per
//! login and has no refresh flow; sessions simply expire and the frontend
//! sends the user back through login.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nextif_core::types::DbId;
use serde::{Deserialize, Serialize};

/// One day, in minutes. Long enough that an ambassador working an event in
/// the field is not logged out mid-shift.
const DEFAULT_EXPIRY_MINS: i64 = 1440;

/// Payload signed into every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The account's database id. Which table it points into is determined
    /// by `role`; admin and ambassador id spaces overlap.
    pub sub: DbId,
    /// `"ADMIN"` or `"AMBASSADOR"`.
    pub role: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
    /// Issue time as a Unix timestamp.
    pub iat: i64,
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_MINS`
    /// (default 1440) from the environment.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty. A server that would
    /// sign tokens with a guessable default must not come up at all.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Sign a fresh token for `user_id` acting as `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: issued_at + config.expiry_mins * 60,
        iat: issued_at,
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Decode a token and check its signature and expiry.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_mins: 60,
        }
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let config = config_with("portal-test-secret-with-plenty-of-entropy");
        let token = generate_access_token(7, "ADMIN", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config_with("portal-test-secret-with-plenty-of-entropy");

        // Hand-build a token that expired five minutes ago, comfortably past
        // the validator's 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let stale = Claims {
            sub: 3,
            role: "AMBASSADOR".to_string(),
            exp: now - 300,
            iat: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signer = config_with("the-real-signing-secret");
        let imposter = config_with("a-completely-different-secret");

        let token = generate_access_token(3, "AMBASSADOR", &signer)
            .expect("token generation should succeed");

        assert!(validate_token(&token, &imposter).is_err());
    }
}
