//! Shared fixtures and request helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use nextif_api::auth::jwt::{generate_access_token, JwtConfig};
use nextif_api::auth::password::hash_password;
use nextif_api::config::ServerConfig;
use nextif_api::router::build_app_router;
use nextif_api::state::AppState;
use nextif_core::roles::{ROLE_ADMIN, ROLE_AMBASSADOR};
use nextif_core::types::DbId;
use nextif_db::models::ambassador::{Ambassador, CreateAmbassador};
use nextif_db::repositories::AmbassadorRepo;
use nextif_events::EventBus;

/// Fixed signing secret so tests can mint their own tokens.
pub const TEST_JWT_SECRET: &str = "nextif-test-secret-not-for-production";

/// Plaintext password used for every seeded account.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// JWT configuration matching [`test_config`].
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiry_mins: 60,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert an admin account directly and return its id and email.
///
/// The password is [`TEST_PASSWORD`]; admins have no onboarding flow, so a
/// raw insert mirrors the operational seed.
pub async fn seed_admin(pool: &PgPool, email: &str) -> (DbId, String) {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let id: DbId = sqlx::query_scalar(
        "INSERT INTO admins (first_name, last_name, title, email, password_hash)
         VALUES ('Dana', 'Okafor', 'Program Lead', $1, $2)
         RETURNING id",
    )
    .bind(email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .expect("admin seed should succeed");
    (id, email.to_string())
}

/// Create an ambassador through the repository, then activate the account
/// with [`TEST_PASSWORD`] as if onboarding had completed.
pub async fn seed_ambassador(pool: &PgPool, email: &str) -> Ambassador {
    let created = AmbassadorRepo::create(
        pool,
        &CreateAmbassador {
            first_name: "Amina".to_string(),
            last_name: "Diallo".to_string(),
            email: email.to_string(),
            university: Some("State University".to_string()),
            phone: None,
        },
    )
    .await
    .expect("ambassador seed should succeed");

    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    sqlx::query("UPDATE ambassadors SET password_hash = $1, account_status = 'ACTIVE' WHERE id = $2")
        .bind(hashed)
        .bind(created.id)
        .execute(pool)
        .await
        .expect("ambassador activation should succeed");

    AmbassadorRepo::find_by_id(pool, created.id)
        .await
        .expect("ambassador lookup should succeed")
        .expect("seeded ambassador should exist")
}

/// Mint an access token for a seeded admin.
pub fn admin_token(admin_id: DbId) -> String {
    generate_access_token(admin_id, ROLE_ADMIN, &test_jwt_config())
        .expect("token generation should succeed")
}

/// Mint an access token for a seeded ambassador.
pub fn ambassador_token(ambassador_id: DbId) -> String {
    generate_access_token(ambassador_id, ROLE_AMBASSADOR, &test_jwt_config())
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not valid JSON: {e}: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}
