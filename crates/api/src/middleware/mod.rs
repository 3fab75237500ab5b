//! Request guards implemented as axum extractors.
//!
//! [`auth::AuthUser`] proves the caller holds a valid token;
//! [`rbac::RequireAdmin`] and [`rbac::RequireAmbassador`] additionally pin
//! the role, so a handler's signature states its access rule.

pub mod auth;
pub mod rbac;
