//! Well-known role name constants.
//!
//! These are the values carried in the JWT `role` claim and in
//! `notifications.recipient_role`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_AMBASSADOR: &str = "AMBASSADOR";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_AMBASSADOR];
