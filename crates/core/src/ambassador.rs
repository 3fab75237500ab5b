//! Ambassador account status constants and validation functions.
//!
//! Account status gates login (suspended accounts are refused) and the
//! admin-facing status update endpoint, which may only toggle between
//! active and suspended.

use validator::ValidateEmail;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Account created by an admin; the ambassador has not signed in yet.
pub const ACCOUNT_STATUS_PRELOADED: &str = "PRELOADED";

/// First login completed; a password has not been set yet.
pub const ACCOUNT_STATUS_PASSWORD_PENDING: &str = "PASSWORD_PENDING";

/// Fully onboarded account.
pub const ACCOUNT_STATUS_ACTIVE: &str = "ACTIVE";

/// Account locked out by an admin.
pub const ACCOUNT_STATUS_SUSPENDED: &str = "SUSPENDED";

/// All valid account status values.
pub const VALID_ACCOUNT_STATUSES: &[&str] = &[
    ACCOUNT_STATUS_PRELOADED,
    ACCOUNT_STATUS_PASSWORD_PENDING,
    ACCOUNT_STATUS_ACTIVE,
    ACCOUNT_STATUS_SUSPENDED,
];

/// Statuses an admin may set through the status update endpoint.
pub const VALID_STATUS_UPDATES: &[&str] = &[ACCOUNT_STATUS_ACTIVE, ACCOUNT_STATUS_SUSPENDED];

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that an account status string is one of the accepted values.
pub fn validate_account_status(status: &str) -> Result<(), CoreError> {
    if VALID_ACCOUNT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid account status '{status}'. Must be one of: {}",
            VALID_ACCOUNT_STATUSES.join(", ")
        )))
    }
}

/// Validate an admin-initiated status change. Only active/suspended toggles
/// are allowed; onboarding states are never set by hand.
pub fn validate_status_update(status: &str) -> Result<(), CoreError> {
    if VALID_STATUS_UPDATES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid status update".to_string()))
    }
}

/// Validate email shape before the unique index gets a chance to reject it.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        )))
    }
}
