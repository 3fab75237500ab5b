//! Submission status constants and validation functions.
//!
//! A submission row exists only once an ambassador has acted; the absence of
//! a row is the virtual pending state reported as [`STATUS_PENDING`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Schema default; never observed through the API because rows are created
/// by the submit upsert, which writes COMPLETED.
pub const STATUS_NOT_STARTED: &str = "NOT_STARTED";

/// Proof recorded, awaiting admin review.
pub const STATUS_SUBMITTED: &str = "SUBMITTED";

/// Accepted, either on submit (auto) or by admin decision.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// Rejected by an admin.
pub const STATUS_REJECTED: &str = "REJECTED";

/// Sent back for rework with a fresh individual deadline.
pub const STATUS_REDO: &str = "REDO";

/// Virtual status reported when an assignee has no submission row yet.
pub const STATUS_PENDING: &str = "PENDING";

/// All status values a stored submission row can hold.
pub const VALID_SUBMISSION_STATUSES: &[&str] = &[
    STATUS_NOT_STARTED,
    STATUS_SUBMITTED,
    STATUS_COMPLETED,
    STATUS_REJECTED,
    STATUS_REDO,
];

/// Decisions an admin may apply during verification.
pub const VALID_VERIFY_DECISIONS: &[&str] = &[STATUS_COMPLETED, STATUS_REJECTED, STATUS_REDO];

/* --------------------------------------------------------------------------
Embedded structures
-------------------------------------------------------------------------- */

/// An ambassador's answer to one what-to-do step, keyed by the step id the
/// task carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResponse {
    pub what_to_do_id: Uuid,
    pub text: String,
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a stored submission status is one of the accepted values.
pub fn validate_submission_status(status: &str) -> Result<(), CoreError> {
    if VALID_SUBMISSION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid submission status '{status}'. Must be one of: {}",
            VALID_SUBMISSION_STATUSES.join(", ")
        )))
    }
}

/// Validate an admin verification decision. Checked before any write so a
/// bad decision never mutates the submission.
pub fn validate_verify_decision(status: &str) -> Result<(), CoreError> {
    if VALID_VERIFY_DECISIONS.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid status. Use COMPLETED, REJECTED, or REDO.".to_string(),
        ))
    }
}
