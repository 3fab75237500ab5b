//! Domain error type shared by every portal crate.
//!
//! Variants deliberately mirror the portal's HTTP contract (not found,
//! validation, conflict, authz) so the API layer can map them to status
//! codes without inspecting message text.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed row does not exist. `entity` is the display name used
    /// in client-facing messages ("Task", "Ambassador", ...).
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input breaks a domain rule (vocabulary, range, required field).
    #[error("validation: {0}")]
    Validation(String),

    /// The write collides with existing state, e.g. a duplicate email.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A bug or broken invariant inside the domain layer.
    #[error("internal: {0}")]
    Internal(String),
}
