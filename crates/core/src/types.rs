//! Shared scalar aliases used across the portal crates.

/// Primary-key type for every portal table (`BIGSERIAL` in Postgres).
pub type DbId = i64;

/// Instants are stored and exchanged as UTC; conversion to a campus-local
/// wall clock happens only at the weekly-window boundary.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
