//! Domain logic for the ambassador portal backend.
//!
//! Pure types, vocabularies, validation, and statistics math shared by the
//! DB and API layers. No I/O lives in this crate.

pub mod ambassador;
pub mod error;
pub mod roles;
pub mod stats;
pub mod submission;
pub mod task;
pub mod types;
