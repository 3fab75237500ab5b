//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs consumed by the repositories
//! - Safe response shapes where the row carries fields that must not leak

pub mod admin;
pub mod ambassador;
pub mod notification;
pub mod submission;
pub mod task;
