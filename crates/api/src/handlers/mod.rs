//! Request handlers for the ambassador portal API.
//!
//! Each submodule provides async handler functions for one resource area.
//! Handlers delegate to the repositories in `nextif_db`, apply domain
//! validation from `nextif_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod ambassador_admin;
pub mod auth;
pub mod notification;
pub mod stats;
pub mod submission;
pub mod task;
