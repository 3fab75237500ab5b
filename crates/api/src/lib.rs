//! HTTP server library for the NextIF Ambassador Portal.
//!
//! Everything the binary in `main.rs` wires together lives here as public
//! modules, which is what lets the integration tests build the router and
//! mint tokens without spawning a process.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
