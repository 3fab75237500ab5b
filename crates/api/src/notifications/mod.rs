//! Side-effect pipeline for the verification workflow.
//!
//! The [`NotificationDispatcher`] subscribes to the portal event bus and
//! turns workflow events into in-app notification rows and outbound
//! emails. Everything here is best effort: a failed side effect is logged
//! and dropped, never surfaced back into request handling.

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
