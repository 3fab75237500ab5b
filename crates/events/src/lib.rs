//! Nextif event bus and outbound notification infrastructure.
//!
//! This crate provides the building blocks for the portal's side-effect
//! pipeline:
//!
//! - [`EventBus`] is the in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PortalEvent`] is the canonical domain event envelope.
//! - [`delivery`] holds the outbound email channel used to reach
//!   ambassador inboxes.
//!
//! Publishing is fire-and-forget: the API layer commits its database work
//! first and only then emits an event, so a slow or failing consumer can
//! never roll back a state transition.

pub mod bus;
pub mod delivery;

pub use bus::{EventBus, PortalEvent, EVENT_SUBMISSION_VERIFIED, EVENT_TASK_ASSIGNED};
pub use delivery::email::{EmailConfig, EmailError, Mailer, NoopMailer, SmtpMailer};
