//! Outbound delivery channels for portal notifications.
//!
//! Email is the only external channel: the notification dispatcher uses a
//! [`Mailer`](email::Mailer) to push task assignment and redo notices to
//! ambassador inboxes.

pub mod email;
