//! Event-to-notification dispatch engine.
//!
//! [`NotificationDispatcher`] consumes the portal event bus and fans each
//! event out to its side effects: in-app notification rows for the inbox
//! and emails for assignment and redo notices. The API layer has already
//! committed its database work by the time an event is published, so
//! nothing here can roll a state transition back; failures are logged and
//! the loop moves on.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::broadcast;

use nextif_core::roles::ROLE_AMBASSADOR;
use nextif_core::submission::STATUS_REDO;
use nextif_core::types::{DbId, Timestamp};
use nextif_db::models::notification::{CreateNotification, NOTIFICATION_TYPE_MESSAGE};
use nextif_db::repositories::{AmbassadorRepo, NotificationRepo};
use nextif_db::DbPool;
use nextif_events::{Mailer, PortalEvent, EVENT_SUBMISSION_VERIFIED, EVENT_TASK_ASSIGNED};

/// Remark used in redo emails when the admin left no feedback.
const DEFAULT_REDO_REMARK: &str = "Please redo the task as per instructions.";

/// Payload of a `task.assigned` event.
#[derive(Debug, Deserialize)]
struct AssignedPayload {
    title: String,
    due_date: Timestamp,
    assignee_ids: Vec<DbId>,
}

/// Payload of a `submission.verified` event.
#[derive(Debug, Deserialize)]
struct VerifiedPayload {
    submission_id: DbId,
    task_title: Option<String>,
    ambassador_id: DbId,
    status: String,
    feedback: Option<String>,
    new_due_date: Option<Timestamp>,
}

/// Build the inbox body for a verification notice.
fn verification_message(status: &str, feedback: Option<&str>) -> String {
    let mut body = format!("Your submission has been {status}.");
    if let Some(remark) = feedback.filter(|f| !f.trim().is_empty()) {
        body.push_str(&format!(" Remark: \"{remark}\""));
    }
    body
}

/// Dispatches portal events to notifications and emails.
pub struct NotificationDispatcher {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    /// Create a new dispatcher with the given database pool and mailer.
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Run the main dispatch loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](nextif_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PortalEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.handle_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to dispatch event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Dispatch a single event to its side effects.
    async fn handle_event(
        &self,
        event: &PortalEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match event.event_type.as_str() {
            EVENT_TASK_ASSIGNED => self.handle_task_assigned(event).await,
            EVENT_SUBMISSION_VERIFIED => self.handle_submission_verified(event).await,
            other => {
                tracing::debug!(event_type = other, "No dispatch rule for event");
                Ok(())
            }
        }
    }

    /// Email every assignee of a newly created task.
    async fn handle_task_assigned(
        &self,
        event: &PortalEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let payload: AssignedPayload = serde_json::from_value(event.payload.clone())?;

        let assignees = AmbassadorRepo::find_by_ids(&self.pool, &payload.assignee_ids).await?;
        for ambassador in &assignees {
            if let Err(e) = self
                .mailer
                .send_task_assigned(
                    &ambassador.email,
                    &ambassador.first_name,
                    &payload.title,
                    payload.due_date,
                )
                .await
            {
                tracing::warn!(
                    error = %e,
                    to = %ambassador.email,
                    "Failed to send assignment email"
                );
            }
        }

        Ok(())
    }

    /// Write an inbox notification for the verdict; for REDO also email the
    /// ambassador with the remark and the new deadline.
    async fn handle_submission_verified(
        &self,
        event: &PortalEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let payload: VerifiedPayload = serde_json::from_value(event.payload.clone())?;
        let task_title = payload.task_title.as_deref().unwrap_or("Task");

        // Inbox row and redo email are independent effects; a failure in one
        // must not block the other.
        let notification = CreateNotification {
            recipient_id: payload.ambassador_id,
            recipient_role: ROLE_AMBASSADOR.to_string(),
            notification_type: NOTIFICATION_TYPE_MESSAGE.to_string(),
            title: format!("Submission Update: {task_title}"),
            body: verification_message(&payload.status, payload.feedback.as_deref()),
            reference_id: Some(payload.submission_id),
        };
        if let Err(e) = NotificationRepo::create(&self.pool, &notification).await {
            tracing::error!(
                error = %e,
                submission_id = payload.submission_id,
                "Failed to create verification notification"
            );
        }

        if payload.status == STATUS_REDO {
            self.send_redo_email(&payload).await?;
        }

        Ok(())
    }

    /// Email the redo notice for a submission sent back by an admin.
    async fn send_redo_email(
        &self,
        payload: &VerifiedPayload,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ambassador = match AmbassadorRepo::find_by_id(&self.pool, payload.ambassador_id).await? {
            Some(a) => a,
            None => {
                tracing::warn!(
                    ambassador_id = payload.ambassador_id,
                    "Redo recipient no longer exists, skipping email"
                );
                return Ok(());
            }
        };

        // Verification guarantees a new due date for REDO; a missing one here
        // means the event predates that rule, so skip rather than guess.
        let new_due_date = match payload.new_due_date {
            Some(d) => d,
            None => {
                tracing::warn!(
                    submission_id = payload.submission_id,
                    "Redo event without a new due date, skipping email"
                );
                return Ok(());
            }
        };

        let remark = payload
            .feedback
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_REDO_REMARK);
        let task_title = payload.task_title.as_deref().unwrap_or("Task");

        if let Err(e) = self
            .mailer
            .send_task_redo(
                &ambassador.email,
                &ambassador.first_name,
                task_title,
                remark,
                new_due_date,
            )
            .await
        {
            tracing::warn!(
                error = %e,
                to = %ambassador.email,
                "Failed to send redo email"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_message_without_feedback() {
        assert_eq!(
            verification_message("COMPLETED", None),
            "Your submission has been COMPLETED."
        );
    }

    #[test]
    fn verification_message_quotes_feedback() {
        assert_eq!(
            verification_message("REDO", Some("Photos are too blurry.")),
            "Your submission has been REDO. Remark: \"Photos are too blurry.\""
        );
    }

    #[test]
    fn verification_message_ignores_blank_feedback() {
        assert_eq!(
            verification_message("REJECTED", Some("   ")),
            "Your submission has been REJECTED."
        );
    }
}
