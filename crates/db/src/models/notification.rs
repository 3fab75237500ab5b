//! Notification entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use nextif_core::types::{DbId, Timestamp};

/// A direct message produced by the verification workflow.
pub const NOTIFICATION_TYPE_MESSAGE: &str = "MESSAGE";

/// A broadcast announcement.
pub const NOTIFICATION_TYPE_ANNOUNCEMENT: &str = "ANNOUNCEMENT";

/// Full notification row from the `notifications` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub recipient_role: String,
    pub notification_type: String,
    pub title: String,
    pub body: String,
    pub reference_id: Option<DbId>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification. Built internally by the dispatcher, not
/// deserialized from requests.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient_id: DbId,
    pub recipient_role: String,
    pub notification_type: String,
    pub title: String,
    pub body: String,
    pub reference_id: Option<DbId>,
}
