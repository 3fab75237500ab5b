//! Repository for the `notifications` table.
//!
//! Recipients are addressed by `(recipient_id, recipient_role)` because
//! admins and ambassadors live in separate tables with overlapping id
//! spaces.

use sqlx::PgPool;

use nextif_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, recipient_id, recipient_role, notification_type, title, body, \
                        reference_id, is_read, created_at";

/// Inbox reads and writes, always scoped to one recipient.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications
                 (recipient_id, recipient_role, notification_type, title, body, reference_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.recipient_id)
            .bind(&input.recipient_role)
            .bind(&input.notification_type)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.reference_id)
            .fetch_one(pool)
            .await
    }

    /// Page through a recipient's inbox, newest first.
    ///
    /// `unread_only` narrows the page to rows still waiting to be read.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient_id: DbId,
        recipient_role: &str,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let unread_clause = if unread_only { "AND is_read = false" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE recipient_id = $1 AND recipient_role = $2 {unread_clause}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(recipient_id)
            .bind(recipient_role)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Flip one notification to read.
    ///
    /// `true` means the row exists and belongs to the caller, whether or not
    /// it was already read. `false` means no such row for this recipient.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        recipient_id: DbId,
        recipient_role: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications
             SET is_read = true
             WHERE id = $1 AND recipient_id = $2 AND recipient_role = $3",
        )
        .bind(notification_id)
        .bind(recipient_id)
        .bind(recipient_role)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear a recipient's entire unread backlog, returning how many rows
    /// flipped.
    pub async fn mark_all_read(
        pool: &PgPool,
        recipient_id: DbId,
        recipient_role: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications
             SET is_read = true
             WHERE recipient_id = $1 AND recipient_role = $2 AND is_read = false",
        )
        .bind(recipient_id)
        .bind(recipient_role)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
