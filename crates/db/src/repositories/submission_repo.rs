//! Repository for the `task_submissions` table.
//!
//! The submit path is a single atomic upsert keyed on the
//! `(task_id, ambassador_id)` unique constraint: concurrent submits for the
//! same pair race at the database and the last write wins, never producing a
//! duplicate row.

use sqlx::types::Json;
use sqlx::PgPool;

use nextif_core::submission::STATUS_COMPLETED;
use nextif_core::types::DbId;

use crate::models::submission::{
    ReviewUpdate, SubmissionDetail, SubmissionFilter, SubmitProof, TaskSubmission,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, ambassador_id, status, individual_due_date, proof_files, \
                        links, content, responses, admin_feedback, submitted_at, reviewed_at, \
                        reviewed_by, created_at, updated_at";

/// Column list for detail queries joining task, ambassador, and reviewer
/// context. Joined sides are LEFT JOINs because submissions outlive both
/// their task and their ambassador.
const DETAIL_COLUMNS: &str =
    "s.id, s.task_id, s.ambassador_id, s.status, s.individual_due_date, s.proof_files, \
     s.links, s.content, s.responses, s.admin_feedback, s.submitted_at, s.reviewed_at, \
     s.reviewed_by, s.created_at, s.updated_at, \
     t.title AS task_title, t.due_date AS task_due_date, \
     a.first_name AS ambassador_first_name, a.last_name AS ambassador_last_name, \
     a.email AS ambassador_email, a.university AS ambassador_university, \
     r.first_name AS reviewer_first_name, r.last_name AS reviewer_last_name";

const DETAIL_JOINS: &str = "FROM task_submissions s \
     LEFT JOIN tasks t ON t.id = s.task_id \
     LEFT JOIN ambassadors a ON a.id = s.ambassador_id \
     LEFT JOIN admins r ON r.id = s.reviewed_by";

/// Provides the submit upsert, the review update, and submission queries.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Find a submission by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_submissions WHERE id = $1");
        sqlx::query_as::<_, TaskSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the submission for one (task, ambassador) pair.
    pub async fn find_by_task_and_ambassador(
        pool: &PgPool,
        task_id: DbId,
        ambassador_id: DbId,
    ) -> Result<Option<TaskSubmission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM task_submissions WHERE task_id = $1 AND ambassador_id = $2");
        sqlx::query_as::<_, TaskSubmission>(&query)
            .bind(task_id)
            .bind(ambassador_id)
            .fetch_optional(pool)
            .await
    }

    /// Record proof for a (task, ambassador) pair.
    ///
    /// Inserts on first submit, overwrites the proof fields on resubmit; the
    /// review fields and any individual due date are left untouched. The
    /// status is forced to COMPLETED and `submitted_at` refreshed either way.
    pub async fn upsert_proof(
        pool: &PgPool,
        task_id: DbId,
        ambassador_id: DbId,
        proof: &SubmitProof,
    ) -> Result<TaskSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_submissions
                 (task_id, ambassador_id, status, proof_files, links, content, responses, submitted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
             ON CONFLICT (task_id, ambassador_id) DO UPDATE SET
                 status = EXCLUDED.status,
                 proof_files = EXCLUDED.proof_files,
                 links = EXCLUDED.links,
                 content = EXCLUDED.content,
                 responses = EXCLUDED.responses,
                 submitted_at = EXCLUDED.submitted_at,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskSubmission>(&query)
            .bind(task_id)
            .bind(ambassador_id)
            .bind(STATUS_COMPLETED)
            .bind(&proof.proof_files)
            .bind(&proof.links)
            .bind(&proof.content)
            .bind(Json(&proof.responses))
            .fetch_one(pool)
            .await
    }

    /// Apply an admin review decision.
    ///
    /// `new_due_date` is bound only for REDO decisions; the COALESCE keeps
    /// the stored individual due date otherwise. A missing feedback leaves
    /// any earlier remark in place.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn apply_review(
        pool: &PgPool,
        id: DbId,
        review: &ReviewUpdate,
    ) -> Result<Option<TaskSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE task_submissions SET
                status = $2,
                admin_feedback = COALESCE($3, admin_feedback),
                individual_due_date = COALESCE($4, individual_due_date),
                reviewed_at = NOW(),
                reviewed_by = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskSubmission>(&query)
            .bind(id)
            .bind(&review.status)
            .bind(&review.feedback)
            .bind(review.new_due_date)
            .bind(review.reviewed_by)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one submission with its display context.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubmissionDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE s.id = $1");
        sqlx::query_as::<_, SubmissionDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions with display context, optionally filtered by task,
    /// ambassador, or status. Most recently submitted first.
    pub async fn list_detail(
        pool: &PgPool,
        filter: &SubmissionFilter,
    ) -> Result<Vec<SubmissionDetail>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if filter.task_id.is_some() {
            conditions.push(format!("s.task_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.ambassador_id.is_some() {
            conditions.push(format!("s.ambassador_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("s.status = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             {where_clause}
             ORDER BY s.submitted_at DESC NULLS LAST"
        );

        let mut q = sqlx::query_as::<_, SubmissionDetail>(&query);
        if let Some(task_id) = filter.task_id {
            q = q.bind(task_id);
        }
        if let Some(ambassador_id) = filter.ambassador_id {
            q = q.bind(ambassador_id);
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status);
        }

        q.fetch_all(pool).await
    }

    /// All submissions belonging to one ambassador, keyed for merging into
    /// the "my tasks" view.
    pub async fn list_for_ambassador(
        pool: &PgPool,
        ambassador_id: DbId,
    ) -> Result<Vec<TaskSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_submissions WHERE ambassador_id = $1");
        sqlx::query_as::<_, TaskSubmission>(&query)
            .bind(ambassador_id)
            .fetch_all(pool)
            .await
    }
}
