//! Task submission entity model, DTOs, and the read-boundary view.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use nextif_core::submission::{StepResponse, STATUS_PENDING, STATUS_REDO};
use nextif_core::types::{DbId, Timestamp};

/// Full submission row from the `task_submissions` table.
///
/// Rows exist only once an ambassador has acted on a task; the pending
/// state before that is virtual (see [`SubmissionView`]).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TaskSubmission {
    pub id: DbId,
    pub task_id: DbId,
    pub ambassador_id: DbId,
    pub status: String,
    pub individual_due_date: Option<Timestamp>,
    pub proof_files: Vec<String>,
    pub links: Vec<String>,
    pub content: Option<String>,
    pub responses: Json<Vec<StepResponse>>,
    pub admin_feedback: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The submission state for one (task, ambassador) pair at the read
/// boundary: either no row yet, or the recorded row.
///
/// Deadline checks and status reporting go through this view so the virtual
/// pending state and the REDO deadline override live in one place.
#[derive(Debug, Clone)]
pub enum SubmissionView {
    NotStarted,
    Recorded(TaskSubmission),
}

impl SubmissionView {
    pub fn from_option(row: Option<TaskSubmission>) -> Self {
        match row {
            Some(submission) => SubmissionView::Recorded(submission),
            None => SubmissionView::NotStarted,
        }
    }

    /// Status reported to clients: the stored status, or `PENDING` when no
    /// row exists.
    pub fn status_label(&self) -> &str {
        match self {
            SubmissionView::NotStarted => STATUS_PENDING,
            SubmissionView::Recorded(submission) => &submission.status,
        }
    }

    /// The deadline in force for this pair. An individual due date overrides
    /// the task deadline only while the submission is in REDO.
    pub fn effective_due_date(&self, task_due_date: Timestamp) -> Timestamp {
        match self {
            SubmissionView::Recorded(submission) if submission.status == STATUS_REDO => {
                submission.individual_due_date.unwrap_or(task_due_date)
            }
            _ => task_due_date,
        }
    }

    /// Consume the view, yielding the recorded row if there is one.
    pub fn into_recorded(self) -> Option<TaskSubmission> {
        match self {
            SubmissionView::NotStarted => None,
            SubmissionView::Recorded(submission) => Some(submission),
        }
    }
}

/// Proof payload written by the submit upsert.
#[derive(Debug, Clone, Default)]
pub struct SubmitProof {
    pub content: Option<String>,
    pub links: Vec<String>,
    pub proof_files: Vec<String>,
    pub responses: Vec<StepResponse>,
}

/// Review fields applied by the verify transition.
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub status: String,
    pub feedback: Option<String>,
    /// Set only for REDO decisions; `None` keeps the stored value.
    pub new_due_date: Option<Timestamp>,
    pub reviewed_by: DbId,
}

/// Submission row enriched with task and people context for admin listings
/// and the verify response. Joined columns are optional because the task or
/// either account may have been deleted since.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubmissionDetail {
    pub id: DbId,
    pub task_id: DbId,
    pub ambassador_id: DbId,
    pub status: String,
    pub individual_due_date: Option<Timestamp>,
    pub proof_files: Vec<String>,
    pub links: Vec<String>,
    pub content: Option<String>,
    pub responses: Json<Vec<StepResponse>>,
    pub admin_feedback: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub task_title: Option<String>,
    pub task_due_date: Option<Timestamp>,
    pub ambassador_first_name: Option<String>,
    pub ambassador_last_name: Option<String>,
    pub ambassador_email: Option<String>,
    pub ambassador_university: Option<String>,
    pub reviewer_first_name: Option<String>,
    pub reviewer_last_name: Option<String>,
}

/// Filters for the admin submissions listing.
#[derive(Debug, Default)]
pub struct SubmissionFilter {
    pub task_id: Option<DbId>,
    pub ambassador_id: Option<DbId>,
    pub status: Option<String>,
}
