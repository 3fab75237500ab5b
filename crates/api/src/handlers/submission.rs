//! Handlers for the submission and verification surface of `/tasks`.
//!
//! Covers the ambassador submit/resubmit path, the ambassador "my tasks"
//! view, and the admin review surface (listing and verifying submissions).
//! State transitions commit first; notification and email side effects ride
//! on events published after the fact and can never roll a transition back.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use nextif_core::error::CoreError;
use nextif_core::submission::{
    validate_submission_status, validate_verify_decision, StepResponse, STATUS_REDO,
};
use nextif_core::types::{DbId, Timestamp};
use nextif_db::models::submission::{
    ReviewUpdate, SubmissionDetail, SubmissionFilter, SubmissionView, SubmitProof, TaskSubmission,
};
use nextif_db::models::task::AssignedTask;
use nextif_db::repositories::{SubmissionRepo, TaskRepo};
use nextif_events::{PortalEvent, EVENT_SUBMISSION_VERIFIED};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAmbassador};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks/{id}/submit`.
///
/// `proof_files` carries stored-file references produced by the upload
/// service; this API never sees file bytes.
#[derive(Debug, Deserialize)]
pub struct SubmitTaskRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub proof_files: Vec<String>,
    #[serde(default)]
    pub responses: Vec<StepResponse>,
}

/// Request body for `PATCH /tasks/submissions/{id}/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifySubmissionRequest {
    pub status: String,
    pub feedback: Option<String>,
    pub new_due_date: Option<Timestamp>,
}

/// Query parameters for `GET /tasks/submissions`.
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub task_id: Option<DbId>,
    pub ambassador_id: Option<DbId>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks/{id}/submit
///
/// Record or overwrite the caller's proof for a task. The deadline check
/// uses the effective due date, so an ambassador in REDO with an extended
/// individual deadline may resubmit past the original task deadline.
pub async fn submit_task(
    State(state): State<AppState>,
    RequireAmbassador(ambassador): RequireAmbassador,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitTaskRequest>,
) -> AppResult<Json<TaskSubmission>> {
    // 1. The task must exist and the caller must be an assignee.
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;

    if !TaskRepo::is_assigned(&state.pool, id, ambassador.user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Task not assigned to you".into(),
        )));
    }

    // 2. Enforce the deadline in force for this pair.
    let existing =
        SubmissionRepo::find_by_task_and_ambassador(&state.pool, id, ambassador.user_id).await?;
    let effective_due = SubmissionView::from_option(existing).effective_due_date(task.due_date);

    if Utc::now() > effective_due {
        return Err(AppError::Core(CoreError::Validation(
            "Submission deadline has passed".into(),
        )));
    }

    // 3. Atomic upsert: insert on first submit, overwrite proof on resubmit.
    let proof = SubmitProof {
        content: input.content,
        links: input.links,
        proof_files: input.proof_files,
        responses: input.responses,
    };
    let submission =
        SubmissionRepo::upsert_proof(&state.pool, id, ambassador.user_id, &proof).await?;

    Ok(Json(submission))
}

/// GET /api/v1/tasks/my/all
///
/// Every task assigned to the caller, soonest deadline first, merged with
/// their own submission state (or the virtual PENDING).
pub async fn my_tasks(
    State(state): State<AppState>,
    RequireAmbassador(ambassador): RequireAmbassador,
) -> AppResult<Json<Vec<AssignedTask>>> {
    let tasks = TaskRepo::list_assigned_to(&state.pool, ambassador.user_id).await?;
    let submissions = SubmissionRepo::list_for_ambassador(&state.pool, ambassador.user_id).await?;

    let mut by_task: HashMap<DbId, TaskSubmission> = submissions
        .into_iter()
        .map(|submission| (submission.task_id, submission))
        .collect();

    let assigned = tasks
        .into_iter()
        .map(|task| {
            let view = SubmissionView::from_option(by_task.remove(&task.id));
            AssignedTask::build(task, view)
        })
        .collect();

    Ok(Json(assigned))
}

/// GET /api/v1/tasks/submissions
///
/// Admin listing of submissions with task and people context, optionally
/// filtered by task, ambassador, or status.
pub async fn list_submissions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListSubmissionsQuery>,
) -> AppResult<Json<Vec<SubmissionDetail>>> {
    if let Some(ref status) = params.status {
        validate_submission_status(status)?;
    }

    let filter = SubmissionFilter {
        task_id: params.task_id,
        ambassador_id: params.ambassador_id,
        status: params.status,
    };
    let submissions = SubmissionRepo::list_detail(&state.pool, &filter).await?;
    Ok(Json(submissions))
}

/// PATCH /api/v1/tasks/submissions/{id}/verify
///
/// Apply an admin review decision. The decision is validated before any
/// write; an invalid decision leaves the submission untouched. REDO must
/// carry the new individual deadline it grants.
pub async fn verify_submission(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<VerifySubmissionRequest>,
) -> AppResult<Json<SubmissionDetail>> {
    // 1. Gate on the decision vocabulary before touching the row.
    validate_verify_decision(&input.status)?;

    if input.status == STATUS_REDO && input.new_due_date.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "REDO requires a new due date".into(),
        )));
    }

    // 2. Apply the review. The individual deadline moves only on REDO; a
    //    stray new_due_date on other decisions is dropped here.
    let new_due_date = if input.status == STATUS_REDO {
        input.new_due_date
    } else {
        None
    };

    let review = ReviewUpdate {
        status: input.status.clone(),
        feedback: input.feedback.clone(),
        new_due_date,
        reviewed_by: admin.user_id,
    };

    let updated = SubmissionRepo::apply_review(&state.pool, id, &review)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))?;

    // 3. Re-read with display context for the response.
    let detail = SubmissionRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError("Submission vanished mid-verify".into()))?;

    // 4. Publish after the update committed. The dispatcher handles the
    //    notification row and, for REDO, the email.
    let event = PortalEvent::new(EVENT_SUBMISSION_VERIFIED)
        .with_source("submission", id)
        .with_actor(admin.user_id)
        .with_payload(json!({
            "submission_id": updated.id,
            "task_id": updated.task_id,
            "task_title": detail.task_title,
            "ambassador_id": updated.ambassador_id,
            "status": updated.status,
            "feedback": input.feedback,
            "new_due_date": new_due_date,
        }));
    state.event_bus.publish(event);

    Ok(Json(detail))
}
