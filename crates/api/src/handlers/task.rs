//! Handlers for the admin-facing task registry (`/tasks` CRUD).
//!
//! The submit/verify surface lives in [`super::submission`]; this module
//! covers creating, listing, fetching, updating, and deleting tasks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nextif_core::error::CoreError;
use nextif_core::roles::ROLE_ADMIN;
use nextif_core::task::{self, Material, WhatToDoInput, WhatToDoItem};
use nextif_core::types::{DbId, Timestamp};
use nextif_db::models::submission::SubmissionView;
use nextif_db::models::task::{AssignedTask, CreateTask, Task, TaskWithAssignees, UpdateTask};
use nextif_db::repositories::{AmbassadorRepo, SubmissionRepo, TaskRepo};
use nextif_events::{PortalEvent, EVENT_TASK_ASSIGNED};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub explanation: String,
    pub task_type: String,
    pub verification_type: String,
    pub due_date: Timestamp,
    pub reward_points: i32,
    #[serde(default)]
    pub is_bonus: bool,
    pub requirements: Vec<String>,
    #[serde(default)]
    pub what_to_do: Vec<WhatToDoInput>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub assigned_to: Vec<DbId>,
}

/// Request body for `PATCH /tasks/{id}`. Absent fields keep their stored
/// values; a present `assigned_to` replaces the whole assignee set.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub task_type: Option<String>,
    pub verification_type: Option<String>,
    pub due_date: Option<Timestamp>,
    pub reward_points: Option<i32>,
    pub is_bonus: Option<bool>,
    pub requirements: Option<Vec<String>>,
    pub what_to_do: Option<Vec<WhatToDoInput>>,
    pub materials: Option<Vec<Material>>,
    pub assigned_to: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks
///
/// Create a task with optional what-to-do steps, materials, and assignees.
/// Publishes a `task.assigned` event after commit when assignees were given.
pub async fn create_task(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskWithAssignees>)> {
    // 1. Validate every field before touching the database.
    task::validate_title(&input.title)?;
    task::validate_explanation(&input.explanation)?;
    task::validate_task_type(&input.task_type)?;
    task::validate_verification_type(&input.verification_type)?;
    task::validate_reward_points(input.reward_points)?;
    task::validate_requirements(&input.requirements)?;
    task::validate_materials(&input.materials)?;

    // 2. Every listed assignee must exist.
    ensure_assignees_exist(&state, &input.assigned_to).await?;

    // 3. Assign step ids and insert task + assignee rows in one transaction.
    let what_to_do: Vec<WhatToDoItem> =
        input.what_to_do.into_iter().map(WhatToDoInput::into_item).collect();

    let create = CreateTask {
        title: input.title,
        explanation: input.explanation,
        task_type: input.task_type,
        verification_type: input.verification_type,
        due_date: input.due_date,
        reward_points: input.reward_points,
        is_bonus: input.is_bonus,
        requirements: input.requirements,
        what_to_do,
        materials: input.materials,
        assigned_to: input.assigned_to,
    };
    let created = TaskRepo::create(&state.pool, &create).await?;

    // 4. Publish the assignment event only after the transaction committed,
    //    so the dispatcher never emails about a task that rolled back.
    if !create.assigned_to.is_empty() {
        let event = PortalEvent::new(EVENT_TASK_ASSIGNED)
            .with_source("task", created.id)
            .with_actor(admin.user_id)
            .with_payload(json!({
                "task_id": created.id,
                "title": created.title,
                "due_date": created.due_date,
                "assignee_ids": create.assigned_to,
            }));
        state.event_bus.publish(event);
    }

    let response = TaskWithAssignees::build(created, create.assigned_to);
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/tasks
///
/// List all tasks, newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list(&state.pool).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
///
/// Role-branched detail view: admins get the task with its assignee list;
/// ambassadors must be assigned and get the task merged with their own
/// submission state and effective deadline.
pub async fn get_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;

    if user.role == ROLE_ADMIN {
        let assigned_to = TaskRepo::assignee_ids(&state.pool, id).await?;
        return Ok(Json(TaskWithAssignees::build(task, assigned_to)).into_response());
    }

    // Ambassadors only see tasks assigned to them.
    if !TaskRepo::is_assigned(&state.pool, id, user.user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Task not assigned to you".into(),
        )));
    }

    let submission =
        SubmissionRepo::find_by_task_and_ambassador(&state.pool, id, user.user_id).await?;
    let view = SubmissionView::from_option(submission);
    Ok(Json(AssignedTask::build(task, view)).into_response())
}

/// PATCH /api/v1/tasks/{id}
///
/// Partial update; validates only the provided fields.
pub async fn update_task(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<TaskWithAssignees>> {
    // 1. Validate whatever was provided.
    if let Some(ref title) = input.title {
        task::validate_title(title)?;
    }
    if let Some(ref explanation) = input.explanation {
        task::validate_explanation(explanation)?;
    }
    if let Some(ref task_type) = input.task_type {
        task::validate_task_type(task_type)?;
    }
    if let Some(ref verification_type) = input.verification_type {
        task::validate_verification_type(verification_type)?;
    }
    if let Some(reward_points) = input.reward_points {
        task::validate_reward_points(reward_points)?;
    }
    if let Some(ref requirements) = input.requirements {
        task::validate_requirements(requirements)?;
    }
    if let Some(ref materials) = input.materials {
        task::validate_materials(materials)?;
    }
    if let Some(ref assigned_to) = input.assigned_to {
        ensure_assignees_exist(&state, assigned_to).await?;
    }

    // 2. Replacement steps get fresh ids; answers keyed to the old ids are
    //    orphaned, same as replacing the steps themselves.
    let update = UpdateTask {
        title: input.title,
        explanation: input.explanation,
        task_type: input.task_type,
        verification_type: input.verification_type,
        due_date: input.due_date,
        reward_points: input.reward_points,
        is_bonus: input.is_bonus,
        requirements: input.requirements,
        what_to_do: input
            .what_to_do
            .map(|steps| steps.into_iter().map(WhatToDoInput::into_item).collect()),
        materials: input.materials,
        assigned_to: input.assigned_to,
    };

    let updated = TaskRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;

    let assigned_to = TaskRepo::assignee_ids(&state.pool, id).await?;
    Ok(Json(TaskWithAssignees::build(updated, assigned_to)))
}

/// DELETE /api/v1/tasks/{id}
///
/// Remove the task and its assignment rows. Submissions are kept as audit
/// history. Returns 204 No Content.
pub async fn delete_task(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject assignee lists naming ambassadors that do not exist.
async fn ensure_assignees_exist(state: &AppState, assignee_ids: &[DbId]) -> AppResult<()> {
    if assignee_ids.is_empty() {
        return Ok(());
    }
    // Repeated ids are legal input; count distinct ones against the lookup.
    let mut unique: Vec<DbId> = assignee_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let found = AmbassadorRepo::find_by_ids(&state.pool, &unique).await?;
    if found.len() != unique.len() {
        return Err(AppError::Core(CoreError::Validation(
            "One or more assigned ambassadors do not exist".into(),
        )));
    }
    Ok(())
}
