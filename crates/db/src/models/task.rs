//! Task entity model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use nextif_core::task::{Material, WhatToDoItem};
use nextif_core::types::{DbId, Timestamp};

use crate::models::submission::{SubmissionView, TaskSubmission};

/// Full task row from the `tasks` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub explanation: String,
    pub task_type: String,
    pub verification_type: String,
    pub due_date: Timestamp,
    pub reward_points: i32,
    pub is_bonus: bool,
    pub requirements: Vec<String>,
    pub what_to_do: Json<Vec<WhatToDoItem>>,
    pub materials: Json<Vec<Material>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task together with its assignee ids, as returned by the admin-facing
/// task endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithAssignees {
    pub id: DbId,
    pub title: String,
    pub explanation: String,
    pub task_type: String,
    pub verification_type: String,
    pub due_date: Timestamp,
    pub reward_points: i32,
    pub is_bonus: bool,
    pub requirements: Vec<String>,
    pub what_to_do: Json<Vec<WhatToDoItem>>,
    pub materials: Json<Vec<Material>>,
    pub assigned_to: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskWithAssignees {
    pub fn build(task: Task, assigned_to: Vec<DbId>) -> Self {
        TaskWithAssignees {
            id: task.id,
            title: task.title,
            explanation: task.explanation,
            task_type: task.task_type,
            verification_type: task.verification_type,
            due_date: task.due_date,
            reward_points: task.reward_points,
            is_bonus: task.is_bonus,
            requirements: task.requirements,
            what_to_do: task.what_to_do,
            materials: task.materials,
            assigned_to,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// One entry of the ambassador "my tasks" view: the task, the caller's own
/// submission state, and the deadline actually in force for them.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedTask {
    pub id: DbId,
    pub title: String,
    pub explanation: String,
    pub task_type: String,
    pub verification_type: String,
    /// Effective due date for this ambassador (individual REDO deadline when
    /// one is in force, the task deadline otherwise).
    pub due_date: Timestamp,
    pub reward_points: i32,
    pub is_bonus: bool,
    pub requirements: Vec<String>,
    pub what_to_do: Json<Vec<WhatToDoItem>>,
    pub materials: Json<Vec<Material>>,
    /// Submission status, or the virtual `PENDING` when none exists.
    pub status: String,
    pub submission: Option<TaskSubmission>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssignedTask {
    /// Combine a task with the caller's submission view.
    pub fn build(task: Task, view: SubmissionView) -> Self {
        let status = view.status_label().to_string();
        let due_date = view.effective_due_date(task.due_date);
        AssignedTask {
            id: task.id,
            title: task.title,
            explanation: task.explanation,
            task_type: task.task_type,
            verification_type: task.verification_type,
            due_date,
            reward_points: task.reward_points,
            is_bonus: task.is_bonus,
            requirements: task.requirements,
            what_to_do: task.what_to_do,
            materials: task.materials,
            status,
            submission: view.into_recorded(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// DTO for creating a new task. Built by the handler after validation, with
/// what-to-do step ids already assigned.
#[derive(Debug)]
pub struct CreateTask {
    pub title: String,
    pub explanation: String,
    pub task_type: String,
    pub verification_type: String,
    pub due_date: Timestamp,
    pub reward_points: i32,
    pub is_bonus: bool,
    pub requirements: Vec<String>,
    pub what_to_do: Vec<WhatToDoItem>,
    pub materials: Vec<Material>,
    pub assigned_to: Vec<DbId>,
}

/// DTO for updating an existing task. All fields are optional; `assigned_to`
/// replaces the full assignee set when present. Built by the handler after
/// validation, with what-to-do ids already assigned.
#[derive(Debug)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub task_type: Option<String>,
    pub verification_type: Option<String>,
    pub due_date: Option<Timestamp>,
    pub reward_points: Option<i32>,
    pub is_bonus: Option<bool>,
    pub requirements: Option<Vec<String>>,
    pub what_to_do: Option<Vec<WhatToDoItem>>,
    pub materials: Option<Vec<Material>>,
    pub assigned_to: Option<Vec<DbId>>,
}
