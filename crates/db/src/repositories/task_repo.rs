//! Repository for the `tasks` table and its assignment join table.

use sqlx::types::Json;
use sqlx::PgPool;

use nextif_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, explanation, task_type, verification_type, due_date, \
                        reward_points, is_bonus, requirements, what_to_do, materials, \
                        created_at, updated_at";

/// Provides CRUD operations for tasks and their assignee sets.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task and its assignee rows in one transaction, returning
    /// the created task.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tasks (title, explanation, task_type, verification_type, due_date,
                                reward_points, is_bonus, requirements, what_to_do, materials)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.explanation)
            .bind(&input.task_type)
            .bind(&input.verification_type)
            .bind(input.due_date)
            .bind(input.reward_points)
            .bind(input.is_bonus)
            .bind(&input.requirements)
            .bind(Json(&input.what_to_do))
            .bind(Json(&input.materials))
            .fetch_one(&mut *tx)
            .await?;

        for ambassador_id in &input.assigned_to {
            sqlx::query(
                "INSERT INTO task_assignees (task_id, ambassador_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(task.id)
            .bind(ambassador_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(task)
    }

    /// Find a task by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY created_at DESC");
        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    /// List the tasks assigned to one ambassador, soonest deadline first.
    pub async fn list_assigned_to(
        pool: &PgPool,
        ambassador_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             JOIN task_assignees ON task_assignees.task_id = tasks.id
             WHERE task_assignees.ambassador_id = $1
             ORDER BY due_date ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(ambassador_id)
            .fetch_all(pool)
            .await
    }

    /// The assignee ids for a task.
    pub async fn assignee_ids(pool: &PgPool, task_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT ambassador_id FROM task_assignees WHERE task_id = $1 ORDER BY ambassador_id",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// Whether an ambassador is assigned to a task.
    pub async fn is_assigned(
        pool: &PgPool,
        task_id: DbId,
        ambassador_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM task_assignees WHERE task_id = $1 AND ambassador_id = $2
             )",
        )
        .bind(task_id)
        .bind(ambassador_id)
        .fetch_one(pool)
        .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied; a
    /// present `assigned_to` replaces the whole assignee set in the same
    /// transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                explanation = COALESCE($3, explanation),
                task_type = COALESCE($4, task_type),
                verification_type = COALESCE($5, verification_type),
                due_date = COALESCE($6, due_date),
                reward_points = COALESCE($7, reward_points),
                is_bonus = COALESCE($8, is_bonus),
                requirements = COALESCE($9, requirements),
                what_to_do = COALESCE($10, what_to_do),
                materials = COALESCE($11, materials),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.explanation)
            .bind(&input.task_type)
            .bind(&input.verification_type)
            .bind(input.due_date)
            .bind(input.reward_points)
            .bind(input.is_bonus)
            .bind(&input.requirements)
            .bind(input.what_to_do.as_ref().map(Json))
            .bind(input.materials.as_ref().map(Json))
            .fetch_optional(&mut *tx)
            .await?;

        let task = match task {
            Some(task) => task,
            // Dropping the transaction rolls it back.
            None => return Ok(None),
        };

        if let Some(ref assignees) = input.assigned_to {
            sqlx::query("DELETE FROM task_assignees WHERE task_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for ambassador_id in assignees {
                sqlx::query(
                    "INSERT INTO task_assignees (task_id, ambassador_id)
                     VALUES ($1, $2)
                     ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(ambassador_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(task))
    }

    /// Delete a task. Assignment rows cascade; submissions referencing the
    /// task are kept as audit history.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
