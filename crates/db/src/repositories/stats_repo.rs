//! Aggregation queries behind the ambassador dashboard.
//!
//! The leaderboard joins submissions to their tasks, so submissions whose
//! task was deleted earn no points and drop out of the ranking; the
//! completed totals use a LEFT JOIN so those same submissions still count
//! as completed work.

use sqlx::FromRow;
use sqlx::PgPool;

use nextif_core::submission::STATUS_COMPLETED;
use nextif_core::types::{DbId, Timestamp};

/// Completed-work totals for one ambassador.
#[derive(Debug, Clone, FromRow)]
pub struct CompletedTotals {
    pub completed_count: i64,
    pub points_earned: i64,
}

/// One leaderboard row: an ambassador and their total earned points.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardEntry {
    pub ambassador_id: DbId,
    pub total_points: i64,
}

/// A task id with its bonus flag, for the weekly window partition.
#[derive(Debug, Clone, FromRow)]
pub struct WeeklyTaskRow {
    pub id: DbId,
    pub is_bonus: bool,
}

/// Read-only aggregation queries over submissions and assignments.
pub struct StatsRepo;

impl StatsRepo {
    /// Total number of tasks assigned to an ambassador.
    pub async fn count_assigned(pool: &PgPool, ambassador_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM task_assignees WHERE ambassador_id = $1",
        )
        .bind(ambassador_id)
        .fetch_one(pool)
        .await
    }

    /// Number of submissions in a given status for an ambassador.
    pub async fn count_with_status(
        pool: &PgPool,
        ambassador_id: DbId,
        status: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM task_submissions WHERE ambassador_id = $1 AND status = $2",
        )
        .bind(ambassador_id)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    /// Completed submission count and points earned for an ambassador.
    pub async fn completed_totals(
        pool: &PgPool,
        ambassador_id: DbId,
    ) -> Result<CompletedTotals, sqlx::Error> {
        sqlx::query_as::<_, CompletedTotals>(
            "SELECT
                 COUNT(s.id) AS completed_count,
                 COALESCE(SUM(t.reward_points), 0)::BIGINT AS points_earned
             FROM task_submissions s
             LEFT JOIN tasks t ON t.id = s.task_id
             WHERE s.ambassador_id = $1 AND s.status = $2",
        )
        .bind(ambassador_id)
        .bind(STATUS_COMPLETED)
        .fetch_one(pool)
        .await
    }

    /// The all-ambassador leaderboard: total points from completed
    /// submissions, highest first. Ordering among equal totals is whatever
    /// the aggregation yields; rank ties are not broken further.
    pub async fn leaderboard(pool: &PgPool) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT
                 s.ambassador_id,
                 COALESCE(SUM(t.reward_points), 0)::BIGINT AS total_points
             FROM task_submissions s
             JOIN tasks t ON t.id = s.task_id
             WHERE s.status = $1
             GROUP BY s.ambassador_id
             ORDER BY total_points DESC",
        )
        .bind(STATUS_COMPLETED)
        .fetch_all(pool)
        .await
    }

    /// The ambassador's assigned tasks whose original due date falls inside
    /// the window. Individual REDO deadlines deliberately do not move a task
    /// between weeks.
    pub async fn tasks_due_between(
        pool: &PgPool,
        ambassador_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<WeeklyTaskRow>, sqlx::Error> {
        sqlx::query_as::<_, WeeklyTaskRow>(
            "SELECT t.id, t.is_bonus
             FROM tasks t
             JOIN task_assignees ta ON ta.task_id = t.id
             WHERE ta.ambassador_id = $1 AND t.due_date >= $2 AND t.due_date <= $3",
        )
        .bind(ambassador_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// How many of the given tasks the ambassador has completed.
    pub async fn count_completed_among(
        pool: &PgPool,
        ambassador_id: DbId,
        task_ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM task_submissions
             WHERE ambassador_id = $1 AND status = $2 AND task_id = ANY($3)",
        )
        .bind(ambassador_id)
        .bind(STATUS_COMPLETED)
        .bind(task_ids)
        .fetch_one(pool)
        .await
    }
}
