//! Handler for the ambassador dashboard statistics endpoint.
//!
//! Every figure is derived on demand from the task/submission state; nothing
//! here is stored. The weekly window deliberately buckets tasks by their
//! original due date: an individual REDO deadline moves the submission
//! window but not the week a task belongs to.

use axum::extract::State;
use axum::Json;
use chrono::Local;
use nextif_core::stats::{completion_rate, global_rank, week_window, weekly_progress};
use nextif_core::submission::STATUS_SUBMITTED;
use nextif_core::types::DbId;
use nextif_db::repositories::StatsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAmbassador;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of `GET /ambassador/dashboard/stats`.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_assigned: i64,
    pub completed_count: i64,
    /// Submissions sitting in SUBMITTED, waiting for an admin.
    pub pending_review: i64,
    /// Rounded percentage of assigned tasks completed.
    pub completion_rate: i64,
    pub points_earned: i64,
    /// 1-based leaderboard position, formatted `"#N"`.
    pub global_rank: String,
    /// Mandatory + bonus percentage for the current week, capped at 200.
    pub weekly_progress: i64,
    pub mandatory_pending: i64,
    pub bonus_pending: i64,
}

/// GET /api/v1/ambassador/dashboard/stats
///
/// Aggregate the caller's dashboard figures. Any data access failure is a
/// 500; there are no partial stats.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    RequireAmbassador(ambassador): RequireAmbassador,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let pool = &state.pool;
    let ambassador_id = ambassador.user_id;

    // Lifetime figures.
    let total_assigned = StatsRepo::count_assigned(pool, ambassador_id).await?;
    let totals = StatsRepo::completed_totals(pool, ambassador_id).await?;
    let pending_review =
        StatsRepo::count_with_status(pool, ambassador_id, STATUS_SUBMITTED).await?;
    let completion_rate = completion_rate(totals.completed_count, total_assigned);

    // Leaderboard position across all ambassadors.
    let leaderboard = StatsRepo::leaderboard(pool).await?;
    let ranked_ids: Vec<DbId> = leaderboard.iter().map(|entry| entry.ambassador_id).collect();
    let rank = global_rank(&ranked_ids, ambassador_id);

    // This week's tasks, split mandatory/bonus by their original due dates.
    let (week_start, week_end) = week_window(Local::now());
    let week_tasks = StatsRepo::tasks_due_between(pool, ambassador_id, week_start, week_end).await?;

    let mandatory_ids: Vec<DbId> = week_tasks
        .iter()
        .filter(|row| !row.is_bonus)
        .map(|row| row.id)
        .collect();
    let bonus_ids: Vec<DbId> = week_tasks
        .iter()
        .filter(|row| row.is_bonus)
        .map(|row| row.id)
        .collect();

    let mandatory_completed = if mandatory_ids.is_empty() {
        0
    } else {
        StatsRepo::count_completed_among(pool, ambassador_id, &mandatory_ids).await?
    };
    let bonus_completed = if bonus_ids.is_empty() {
        0
    } else {
        StatsRepo::count_completed_among(pool, ambassador_id, &bonus_ids).await?
    };

    let weekly = weekly_progress(
        mandatory_ids.len() as i64,
        mandatory_completed,
        bonus_ids.len() as i64,
        bonus_completed,
    );

    let stats = DashboardStats {
        total_assigned,
        completed_count: totals.completed_count,
        pending_review,
        completion_rate,
        points_earned: totals.points_earned,
        global_rank: format!("#{rank}"),
        weekly_progress: weekly,
        mandatory_pending: mandatory_ids.len() as i64 - mandatory_completed,
        bonus_pending: bonus_ids.len() as i64 - bonus_completed,
    };

    Ok(Json(DataResponse { data: stats }))
}
