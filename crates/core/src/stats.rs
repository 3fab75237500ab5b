//! Dashboard statistics math.
//!
//! Pure computations behind the ambassador dashboard: completion rate,
//! the server-local weekly window, weekly progress, and leaderboard rank.
//! Data access stays in the DB layer; these functions only do arithmetic
//! so they are unit-testable without a database.

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::types::{DbId, Timestamp};

/// Ceiling for the weekly progress percentage. Mandatory and bonus tracks
/// each contribute up to 100, so the raw sum is bounded at 200.
pub const WEEKLY_PROGRESS_CAP: i64 = 200;

/// Completion rate as a rounded percentage. Zero assigned tasks yield zero
/// rather than a division error.
pub fn completion_rate(completed: i64, total_assigned: i64) -> i64 {
    if total_assigned == 0 {
        return 0;
    }
    ((completed as f64 / total_assigned as f64) * 100.0).round() as i64
}

/// Weekly progress percentage over the tasks due in the current week.
///
/// Mandatory tasks set the base percentage; bonus tasks add their own
/// percentage on top when mandatory tasks exist, or stand alone when none
/// do. Rounded, then capped at [`WEEKLY_PROGRESS_CAP`].
pub fn weekly_progress(
    mandatory_total: i64,
    mandatory_completed: i64,
    bonus_total: i64,
    bonus_completed: i64,
) -> i64 {
    let mut progress = 0.0;

    if mandatory_total > 0 {
        progress = mandatory_completed as f64 / mandatory_total as f64 * 100.0;
        if bonus_total > 0 {
            progress += bonus_completed as f64 / bonus_total as f64 * 100.0;
        }
    } else if bonus_total > 0 {
        progress = bonus_completed as f64 / bonus_total as f64 * 100.0;
    }

    (progress.round() as i64).min(WEEKLY_PROGRESS_CAP)
}

/// The current week window in server-local time, returned as UTC bounds for
/// timestamptz comparison: most recent Sunday 00:00:00.000 through the
/// following Saturday 23:59:59.999.
pub fn week_window(now: DateTime<Local>) -> (Timestamp, Timestamp) {
    let days_from_sunday = now.weekday().num_days_from_sunday() as i64;
    let sunday = now.date_naive() - Duration::days(days_from_sunday);

    let start = sunday.and_time(NaiveTime::MIN);
    let end = start + Duration::days(7) - Duration::milliseconds(1);

    (local_to_utc(start), local_to_utc(end))
}

/// 1-based leaderboard position. Ambassadors absent from the ranking (no
/// completed submissions yet) rank directly after it.
pub fn global_rank(ranked_ids: &[DbId], ambassador_id: DbId) -> usize {
    ranked_ids
        .iter()
        .position(|id| *id == ambassador_id)
        .map(|idx| idx + 1)
        .unwrap_or(ranked_ids.len() + 1)
}

/// Resolve a local wall-clock time to UTC. DST transitions make some local
/// times ambiguous (resolved to the earlier instant) or nonexistent
/// (resolved by reading the naive value as UTC).
fn local_to_utc(naive: NaiveDateTime) -> Timestamp {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    #[test]
    fn test_completion_rate_zero_assigned() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(5, 0), 0);
    }

    #[test]
    fn test_completion_rate_rounds() {
        assert_eq!(completion_rate(1, 2), 50);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(1, 8), 13); // 12.5 rounds up
        assert_eq!(completion_rate(4, 4), 100);
    }

    #[test]
    fn test_weekly_progress_mandatory_and_bonus() {
        // 1 of 2 mandatory + 2 of 2 bonus = 50 + 100.
        assert_eq!(weekly_progress(2, 1, 2, 2), 150);
    }

    #[test]
    fn test_weekly_progress_empty_week() {
        assert_eq!(weekly_progress(0, 0, 0, 0), 0);
    }

    #[test]
    fn test_weekly_progress_capped() {
        // 3 of 3 mandatory + 5 of 5 bonus would be 200 exactly.
        assert_eq!(weekly_progress(3, 3, 5, 5), 200);
        assert_eq!(weekly_progress(1, 1, 1, 1), 200);
    }

    #[test]
    fn test_weekly_progress_bonus_only() {
        assert_eq!(weekly_progress(0, 0, 2, 1), 50);
        assert_eq!(weekly_progress(0, 0, 4, 4), 100);
    }

    #[test]
    fn test_weekly_progress_mandatory_only() {
        assert_eq!(weekly_progress(2, 1, 0, 0), 50);
        assert_eq!(weekly_progress(3, 0, 0, 0), 0);
    }

    #[test]
    fn test_weekly_progress_rounds_sum() {
        // 2/3 + 2/3 = 133.33..., rounded down to 133.
        assert_eq!(weekly_progress(3, 2, 3, 2), 133);
    }

    #[test]
    fn test_week_window_starts_on_sunday() {
        let now = Local.with_ymd_and_hms(2025, 1, 15, 12, 30, 0).unwrap();
        let (start, end) = week_window(now);

        assert_eq!(start.with_timezone(&Local).weekday(), Weekday::Sun);
        assert_eq!(
            end - start,
            Duration::days(7) - Duration::milliseconds(1)
        );
    }

    #[test]
    fn test_week_window_contains_now() {
        let now = Local.with_ymd_and_hms(2025, 6, 3, 8, 0, 0).unwrap();
        let (start, end) = week_window(now);
        let now_utc = now.with_timezone(&Utc);

        assert!(start <= now_utc);
        assert!(now_utc <= end);
    }

    #[test]
    fn test_week_window_on_sunday_is_same_day() {
        // 2025-01-05 is a Sunday.
        let now = Local.with_ymd_and_hms(2025, 1, 5, 0, 0, 1).unwrap();
        let (start, _) = week_window(now);

        assert_eq!(start.with_timezone(&Local).date_naive(), now.date_naive());
    }

    #[test]
    fn test_global_rank_positions() {
        let ranked = vec![7, 3, 9];
        assert_eq!(global_rank(&ranked, 7), 1);
        assert_eq!(global_rank(&ranked, 3), 2);
        assert_eq!(global_rank(&ranked, 9), 3);
    }

    #[test]
    fn test_global_rank_absent_ranks_after_board() {
        let ranked = vec![7, 3, 9];
        assert_eq!(global_rank(&ranked, 42), 4);
        assert_eq!(global_rank(&[], 42), 1);
    }
}
