//! HTTP-level integration tests for the submission workflow: submit,
//! resubmit, admin review decisions, and the REDO deadline override.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    admin_token, ambassador_token, body_json, get_auth, patch_json_auth, post_json_auth,
    seed_admin, seed_ambassador,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a task assigned to the given ambassadors, due one week out.
/// Returns the task id.
async fn seed_task(pool: &PgPool, admin_id: i64, assigned_to: Vec<i64>) -> i64 {
    let body = serde_json::json!({
        "title": "Campus Poster Drive",
        "explanation": "Hang posters across the main campus buildings.",
        "task_type": "WEEKLY",
        "verification_type": "ADMIN",
        "due_date": (Utc::now() + Duration::days(7)).to_rfc3339(),
        "reward_points": 50,
        "requirements": ["FILE"],
        "assigned_to": assigned_to
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/tasks", body, &admin_token(admin_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Move a task's deadline into the past, bypassing the API.
async fn expire_task(pool: &PgPool, task_id: i64) {
    sqlx::query("UPDATE tasks SET due_date = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(task_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Submit proof for a task as the given ambassador and return the response.
async fn submit(
    pool: &PgPool,
    task_id: i64,
    ambassador_id: i64,
    content: &str,
) -> axum::http::Response<axum::body::Body> {
    let body = serde_json::json!({
        "content": content,
        "links": ["https://instagram.com/p/abc123"],
        "proof_files": ["uploads/poster-1.jpg"]
    });
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/tasks/{task_id}/submit"),
        body,
        &ambassador_token(ambassador_id),
    )
    .await
}

/// Count stored submission rows for a task.
async fn submission_count(pool: &PgPool, task_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM task_submissions WHERE task_id = $1")
        .bind(task_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// A first submit creates the row and auto-completes it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_auto_completes(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let response = submit(&pool, task_id, ambassador.id, "Posters up in all buildings").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["content"], "Posters up in all buildings");
    assert!(json["submitted_at"].is_string());
    assert!(json["individual_due_date"].is_null());
}

/// Resubmitting overwrites the proof in place; there is exactly one row per
/// (task, ambassador) pair, no history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_resubmit_overwrites_single_row(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let first = submit(&pool, task_id, ambassador.id, "First attempt").await;
    let first_id = body_json(first).await["id"].as_i64().unwrap();

    let second = submit(&pool, task_id, ambassador.id, "Second attempt").await;
    let json = body_json(second).await;

    assert_eq!(json["id"].as_i64().unwrap(), first_id);
    assert_eq!(json["content"], "Second attempt");
    assert_eq!(submission_count(&pool, task_id).await, 1);
}

/// Only assignees may submit.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_requires_assignment(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let assigned = seed_ambassador(&pool, "amina@uni.example").await;
    let outsider = seed_ambassador(&pool, "noor@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![assigned.id]).await;

    let response = submit(&pool, task_id, outsider.id, "Not my task").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Task not assigned to you");
}

/// Submitting after the deadline is refused and leaves no row behind.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_after_deadline(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;
    expire_task(&pool, task_id).await;

    let response = submit(&pool, task_id, ambassador.id, "Too late").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Submission deadline has passed");
    assert_eq!(submission_count(&pool, task_id).await, 0);
}

/// Submitting to a nonexistent task returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_task_not_found(pool: PgPool) {
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;

    let response = submit(&pool, 9999, ambassador.id, "Ghost task").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Review decisions
// ---------------------------------------------------------------------------

/// Rejecting a submission records the decision, the feedback, and the
/// reviewer.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_rejected(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let submitted = submit(&pool, task_id, ambassador.id, "Blurry photos").await;
    let submission_id = body_json(submitted).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{submission_id}/verify"),
        serde_json::json!({ "status": "REJECTED", "feedback": "Photos are too blurry." }),
        &admin_token(admin_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "REJECTED");
    assert_eq!(json["admin_feedback"], "Photos are too blurry.");
    assert_eq!(json["reviewed_by"].as_i64().unwrap(), admin_id);
    assert!(json["reviewed_at"].is_string());
    // The detail view carries display context for the review queue.
    assert_eq!(json["task_title"], "Campus Poster Drive");
    assert_eq!(json["ambassador_email"], "amina@uni.example");
}

/// A decision outside the vocabulary is refused and the row is untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_invalid_decision_leaves_row_unchanged(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let submitted = submit(&pool, task_id, ambassador.id, "Proof").await;
    let submission_id = body_json(submitted).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{submission_id}/verify"),
        serde_json::json!({ "status": "APPROVED" }),
        &admin_token(admin_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid status. Use COMPLETED, REJECTED, or REDO.");

    let status: String =
        sqlx::query_scalar("SELECT status FROM task_submissions WHERE id = $1")
            .bind(submission_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "COMPLETED");
}

/// Verifying a nonexistent submission returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_submission_not_found(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let app = common::build_test_app(pool);

    let response = patch_json_auth(
        app,
        "/api/v1/tasks/submissions/9999/verify",
        serde_json::json!({ "status": "COMPLETED" }),
        &admin_token(admin_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Submission with id 9999 not found");
}

// ---------------------------------------------------------------------------
// REDO and the individual deadline override
// ---------------------------------------------------------------------------

/// REDO without a new due date is refused before any write.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_redo_requires_new_due_date(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let submitted = submit(&pool, task_id, ambassador.id, "Proof").await;
    let submission_id = body_json(submitted).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{submission_id}/verify"),
        serde_json::json!({ "status": "REDO", "feedback": "Retake the photos." }),
        &admin_token(admin_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "REDO requires a new due date");
}

/// The REDO override lets its holder resubmit past the original deadline;
/// resubmission flips the status back to COMPLETED.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_redo_extends_deadline_for_holder(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let submitted = submit(&pool, task_id, ambassador.id, "First attempt").await;
    let submission_id = body_json(submitted).await["id"].as_i64().unwrap();

    // Send it back with two more weeks.
    let new_due = (Utc::now() + Duration::days(14)).to_rfc3339();
    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{submission_id}/verify"),
        serde_json::json!({
            "status": "REDO",
            "feedback": "Retake the photos.",
            "new_due_date": new_due
        }),
        &admin_token(admin_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "REDO");
    assert!(json["individual_due_date"].is_string());

    // The original task deadline passes.
    expire_task(&pool, task_id).await;

    // The holder's individual deadline is still in force.
    let response = submit(&pool, task_id, ambassador.id, "Second attempt").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["content"], "Second attempt");
}

/// The override is individual: another assignee of the same task is still
/// held to the original deadline.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_redo_override_is_per_ambassador(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let amina = seed_ambassador(&pool, "amina@uni.example").await;
    let noor = seed_ambassador(&pool, "noor@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![amina.id, noor.id]).await;

    let submitted = submit(&pool, task_id, amina.id, "First attempt").await;
    let submission_id = body_json(submitted).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{submission_id}/verify"),
        serde_json::json!({
            "status": "REDO",
            "new_due_date": (Utc::now() + Duration::days(14)).to_rfc3339()
        }),
        &admin_token(admin_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    expire_task(&pool, task_id).await;

    // Amina resubmits under her extension; Noor is out of time.
    let response = submit(&pool, task_id, amina.id, "Second attempt").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = submit(&pool, task_id, noor.id, "First attempt").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Submission deadline has passed");
}

/// A new_due_date on a non-REDO decision is ignored rather than stored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_new_due_date_ignored_outside_redo(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let ambassador = seed_ambassador(&pool, "amina@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![ambassador.id]).await;

    let submitted = submit(&pool, task_id, ambassador.id, "Proof").await;
    let submission_id = body_json(submitted).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{submission_id}/verify"),
        serde_json::json!({
            "status": "COMPLETED",
            "new_due_date": (Utc::now() + Duration::days(30)).to_rfc3339()
        }),
        &admin_token(admin_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "COMPLETED");
    assert!(json["individual_due_date"].is_null());
}

// ---------------------------------------------------------------------------
// Admin listing
// ---------------------------------------------------------------------------

/// The submissions listing supports status filtering and carries context.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_submissions_with_filter(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let amina = seed_ambassador(&pool, "amina@uni.example").await;
    let noor = seed_ambassador(&pool, "noor@uni.example").await;
    let task_id = seed_task(&pool, admin_id, vec![amina.id, noor.id]).await;

    let submitted = submit(&pool, task_id, amina.id, "Amina's proof").await;
    let amina_submission = body_json(submitted).await["id"].as_i64().unwrap();
    submit(&pool, task_id, noor.id, "Noor's proof").await;

    // Send Amina's back so the two rows have different statuses.
    let app = common::build_test_app(pool.clone());
    patch_json_auth(
        app,
        &format!("/api/v1/tasks/submissions/{amina_submission}/verify"),
        serde_json::json!({
            "status": "REDO",
            "new_due_date": (Utc::now() + Duration::days(14)).to_rfc3339()
        }),
        &admin_token(admin_id),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/tasks/submissions", &admin_token(admin_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/tasks/submissions?status=REDO",
        &admin_token(admin_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["ambassador_email"], "amina@uni.example");
}

/// An out-of-vocabulary status filter is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_submissions_invalid_status_filter(pool: PgPool) {
    let (admin_id, _) = seed_admin(&pool, "dana@nextif.org").await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        "/api/v1/tasks/submissions?status=WRONG",
        &admin_token(admin_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
