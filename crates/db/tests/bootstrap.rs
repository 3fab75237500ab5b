use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify the portal schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    nextif_db::health_check(&pool).await.unwrap();

    // Verify all portal tables exist
    let tables = [
        "admins",
        "ambassadors",
        "tasks",
        "task_assignees",
        "task_submissions",
        "notifications",
    ];

    for table in tables {
        let exists: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = '{table}'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} existence query failed: {e}"));
        assert!(exists.0, "table {table} should exist after migrations");
    }
}

/// Unique constraints the API relies on must keep the uq_ naming prefix.
///
/// The error classifier turns a 23505 on a `uq_`-prefixed constraint into a
/// 409 Conflict; a renamed constraint would silently degrade those responses
/// to 500s.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_keep_uq_prefix(pool: PgPool) {
    let constraints: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND constraint_type = 'UNIQUE'
         ORDER BY table_name, constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        !constraints.is_empty(),
        "Expected at least one UNIQUE constraint in the schema"
    );

    for (table, constraint) in &constraints {
        assert!(
            constraint.starts_with("uq_"),
            "UNIQUE constraint {constraint} on {table} should carry the uq_ prefix"
        );
    }

    // The submit upsert targets this constraint by column pair.
    let names: Vec<String> = constraints.iter().map(|(_, c)| c.clone()).collect();
    assert!(names.contains(&"uq_task_submissions_task_ambassador".to_string()));
    assert!(names.contains(&"uq_ambassadors_email".to_string()));
    assert!(names.contains(&"uq_admins_email".to_string()));
}

/// Re-running migrations against an up-to-date database is a no-op.
#[sqlx::test(migrations = "./migrations")]
async fn test_migrations_are_idempotent(pool: PgPool) {
    nextif_db::run_migrations(&pool).await.unwrap();
    nextif_db::health_check(&pool).await.unwrap();
}
