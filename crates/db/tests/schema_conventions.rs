//! Conventions the portal schema must hold to, checked against the live
//! catalog rather than by reading migration files.
//!
//! Pinned here: BIGSERIAL keys, TIMESTAMPTZ timestamps, TEXT over VARCHAR,
//! indexed foreign keys, and explicit CASCADE delete rules.

use sqlx::PgPool;

/// Run a catalog query and collect its rows, panicking on any failure.
async fn catalog<T>(pool: &PgPool, sql: &str) -> Vec<T>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    sqlx::query_as(sql).fetch_all(pool).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_primary_keys_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = catalog(
        &pool,
        "SELECT table_name, data_type FROM information_schema.columns
         WHERE column_name = 'id' AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'",
    )
    .await;

    assert!(!rows.is_empty(), "no id columns found at all");
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Exceptions: `task_assignees` is a pure join table with no row lifecycle
/// of its own, and `notifications` rows only ever flip `is_read`, so
/// neither carries `updated_at`.
#[sqlx::test(migrations = "./migrations")]
async fn test_timestamp_columns_are_timestamptz(pool: PgPool) {
    let tables: Vec<(String,)> = catalog(
        &pool,
        "SELECT table_name FROM information_schema.tables
         WHERE table_schema = 'public' AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'",
    )
    .await;

    for (table,) in &tables {
        if table == "task_assignees" {
            continue;
        }

        let mut required = vec!["created_at"];
        if table != "notifications" {
            required.push("updated_at");
        }

        for col in required {
            let found: Vec<(String,)> = catalog(
                &pool,
                &format!(
                    "SELECT data_type FROM information_schema.columns
                     WHERE table_schema = 'public'
                       AND table_name = '{table}' AND column_name = '{col}'"
                ),
            )
            .await;

            match found.first() {
                None => panic!("Table {table} is missing column {col}"),
                Some((data_type,)) => assert_eq!(
                    data_type, "timestamp with time zone",
                    "Table {table}.{col} should be timestamptz, got {data_type}"
                ),
            }
        }
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_text_over_varchar(pool: PgPool) {
    let offenders: Vec<(String, String)> = catalog(
        &pool,
        "SELECT table_name, column_name FROM information_schema.columns
         WHERE table_schema = 'public' AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'",
    )
    .await;

    assert!(
        offenders.is_empty(),
        "Found VARCHAR columns (should use TEXT): {offenders:?}"
    );
}

/// A covering index means the FK column is the leading column of some
/// index, composite or not.
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_keys_are_indexed(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = catalog(
        &pool,
        "SELECT DISTINCT tc.table_name, kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
           ON tc.constraint_name = kcu.constraint_name
          AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY' AND tc.table_schema = 'public'",
    )
    .await;

    assert!(!fk_columns.is_empty(), "schema should declare foreign keys");

    for (table, column) in &fk_columns {
        let covering: Vec<(String,)> = catalog(
            &pool,
            &format!(
                "SELECT indexname FROM pg_indexes
                 WHERE schemaname = 'public' AND tablename = '{table}'
                   AND (indexdef LIKE '%({column})%' OR indexdef LIKE '%({column},%')"
            ),
        )
        .await;

        assert!(
            !covering.is_empty(),
            "FK column {table}.{column} has no covering index"
        );
    }
}

/// Assignment rows cascade when a task or ambassador is removed; an
/// implicit NO ACTION default would block those deletions instead.
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_keys_cascade_on_delete(pool: PgPool) {
    let fk_rules: Vec<(String, String, String)> = catalog(
        &pool,
        "SELECT rc.constraint_name, tc.table_name, rc.delete_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
           ON rc.constraint_name = tc.constraint_name
          AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'",
    )
    .await;

    assert!(!fk_rules.is_empty(), "schema should declare foreign keys");

    for (constraint, table, delete_rule) in &fk_rules {
        assert_eq!(
            delete_rule, "CASCADE",
            "FK {constraint} on {table} should cascade deletes, got {delete_rule}"
        );
    }
}
