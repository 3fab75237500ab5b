//! Repository for the `ambassadors` table.

use sqlx::PgPool;

use nextif_core::types::DbId;

use crate::models::ambassador::{Ambassador, AmbassadorFilter, CreateAmbassador};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, password_hash, account_status, \
                        university, phone, created_at, updated_at";

/// Provides CRUD operations for ambassadors.
pub struct AmbassadorRepo;

impl AmbassadorRepo {
    /// Insert a new ambassador, returning the created row. New accounts use
    /// the schema defaults (PRELOADED, no password hash).
    pub async fn create(
        pool: &PgPool,
        input: &CreateAmbassador,
    ) -> Result<Ambassador, sqlx::Error> {
        let query = format!(
            "INSERT INTO ambassadors (first_name, last_name, email, university, phone)
             VALUES ($1, $2, LOWER($3), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ambassador>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.university)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find an ambassador by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ambassador>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ambassadors WHERE id = $1");
        sqlx::query_as::<_, Ambassador>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an ambassador by email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Ambassador>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ambassadors WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Ambassador>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several ambassadors at once. Ids that do not resolve are simply
    /// absent from the result.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Ambassador>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ambassadors WHERE id = ANY($1)");
        sqlx::query_as::<_, Ambassador>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List ambassadors with optional status filter and name/email search,
    /// newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &AmbassadorFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ambassador>, sqlx::Error> {
        let (where_clause, bind_idx) = Self::filter_clause(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM ambassadors
             {where_clause}
             ORDER BY created_at DESC
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Ambassador>(&query);
        if let Some(ref status) = filter.account_status {
            q = q.bind(status);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{search}%"));
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count ambassadors matching the same filters as [`Self::list`].
    pub async fn count(pool: &PgPool, filter: &AmbassadorFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = Self::filter_clause(filter);

        let query = format!("SELECT COUNT(*) FROM ambassadors {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(ref status) = filter.account_status {
            q = q.bind(status);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{search}%"));
        }

        q.fetch_one(pool).await
    }

    /// Set an ambassador's account status. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn set_account_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Ambassador>, sqlx::Error> {
        let query = format!(
            "UPDATE ambassadors SET account_status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ambassador>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an ambassador. Assignment rows cascade; submissions are kept.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ambassadors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Build the WHERE clause for list/count and return it with the next
    /// free bind position.
    fn filter_clause(filter: &AmbassadorFilter) -> (String, u32) {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if filter.account_status.is_some() {
            conditions.push(format!("account_status = ${bind_idx}"));
            bind_idx += 1;
        }

        if filter.search.is_some() {
            conditions.push(format!(
                "(first_name ILIKE ${bind_idx} OR last_name ILIKE ${bind_idx} OR email ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, bind_idx)
    }
}
