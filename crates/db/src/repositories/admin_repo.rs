//! Repository for the `admins` table.

use sqlx::PgPool;

use nextif_core::types::DbId;

use crate::models::admin::Admin;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, title, email, password_hash, created_at, updated_at";

/// Provides lookup operations for admins. Accounts are provisioned through
/// operational seeding, so there is no create path here.
pub struct AdminRepo;

impl AdminRepo {
    /// Find an admin by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
