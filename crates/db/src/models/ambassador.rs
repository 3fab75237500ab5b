//! Ambassador entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nextif_core::types::{DbId, Timestamp};

/// Full ambassador row from the `ambassadors` table.
///
/// Contains the password hash -- never serialize this to API responses
/// directly. Use [`AmbassadorResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Ambassador {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub account_status: String,
    pub university: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe ambassador representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AmbassadorResponse {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_status: String,
    pub university: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
}

impl From<&Ambassador> for AmbassadorResponse {
    fn from(row: &Ambassador) -> Self {
        AmbassadorResponse {
            id: row.id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            account_status: row.account_status.clone(),
            university: row.university.clone(),
            phone: row.phone.clone(),
            created_at: row.created_at,
        }
    }
}

/// DTO for creating a new ambassador. Accounts start PRELOADED with no
/// password hash.
#[derive(Debug, Deserialize)]
pub struct CreateAmbassador {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: Option<String>,
    pub phone: Option<String>,
}

/// Filters for the admin-facing ambassador listing.
#[derive(Debug, Default)]
pub struct AmbassadorFilter {
    pub account_status: Option<String>,
    /// Case-insensitive match against first name, last name, or email.
    pub search: Option<String>,
}
