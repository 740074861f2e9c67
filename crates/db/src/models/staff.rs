//! Staff member entity model and DTOs (PRD-07).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `staff` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Staff {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a staff member.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaff {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub department: Option<String>,
    pub job_title: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// DTO for partially updating a staff member.
///
/// All fields are optional; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStaff {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub is_admin: Option<bool>,
}
