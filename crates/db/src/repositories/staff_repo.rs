//! Repository for the `staff` table (PRD-07).

use sqlx::PgPool;
use staffhub_core::types::DbId;

use crate::models::staff::{CreateStaff, Staff, UpdateStaff};

/// Column list for `staff` queries.
const COLUMNS: &str = "\
    id, full_name, email, department, job_title, \
    is_admin, is_active, created_at, updated_at";

/// Provides CRUD operations for staff members.
pub struct StaffRepo;

impl StaffRepo {
    /// Insert a new staff member.
    pub async fn create(pool: &PgPool, input: &CreateStaff) -> Result<Staff, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff (full_name, email, department, job_title, is_admin) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(&input.job_title)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Fetch one staff member by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List staff members, optionally restricted to active ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Staff>, sqlx::Error> {
        let query = if active_only {
            format!("SELECT {COLUMNS} FROM staff WHERE is_active ORDER BY full_name, id")
        } else {
            format!("SELECT {COLUMNS} FROM staff ORDER BY full_name, id")
        };
        sqlx::query_as::<_, Staff>(&query).fetch_all(pool).await
    }

    /// Partial update of a staff member.
    ///
    /// The SET clause is built dynamically from the fields present in the
    /// input; an empty input returns the current row unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStaff,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let mut set_clauses: Vec<String> = Vec::new();
        let mut param_idx: usize = 2; // $1 is id

        if input.full_name.is_some() {
            set_clauses.push(format!("full_name = ${param_idx}"));
            param_idx += 1;
        }
        if input.email.is_some() {
            set_clauses.push(format!("email = ${param_idx}"));
            param_idx += 1;
        }
        if input.department.is_some() {
            set_clauses.push(format!("department = ${param_idx}"));
            param_idx += 1;
        }
        if input.job_title.is_some() {
            set_clauses.push(format!("job_title = ${param_idx}"));
            param_idx += 1;
        }
        if input.is_admin.is_some() {
            set_clauses.push(format!("is_admin = ${param_idx}"));
            let _ = param_idx;
        }

        if set_clauses.is_empty() {
            return Self::get(pool, id).await;
        }

        let query = format!(
            "UPDATE staff SET {}, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, Staff>(&query).bind(id);
        if let Some(ref full_name) = input.full_name {
            q = q.bind(full_name);
        }
        if let Some(ref email) = input.email {
            q = q.bind(email);
        }
        if let Some(ref department) = input.department {
            q = q.bind(department);
        }
        if let Some(ref job_title) = input.job_title {
            q = q.bind(job_title);
        }
        if let Some(is_admin) = input.is_admin {
            q = q.bind(is_admin);
        }

        q.fetch_optional(pool).await
    }

    /// Soft-deactivate a staff member; their records are retained.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!(
            "UPDATE staff SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
