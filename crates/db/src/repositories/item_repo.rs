//! Repository for the `assignable_items` table (PRD-11).

use sqlx::PgPool;
use staffhub_core::types::DbId;

use crate::models::item::{AssignableItemRow, CreateItem, UpdateItem};

/// Column list for `assignable_items` queries.
const COLUMNS: &str = "\
    id, kind, title, description, is_required, \
    created_by, created_at, updated_at";

/// Provides CRUD operations for assignable items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new assignable item.
    pub async fn create(
        pool: &PgPool,
        input: &CreateItem,
    ) -> Result<AssignableItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignable_items (kind, title, description, is_required, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignableItemRow>(&query)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_required)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Fetch one item by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<AssignableItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignable_items WHERE id = $1");
        sqlx::query_as::<_, AssignableItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items, optionally restricted by kind.
    pub async fn list(
        pool: &PgPool,
        kind: Option<&str>,
    ) -> Result<Vec<AssignableItemRow>, sqlx::Error> {
        match kind {
            Some(kind) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM assignable_items WHERE kind = $1 ORDER BY id"
                );
                sqlx::query_as::<_, AssignableItemRow>(&query)
                    .bind(kind)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM assignable_items ORDER BY id");
                sqlx::query_as::<_, AssignableItemRow>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Partial update of an item. The kind is fixed at creation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<AssignableItemRow>, sqlx::Error> {
        let mut set_clauses: Vec<String> = Vec::new();
        let mut param_idx: usize = 2; // $1 is id

        if input.title.is_some() {
            set_clauses.push(format!("title = ${param_idx}"));
            param_idx += 1;
        }
        if input.description.is_some() {
            set_clauses.push(format!("description = ${param_idx}"));
            param_idx += 1;
        }
        if input.is_required.is_some() {
            set_clauses.push(format!("is_required = ${param_idx}"));
            let _ = param_idx;
        }

        if set_clauses.is_empty() {
            return Self::get(pool, id).await;
        }

        let query = format!(
            "UPDATE assignable_items SET {}, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, AssignableItemRow>(&query).bind(id);
        if let Some(ref title) = input.title {
            q = q.bind(title);
        }
        if let Some(ref description) = input.description {
            q = q.bind(description);
        }
        if let Some(is_required) = input.is_required {
            q = q.bind(is_required);
        }

        q.fetch_optional(pool).await
    }

    /// Delete an item. Completion records cascade with it.
    ///
    /// Returns `true` when a row was actually removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assignable_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
