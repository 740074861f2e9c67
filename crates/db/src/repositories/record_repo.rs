//! Repository for the `completion_records` table (PRD-18).
//!
//! Every write is an upsert against the `(item_id, staff_id)` unique
//! constraint, so a pair can never accumulate duplicate rows no matter how
//! requests interleave. Follows the `ON CONFLICT ... DO UPDATE` pattern
//! established in `staff_repo.rs` / the upsert-returning convention.

use sqlx::PgPool;
use staffhub_core::progress as status;
use staffhub_core::types::DbId;

use crate::models::record::{
    CompletionRecordRow, SubmitDocument, TimelineEventRow, UpdateTrainingProgress,
};

/// Column list for `completion_records` queries.
const COLUMNS: &str = "\
    id, item_id, staff_id, status, completed_at, acknowledged_at, \
    score, watched_percentage, signature_url, form_data, \
    created_at, updated_at";

/// Provides upsert and query operations for completion records.
pub struct RecordRepo;

impl RecordRepo {
    /// Record a document submission for `(item, staff)`.
    ///
    /// Creates the record if this is the first interaction; otherwise moves
    /// it to `submitted` and stamps a fresh completion timestamp. Signature
    /// and form payloads overwrite only when provided.
    pub async fn upsert_submission(
        pool: &PgPool,
        item_id: DbId,
        staff_id: DbId,
        input: &SubmitDocument,
    ) -> Result<CompletionRecordRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO completion_records \
                 (item_id, staff_id, status, completed_at, signature_url, form_data) \
             VALUES ($1, $2, '{submitted}', NOW(), $3, $4) \
             ON CONFLICT (item_id, staff_id) DO UPDATE SET \
                 status = '{submitted}', \
                 completed_at = NOW(), \
                 signature_url = COALESCE(EXCLUDED.signature_url, completion_records.signature_url), \
                 form_data = COALESCE(EXCLUDED.form_data, completion_records.form_data), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}",
            submitted = status::STATUS_SUBMITTED,
        );
        sqlx::query_as::<_, CompletionRecordRow>(&query)
            .bind(item_id)
            .bind(staff_id)
            .bind(&input.signature_url)
            .bind(&input.form_data)
            .fetch_one(pool)
            .await
    }

    /// Record an acknowledgment for `(item, staff)`.
    ///
    /// Creates a pending record on first interaction; the status is left
    /// untouched otherwise.
    pub async fn upsert_acknowledgment(
        pool: &PgPool,
        item_id: DbId,
        staff_id: DbId,
    ) -> Result<CompletionRecordRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO completion_records (item_id, staff_id, status, acknowledged_at) \
             VALUES ($1, $2, '{pending}', NOW()) \
             ON CONFLICT (item_id, staff_id) DO UPDATE SET \
                 acknowledged_at = NOW(), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}",
            pending = status::STATUS_PENDING,
        );
        sqlx::query_as::<_, CompletionRecordRow>(&query)
            .bind(item_id)
            .bind(staff_id)
            .fetch_one(pool)
            .await
    }

    /// Record training progress for `(item, staff)`.
    ///
    /// Absent fields keep their stored values. Moving to `completed` stamps
    /// the completion timestamp once; it is never cleared by later updates.
    pub async fn upsert_progress(
        pool: &PgPool,
        item_id: DbId,
        staff_id: DbId,
        input: &UpdateTrainingProgress,
    ) -> Result<CompletionRecordRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO completion_records \
                 (item_id, staff_id, status, completed_at, score, watched_percentage) \
             VALUES ($1, $2, COALESCE($3, '{in_progress}'), \
                     CASE WHEN $3 = '{completed}' THEN NOW() END, $4, $5) \
             ON CONFLICT (item_id, staff_id) DO UPDATE SET \
                 status = COALESCE($3, completion_records.status), \
                 completed_at = CASE \
                     WHEN $3 = '{completed}' \
                         THEN COALESCE(completion_records.completed_at, NOW()) \
                     ELSE completion_records.completed_at \
                 END, \
                 score = COALESCE($4, completion_records.score), \
                 watched_percentage = COALESCE($5, completion_records.watched_percentage), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}",
            in_progress = status::STATUS_IN_PROGRESS,
            completed = status::STATUS_COMPLETED,
        );
        sqlx::query_as::<_, CompletionRecordRow>(&query)
            .bind(item_id)
            .bind(staff_id)
            .bind(&input.status)
            .bind(input.score)
            .bind(input.watched_percentage)
            .fetch_one(pool)
            .await
    }

    /// Mark an existing record as approved (HR review outcome).
    ///
    /// Returns `None` when the pair has no record yet; approval without a
    /// prior submission is a caller error surfaced as 404.
    pub async fn approve(
        pool: &PgPool,
        item_id: DbId,
        staff_id: DbId,
    ) -> Result<Option<CompletionRecordRow>, sqlx::Error> {
        let query = format!(
            "UPDATE completion_records SET \
                 status = '{approved}', \
                 updated_at = NOW() \
             WHERE item_id = $1 AND staff_id = $2 \
             RETURNING {COLUMNS}",
            approved = status::STATUS_APPROVED,
        );
        sqlx::query_as::<_, CompletionRecordRow>(&query)
            .bind(item_id)
            .bind(staff_id)
            .fetch_optional(pool)
            .await
    }

    /// All records for one staff member.
    pub async fn list_for_staff(
        pool: &PgPool,
        staff_id: DbId,
    ) -> Result<Vec<CompletionRecordRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM completion_records WHERE staff_id = $1 ORDER BY item_id"
        );
        sqlx::query_as::<_, CompletionRecordRow>(&query)
            .bind(staff_id)
            .fetch_all(pool)
            .await
    }

    /// All records across all staff (dashboard aggregation input).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CompletionRecordRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM completion_records ORDER BY id");
        sqlx::query_as::<_, CompletionRecordRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Remove the record for `(item, staff)` (admin removal of an
    /// assignment). Returns `true` when a row was actually removed.
    pub async fn delete(pool: &PgPool, item_id: DbId, staff_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM completion_records WHERE item_id = $1 AND staff_id = $2")
                .bind(item_id)
                .bind(staff_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recent document submissions as timeline events, newest first.
    ///
    /// Training completions read as `training_completed`; everything else
    /// reads as `document_submitted`.
    pub async fn list_recent_submissions(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TimelineEventRow>, sqlx::Error> {
        sqlx::query_as::<_, TimelineEventRow>(
            "SELECT r.id, \
                    CASE WHEN i.kind = $1 THEN $2 ELSE $3 END AS action, \
                    s.full_name AS actor_name, \
                    r.completed_at AS occurred_at \
             FROM completion_records r \
             JOIN staff s ON s.id = r.staff_id \
             LEFT JOIN assignable_items i ON i.id = r.item_id \
             WHERE r.completed_at IS NOT NULL \
             ORDER BY r.completed_at DESC \
             LIMIT $4",
        )
        .bind(status::KIND_TRAINING_ASSIGNMENT)
        .bind(staffhub_core::audit::action_types::TRAINING_COMPLETED)
        .bind(staffhub_core::audit::action_types::DOCUMENT_SUBMITTED)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Recent acknowledgments as timeline events, newest first.
    pub async fn list_recent_acknowledgments(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TimelineEventRow>, sqlx::Error> {
        sqlx::query_as::<_, TimelineEventRow>(
            "SELECT r.id, $1 AS action, \
                    s.full_name AS actor_name, \
                    r.acknowledged_at AS occurred_at \
             FROM completion_records r \
             JOIN staff s ON s.id = r.staff_id \
             WHERE r.acknowledged_at IS NOT NULL \
             ORDER BY r.acknowledged_at DESC \
             LIMIT $2",
        )
        .bind(staffhub_core::audit::action_types::DOCUMENT_ACKNOWLEDGED)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
