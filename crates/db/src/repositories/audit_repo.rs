//! Repository for the `audit_log` table (PRD-33).

use sqlx::PgPool;
use staffhub_core::audit;

use crate::models::audit::{AuditEntry, NewAuditEntry};
use crate::models::record::TimelineEventRow;

/// Column list for `audit_log` queries.
const COLUMNS: &str = "\
    id, actor_id, action_type, entity_type, entity_id, \
    details, integrity_hash, created_at";

/// Provides append and query operations for the audit log.
///
/// The log is append-only: entries are never updated or deleted, and each
/// entry's integrity hash chains over the previous one.
pub struct AuditRepo;

impl AuditRepo {
    /// Append an audit entry.
    ///
    /// Sensitive detail fields are redacted before storage and the
    /// integrity hash is chained from the newest existing entry.
    pub async fn record(pool: &PgPool, entry: &NewAuditEntry) -> Result<AuditEntry, sqlx::Error> {
        let prev_hash: Option<String> =
            sqlx::query_scalar("SELECT integrity_hash FROM audit_log ORDER BY id DESC LIMIT 1")
                .fetch_optional(pool)
                .await?;

        let details = audit::redact_sensitive_fields(&entry.details);
        let entry_data = format!(
            "{}|{}|{}|{}",
            entry.action_type,
            entry.entity_type,
            entry.entity_id.map_or_else(String::new, |id| id.to_string()),
            details,
        );
        let integrity_hash = audit::compute_integrity_hash(prev_hash.as_deref(), &entry_data);

        let query = format!(
            "INSERT INTO audit_log \
                 (actor_id, action_type, entity_type, entity_id, details, integrity_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditEntry>(&query)
            .bind(entry.actor_id)
            .bind(&entry.action_type)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&details)
            .bind(&integrity_hash)
            .fetch_one(pool)
            .await
    }

    /// Most recent audit entries, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<AuditEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_log ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, AuditEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent audit entries as timeline events (actor name joined).
    pub async fn list_recent_events(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TimelineEventRow>, sqlx::Error> {
        sqlx::query_as::<_, TimelineEventRow>(
            "SELECT a.id, a.action_type AS action, \
                    s.full_name AS actor_name, \
                    a.created_at AS occurred_at \
             FROM audit_log a \
             LEFT JOIN staff s ON s.id = a.actor_id \
             ORDER BY a.created_at DESC, a.id DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
