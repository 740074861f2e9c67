//! Audit log entity model (PRD-33).

use serde::Serialize;
use sqlx::FromRow;
use staffhub_core::types::{DbId, Timestamp};

/// A row from the `audit_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditEntry {
    pub id: DbId,
    pub actor_id: Option<DbId>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    /// Structured details with sensitive fields already redacted.
    pub details: serde_json::Value,
    /// SHA-256 chain hash over the previous entry's hash and this entry's
    /// canonical content.
    pub integrity_hash: String,
    pub created_at: Timestamp,
}

/// Input for appending an audit log entry.
///
/// Built internally by handlers, never deserialized from requests. Details
/// are redacted and chained by the repository at insert time.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub actor_id: Option<DbId>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details: serde_json::Value,
}
