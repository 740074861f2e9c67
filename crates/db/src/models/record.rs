//! Completion record entity model and DTOs (PRD-18).
//!
//! One row per `(item, staff)` pair, created on first interaction and
//! updated in place on later status transitions. The unique constraint on
//! the pair makes every write an upsert.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffhub_core::progress::{CompletionRecord, CompletionStatus};
use staffhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `completion_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompletionRecordRow {
    pub id: DbId,
    pub item_id: DbId,
    pub staff_id: DbId,
    pub status: String,
    pub completed_at: Option<Timestamp>,
    pub acknowledged_at: Option<Timestamp>,
    pub score: Option<f64>,
    pub watched_percentage: Option<f64>,
    pub signature_url: Option<String>,
    pub form_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CompletionRecordRow {
    /// Convert to the domain type used by the progress aggregator.
    pub fn to_domain(&self) -> Result<CompletionRecord, String> {
        Ok(CompletionRecord {
            item_id: self.item_id,
            staff_id: self.staff_id,
            status: CompletionStatus::from_str_value(&self.status)?,
            completed_at: self.completed_at,
            acknowledged_at: self.acknowledged_at,
            score: self.score,
            watched_percentage: self.watched_percentage,
            signature_url: self.signature_url.clone(),
            form_data: self.form_data.clone(),
            updated_at: self.updated_at,
        })
    }
}

/// DTO for submitting an onboarding document.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitDocument {
    #[validate(url)]
    pub signature_url: Option<String>,
    pub form_data: Option<serde_json::Value>,
}

/// DTO for updating training progress.
///
/// All fields are optional; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrainingProgress {
    /// One of the known completion status strings; validated by the handler.
    pub status: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub watched_percentage: Option<f64>,
}

/// A timeline event row produced by the activity queries (audit entries,
/// submissions, acknowledgments joined with actor names).
#[derive(Debug, Clone, FromRow)]
pub struct TimelineEventRow {
    pub id: DbId,
    pub action: String,
    pub actor_name: Option<String>,
    pub occurred_at: Timestamp,
}

impl TimelineEventRow {
    /// Convert to the domain type consumed by the timeline merge.
    pub fn to_domain(&self) -> staffhub_core::activity::TimelineEvent {
        staffhub_core::activity::TimelineEvent {
            id: self.id,
            action: self.action.clone(),
            actor: self.actor_name.clone(),
            timestamp: self.occurred_at,
        }
    }
}
