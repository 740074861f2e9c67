//! Onboarding and training progress aggregation (PRD-14).
//!
//! Provides the item/status vocabulary and the pure evaluation logic for
//! per-staff completion progress and organization-wide rates. The `core`
//! crate contains no database dependencies; all item and record data is
//! pre-loaded and passed in by the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Item kind strings as stored in `assignable_items.kind`.
pub const KIND_ONBOARDING_DOCUMENT: &str = "onboarding_document";
pub const KIND_TRAINING_ASSIGNMENT: &str = "training_assignment";

/// All valid item kind strings.
pub const VALID_ITEM_KINDS: &[&str] = &[KIND_ONBOARDING_DOCUMENT, KIND_TRAINING_ASSIGNMENT];

/// Completion status strings as stored in `completion_records.status`.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_EXPIRED: &str = "expired";

/// All valid completion status strings.
pub const VALID_COMPLETION_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_SUBMITTED,
    STATUS_APPROVED,
    STATUS_COMPLETED,
    STATUS_IN_PROGRESS,
    STATUS_EXPIRED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The kind of work an assignable item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    OnboardingDocument,
    TrainingAssignment,
}

impl ItemKind {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_ONBOARDING_DOCUMENT => Ok(Self::OnboardingDocument),
            KIND_TRAINING_ASSIGNMENT => Ok(Self::TrainingAssignment),
            _ => Err(format!(
                "Invalid item kind '{s}'. Must be one of: {}",
                VALID_ITEM_KINDS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnboardingDocument => KIND_ONBOARDING_DOCUMENT,
            Self::TrainingAssignment => KIND_TRAINING_ASSIGNMENT,
        }
    }
}

/// A staff member's status on one assignable item.
///
/// A record's existence means the staff member has interacted with the item
/// at least once; the absence of a record reads as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Pending,
    Submitted,
    Approved,
    Completed,
    InProgress,
    Expired,
}

impl CompletionStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_SUBMITTED => Ok(Self::Submitted),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_EXPIRED => Ok(Self::Expired),
            _ => Err(format!(
                "Invalid completion status '{s}'. Must be one of: {}",
                VALID_COMPLETION_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Submitted => STATUS_SUBMITTED,
            Self::Approved => STATUS_APPROVED,
            Self::Completed => STATUS_COMPLETED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Expired => STATUS_EXPIRED,
        }
    }

    /// Whether this status counts toward completion numerators.
    ///
    /// Only `Completed` and `Approved` are terminal-success statuses.
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, Self::Completed | Self::Approved)
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A unit of required work, as loaded from the item catalog.
#[derive(Debug, Clone, Serialize)]
pub struct AssignableItem {
    pub id: DbId,
    pub kind: ItemKind,
    /// Only required items count toward completion-rate denominators.
    pub is_required: bool,
}

/// One staff member's interaction state with one assignable item.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRecord {
    pub item_id: DbId,
    pub staff_id: DbId,
    pub status: CompletionStatus,
    pub completed_at: Option<Timestamp>,
    pub acknowledged_at: Option<Timestamp>,
    /// 0-100; meaningful only for training assignments.
    pub score: Option<f64>,
    /// 0-100; meaningful only for video-backed training.
    pub watched_percentage: Option<f64>,
    pub signature_url: Option<String>,
    pub form_data: Option<serde_json::Value>,
    /// Tie-breaker when duplicate records exist for one (item, staff) pair.
    pub updated_at: Timestamp,
}

/// Per-staff progress over the required item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProgress {
    pub total: usize,
    pub completed: usize,
    pub percentage: u8,
    pub is_complete: bool,
}

/// An assignable item annotated with one staff member's status on it.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithStatus {
    pub id: DbId,
    pub kind: ItemKind,
    pub is_required: bool,
    pub status: CompletionStatus,
    pub acknowledged_at: Option<Timestamp>,
    pub signature_url: Option<String>,
    pub form_data: Option<serde_json::Value>,
}

/// Organization-wide completion rates for the admin dashboard.
///
/// Rates are rounded integer percentages; averages keep their fractional
/// part. All fields default to zero so the dashboard can degrade to a
/// zeroed payload when the upstream store is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrgRates {
    pub submission_rate: u8,
    pub onboarding_rate: u8,
    pub completion_rate: u8,
    pub avg_score: f64,
    pub avg_watch_percentage: f64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that an item kind string is one of the known kinds.
pub fn validate_item_kind(kind: &str) -> Result<(), CoreError> {
    ItemKind::from_str_value(kind)
        .map(|_| ())
        .map_err(CoreError::Validation)
}

/// Validate that a completion status string is one of the known statuses.
pub fn validate_completion_status(status: &str) -> Result<(), CoreError> {
    CompletionStatus::from_str_value(status)
        .map(|_| ())
        .map_err(CoreError::Validation)
}

// ---------------------------------------------------------------------------
// Evaluation functions
// ---------------------------------------------------------------------------

/// Round-half-up integer percentage, clamped to 100.
///
/// Returns 0 when `total` is 0. The clamp guards against denormalized
/// inputs (e.g. more successes than assignments in imported data).
fn rate_pct(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (count as f64 / total as f64 * 100.0).round() as u8;
    pct.min(100)
}

/// The surviving record for one `(item, staff)` pair.
///
/// Duplicate records can exist in data imported from before the unique
/// constraint; the most recently updated one wins.
fn latest_record_for<'a>(
    records: &'a [CompletionRecord],
    item_id: DbId,
    staff_id: DbId,
) -> Option<&'a CompletionRecord> {
    records
        .iter()
        .filter(|r| r.item_id == item_id && r.staff_id == staff_id)
        .max_by_key(|r| r.updated_at)
}

/// Compute one staff member's progress over the required items.
///
/// `completed` counts required items whose record carries a terminal-success
/// status (`completed` or `approved`); any other status, or no record at
/// all, does not count. Empty inputs yield the zero-state result.
pub fn compute_user_progress(
    items: &[AssignableItem],
    records: &[CompletionRecord],
    staff_id: DbId,
) -> UserProgress {
    let required: Vec<&AssignableItem> = items.iter().filter(|i| i.is_required).collect();

    let total = required.len();
    let completed = required
        .iter()
        .filter(|item| {
            latest_record_for(records, item.id, staff_id)
                .is_some_and(|r| r.status.is_terminal_success())
        })
        .count();

    UserProgress {
        total,
        completed,
        percentage: rate_pct(completed, total),
        is_complete: total > 0 && completed >= total,
    }
}

/// Annotate every item with the given staff member's status on it.
///
/// Output preserves the input item ordering and has exactly one entry per
/// input item, regardless of how many records exist for a pair. Items
/// without a record read as `Pending` with no record fields.
pub fn merge_item_status(
    items: &[AssignableItem],
    records: &[CompletionRecord],
    staff_id: DbId,
) -> Vec<ItemWithStatus> {
    items
        .iter()
        .map(|item| match latest_record_for(records, item.id, staff_id) {
            Some(record) => ItemWithStatus {
                id: item.id,
                kind: item.kind,
                is_required: item.is_required,
                status: record.status,
                acknowledged_at: record.acknowledged_at,
                signature_url: record.signature_url.clone(),
                form_data: record.form_data.clone(),
            },
            None => ItemWithStatus {
                id: item.id,
                kind: item.kind,
                is_required: item.is_required,
                status: CompletionStatus::Pending,
                acknowledged_at: None,
                signature_url: None,
                form_data: None,
            },
        })
        .collect()
}

/// Arithmetic mean; 0.0 when the input is empty (never NaN).
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute organization-wide rates over the full item catalog and all
/// completion records.
///
/// Denominators are assignment-record counts, not catalog counts. A record
/// is "submitted or beyond" when its completion timestamp is set. Records
/// whose item no longer exists in the catalog have no kind and are skipped
/// by the kind-restricted rates.
pub fn compute_org_rates(items: &[AssignableItem], records: &[CompletionRecord]) -> OrgRates {
    let kinds: HashMap<DbId, ItemKind> = items.iter().map(|i| (i.id, i.kind)).collect();

    let submitted = records.iter().filter(|r| r.completed_at.is_some()).count();
    let submission_rate = rate_pct(submitted, records.len());

    let onboarding: Vec<&CompletionRecord> = records
        .iter()
        .filter(|r| kinds.get(&r.item_id) == Some(&ItemKind::OnboardingDocument))
        .collect();
    let onboarding_submitted = onboarding.iter().filter(|r| r.completed_at.is_some()).count();
    let onboarding_rate = rate_pct(onboarding_submitted, onboarding.len());

    let training: Vec<&CompletionRecord> = records
        .iter()
        .filter(|r| kinds.get(&r.item_id) == Some(&ItemKind::TrainingAssignment))
        .collect();
    let training_completed = training
        .iter()
        .filter(|r| r.status == CompletionStatus::Completed)
        .count();
    let completion_rate = rate_pct(training_completed, training.len());

    let scores: Vec<f64> = records.iter().filter_map(|r| r.score).collect();
    let watch: Vec<f64> = records.iter().filter_map(|r| r.watched_percentage).collect();

    OrgRates {
        submission_rate,
        onboarding_rate,
        completion_rate,
        avg_score: mean(&scores),
        avg_watch_percentage: mean(&watch),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
