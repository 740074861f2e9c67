//! Handlers for completion records and per-staff progress (PRD-14, PRD-18).
//!
//! Submissions, acknowledgments, and training progress updates all upsert
//! against the `(item, staff)` unique pair. Progress reads run the pure
//! aggregation over freshly loaded item and record snapshots. Submissions
//! are rate limited per staff email.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use staffhub_core::audit::action_types;
use staffhub_core::error::CoreError;
use staffhub_core::progress::{self, AssignableItem, CompletionRecord, CompletionStatus};
use staffhub_core::types::{DbId, Timestamp};
use staffhub_db::models::audit::NewAuditEntry;
use staffhub_db::models::record::{SubmitDocument, UpdateTrainingProgress};
use staffhub_db::repositories::{AuditRepo, ItemRepo, RecordRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::items::ensure_item;
use crate::handlers::staff::ensure_staff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters and response types
// ---------------------------------------------------------------------------

/// Query params shared by the progress and item-status endpoints.
#[derive(Debug, Deserialize)]
pub struct KindQuery {
    /// Restrict to one item kind.
    pub kind: Option<String>,
}

/// An assignable item annotated with catalog fields and one staff member's
/// status on it.
#[derive(Debug, Serialize)]
pub struct AnnotatedItem {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub status: CompletionStatus,
    pub acknowledged_at: Option<Timestamp>,
    pub signature_url: Option<String>,
    pub form_data: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Snapshot loading
// ---------------------------------------------------------------------------

/// Load the item catalog as domain values, optionally restricted by kind.
pub(crate) async fn load_items(
    pool: &staffhub_db::DbPool,
    kind: Option<&str>,
) -> Result<(Vec<staffhub_db::models::item::AssignableItemRow>, Vec<AssignableItem>), AppError> {
    let rows = ItemRepo::list(pool, kind).await?;
    let domain = rows
        .iter()
        .map(|r| r.to_domain())
        .collect::<Result<Vec<_>, String>>()
        .map_err(AppError::InternalError)?;
    Ok((rows, domain))
}

/// Load one staff member's completion records as domain values.
async fn load_staff_records(
    pool: &staffhub_db::DbPool,
    staff_id: DbId,
) -> Result<Vec<CompletionRecord>, AppError> {
    RecordRepo::list_for_staff(pool, staff_id)
        .await?
        .iter()
        .map(|r| r.to_domain())
        .collect::<Result<Vec<_>, String>>()
        .map_err(AppError::InternalError)
}

// ---------------------------------------------------------------------------
// GET /staff/{id}/progress
// ---------------------------------------------------------------------------

/// Compute a staff member's completion progress over the required items.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(staff_id): Path<DbId>,
    Query(params): Query<KindQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref kind) = params.kind {
        progress::validate_item_kind(kind)?;
    }
    ensure_staff(&state.pool, staff_id).await?;

    let (_, items) = load_items(&state.pool, params.kind.as_deref()).await?;
    let records = load_staff_records(&state.pool, staff_id).await?;

    let result = progress::compute_user_progress(&items, &records, staff_id);

    tracing::debug!(
        staff_id,
        total = result.total,
        completed = result.completed,
        "Computed staff progress"
    );

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// GET /staff/{id}/items
// ---------------------------------------------------------------------------

/// List the item catalog annotated with the staff member's status on each
/// entry. Items without a record read as pending.
pub async fn list_items_with_status(
    State(state): State<AppState>,
    Path(staff_id): Path<DbId>,
    Query(params): Query<KindQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref kind) = params.kind {
        progress::validate_item_kind(kind)?;
    }
    ensure_staff(&state.pool, staff_id).await?;

    let (rows, items) = load_items(&state.pool, params.kind.as_deref()).await?;
    let records = load_staff_records(&state.pool, staff_id).await?;

    let merged = progress::merge_item_status(&items, &records, staff_id);

    // merge_item_status yields exactly one entry per item in input order, so
    // the rows zip back positionally.
    let annotated: Vec<AnnotatedItem> = rows
        .into_iter()
        .zip(merged)
        .map(|(row, status)| AnnotatedItem {
            id: row.id,
            kind: row.kind,
            title: row.title,
            description: row.description,
            is_required: row.is_required,
            status: status.status,
            acknowledged_at: status.acknowledged_at,
            signature_url: status.signature_url,
            form_data: status.form_data,
        })
        .collect();

    Ok(Json(DataResponse { data: annotated }))
}

// ---------------------------------------------------------------------------
// POST /staff/{id}/items/{item_id}/submit
// ---------------------------------------------------------------------------

/// Submit an onboarding document for a staff member.
///
/// Throttled per staff email with the configured fixed window; a rejected
/// attempt returns 429 with a `Retry-After` header.
pub async fn submit_document(
    State(state): State<AppState>,
    Path((staff_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<SubmitDocument>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let staff = ensure_staff(&state.pool, staff_id).await?;
    ensure_item(&state.pool, item_id).await?;

    let key = format!("submit:{}", staff.email);
    let decision = state.rate_limiter.check_and_consume(
        &key,
        state.config.submit_rate_limit,
        state.config.submit_rate_window_ms,
    )?;
    if !decision.allowed {
        tracing::warn!(staff_id, item_id, "Submission rate limit hit");
        return Err(AppError::RateLimited {
            retry_after_seconds: decision.retry_after_seconds.unwrap_or(0),
        });
    }

    let record = RecordRepo::upsert_submission(&state.pool, item_id, staff_id, &input).await?;

    tracing::info!(staff_id, item_id, "Document submitted");

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// POST /staff/{id}/items/{item_id}/acknowledge
// ---------------------------------------------------------------------------

/// Record that a staff member has acknowledged a document.
pub async fn acknowledge_document(
    State(state): State<AppState>,
    Path((staff_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_staff(&state.pool, staff_id).await?;
    ensure_item(&state.pool, item_id).await?;

    let record = RecordRepo::upsert_acknowledgment(&state.pool, item_id, staff_id).await?;

    tracing::info!(staff_id, item_id, "Document acknowledged");

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// POST /staff/{id}/items/{item_id}/approve
// ---------------------------------------------------------------------------

/// Approve a staff member's submitted document (HR review outcome).
///
/// Requires an existing record; approving an item the staff member never
/// interacted with is a 404.
pub async fn approve_document(
    State(state): State<AppState>,
    Path((staff_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_staff(&state.pool, staff_id).await?;
    ensure_item(&state.pool, item_id).await?;

    let record = RecordRepo::approve(&state.pool, item_id, staff_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "completion record",
            id: item_id,
        }))?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: None,
            action_type: action_types::DOCUMENT_APPROVED.to_string(),
            entity_type: "completion_record".to_string(),
            entity_id: Some(record.id),
            details: serde_json::json!({ "item_id": item_id, "staff_id": staff_id }),
        },
    )
    .await?;

    tracing::info!(staff_id, item_id, "Document approved");

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// PUT /staff/{id}/items/{item_id}/progress
// ---------------------------------------------------------------------------

/// Update a staff member's training progress on an assignment.
pub async fn update_training_progress(
    State(state): State<AppState>,
    Path((staff_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTrainingProgress>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if let Some(ref status) = input.status {
        progress::validate_completion_status(status)?;
    }

    ensure_staff(&state.pool, staff_id).await?;
    let item = ensure_item(&state.pool, item_id).await?;
    if item.kind != progress::KIND_TRAINING_ASSIGNMENT {
        return Err(CoreError::Validation(
            "Progress updates only apply to training assignments".to_string(),
        )
        .into());
    }

    let record = RecordRepo::upsert_progress(&state.pool, item_id, staff_id, &input).await?;

    tracing::info!(staff_id, item_id, status = %record.status, "Training progress updated");

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// DELETE /staff/{id}/items/{item_id}/record
// ---------------------------------------------------------------------------

/// Remove a staff member's completion record for an item (admin action).
pub async fn delete_record(
    State(state): State<AppState>,
    Path((staff_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_staff(&state.pool, staff_id).await?;

    let removed = RecordRepo::delete(&state.pool, item_id, staff_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "completion record",
            id: item_id,
        }));
    }

    tracing::info!(staff_id, item_id, "Completion record removed");

    Ok(axum::http::StatusCode::NO_CONTENT)
}
