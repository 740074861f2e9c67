//! Handlers for the assignable item catalog (PRD-11).
//!
//! Admin CRUD over onboarding documents and training assignments. Items are
//! never mutated by completion events; deleting one cascades its completion
//! records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use staffhub_core::audit::action_types;
use staffhub_core::error::CoreError;
use staffhub_core::progress;
use staffhub_core::types::DbId;
use staffhub_db::models::audit::NewAuditEntry;
use staffhub_db::models::item::{AssignableItemRow, CreateItem, UpdateItem};
use staffhub_db::repositories::{AuditRepo, ItemRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch an item or fail with 404.
pub(crate) async fn ensure_item(
    pool: &staffhub_db::DbPool,
    id: DbId,
) -> Result<AssignableItemRow, AppError> {
    ItemRepo::get(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "item", id }))
}

// ---------------------------------------------------------------------------
// GET /items
// ---------------------------------------------------------------------------

/// Query params for `GET /items`.
#[derive(Debug, Deserialize)]
pub struct ItemListQuery {
    /// Restrict to one item kind.
    pub kind: Option<String>,
}

/// List assignable items, optionally filtered by kind.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemListQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref kind) = params.kind {
        progress::validate_item_kind(kind)?;
    }
    let items = ItemRepo::list(&state.pool, params.kind.as_deref()).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /items
// ---------------------------------------------------------------------------

/// Create an assignable item.
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<impl IntoResponse> {
    progress::validate_item_kind(&input.kind)?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = ItemRepo::create(&state.pool, &input).await?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: input.created_by,
            action_type: action_types::ITEM_CREATED.to_string(),
            entity_type: "assignable_item".to_string(),
            entity_id: Some(created.id),
            details: serde_json::json!({
                "kind": created.kind,
                "title": created.title,
                "is_required": created.is_required,
            }),
        },
    )
    .await?;

    tracing::info!(item_id = created.id, kind = %created.kind, "Assignable item created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /items/{id}
// ---------------------------------------------------------------------------

/// Get one assignable item.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ensure_item(&state.pool, id).await?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// PUT /items/{id}
// ---------------------------------------------------------------------------

/// Partially update an assignable item. The kind is fixed at creation.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let updated = ItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "item", id }))?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: None,
            action_type: action_types::ITEM_UPDATED.to_string(),
            entity_type: "assignable_item".to_string(),
            entity_id: Some(updated.id),
            details: serde_json::json!({ "title": updated.title }),
        },
    )
    .await?;

    tracing::info!(item_id = id, "Assignable item updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /items/{id}
// ---------------------------------------------------------------------------

/// Delete an assignable item and its completion records.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // Load first so the audit entry can name what was removed.
    let item = ensure_item(&state.pool, id).await?;

    ItemRepo::delete(&state.pool, id).await?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: None,
            action_type: action_types::ITEM_DELETED.to_string(),
            entity_type: "assignable_item".to_string(),
            entity_id: Some(id),
            details: serde_json::json!({ "kind": item.kind, "title": item.title }),
        },
    )
    .await?;

    tracing::info!(item_id = id, "Assignable item deleted");

    Ok(StatusCode::NO_CONTENT)
}
