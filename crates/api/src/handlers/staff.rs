//! Handlers for staff administration (PRD-07).
//!
//! Admin CRUD over staff members. Mutations append audit log entries;
//! deactivation is soft so completion history is retained.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use staffhub_core::audit::action_types;
use staffhub_core::error::CoreError;
use staffhub_core::types::DbId;
use staffhub_db::models::audit::NewAuditEntry;
use staffhub_db::models::staff::{CreateStaff, Staff, UpdateStaff};
use staffhub_db::repositories::{AuditRepo, StaffRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a staff member or fail with 404.
pub(crate) async fn ensure_staff(
    pool: &staffhub_db::DbPool,
    id: DbId,
) -> Result<Staff, AppError> {
    StaffRepo::get(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "staff", id }))
}

// ---------------------------------------------------------------------------
// GET /staff
// ---------------------------------------------------------------------------

/// Query params for `GET /staff`.
#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    /// When true, only active staff members are returned.
    pub active_only: Option<bool>,
}

/// List staff members.
pub async fn list_staff(
    State(state): State<AppState>,
    Query(params): Query<StaffListQuery>,
) -> AppResult<impl IntoResponse> {
    let staff = StaffRepo::list(&state.pool, params.active_only.unwrap_or(false)).await?;
    Ok(Json(DataResponse { data: staff }))
}

// ---------------------------------------------------------------------------
// POST /staff
// ---------------------------------------------------------------------------

/// Create a staff member.
pub async fn create_staff(
    State(state): State<AppState>,
    Json(input): Json<CreateStaff>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = StaffRepo::create(&state.pool, &input).await?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: None,
            action_type: action_types::STAFF_CREATED.to_string(),
            entity_type: "staff".to_string(),
            entity_id: Some(created.id),
            details: serde_json::json!({
                "full_name": created.full_name,
                "email": created.email,
            }),
        },
    )
    .await?;

    tracing::info!(staff_id = created.id, "Staff member created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /staff/{id}
// ---------------------------------------------------------------------------

/// Get one staff member.
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let staff = ensure_staff(&state.pool, id).await?;
    Ok(Json(DataResponse { data: staff }))
}

// ---------------------------------------------------------------------------
// PUT /staff/{id}
// ---------------------------------------------------------------------------

/// Partially update a staff member.
pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStaff>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let updated = StaffRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "staff", id }))?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: None,
            action_type: action_types::STAFF_UPDATED.to_string(),
            entity_type: "staff".to_string(),
            entity_id: Some(updated.id),
            details: serde_json::json!({ "email": updated.email }),
        },
    )
    .await?;

    tracing::info!(staff_id = id, "Staff member updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /staff/{id}
// ---------------------------------------------------------------------------

/// Deactivate a staff member (soft delete; records are retained).
pub async fn deactivate_staff(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deactivated = StaffRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "staff", id }))?;

    AuditRepo::record(
        &state.pool,
        &NewAuditEntry {
            actor_id: None,
            action_type: action_types::STAFF_DEACTIVATED.to_string(),
            entity_type: "staff".to_string(),
            entity_id: Some(deactivated.id),
            details: serde_json::json!({ "email": deactivated.email }),
        },
    )
    .await?;

    tracing::info!(staff_id = id, "Staff member deactivated");

    Ok(Json(DataResponse { data: deactivated }))
}
