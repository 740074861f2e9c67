//! Route definitions for staff administration and per-staff progress
//! (PRD-07, PRD-14, PRD-18).
//!
//! Mounted at `/staff` by `api_routes()`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{records, staff};
use crate::state::AppState;

/// Staff routes.
///
/// ```text
/// GET    /                                  -> list_staff
/// POST   /                                  -> create_staff
/// GET    /{id}                              -> get_staff
/// PUT    /{id}                              -> update_staff
/// DELETE /{id}                              -> deactivate_staff (soft)
/// GET    /{id}/progress                     -> get_progress
/// GET    /{id}/items                        -> list_items_with_status
/// POST   /{id}/items/{item_id}/submit       -> submit_document (throttled)
/// POST   /{id}/items/{item_id}/acknowledge  -> acknowledge_document
/// POST   /{id}/items/{item_id}/approve      -> approve_document
/// PUT    /{id}/items/{item_id}/progress     -> update_training_progress
/// DELETE /{id}/items/{item_id}/record       -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/{id}",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::deactivate_staff),
        )
        .route("/{id}/progress", get(records::get_progress))
        .route("/{id}/items", get(records::list_items_with_status))
        .route("/{id}/items/{item_id}/submit", post(records::submit_document))
        .route(
            "/{id}/items/{item_id}/acknowledge",
            post(records::acknowledge_document),
        )
        .route(
            "/{id}/items/{item_id}/approve",
            post(records::approve_document),
        )
        .route(
            "/{id}/items/{item_id}/progress",
            put(records::update_training_progress),
        )
        .route("/{id}/items/{item_id}/record", delete(records::delete_record))
}
