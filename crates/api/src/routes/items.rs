//! Route definitions for the assignable item catalog (PRD-11).
//!
//! Mounted at `/items` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Item catalog routes.
///
/// ```text
/// GET    /        -> list_items
/// POST   /        -> create_item
/// GET    /{id}    -> get_item
/// PUT    /{id}    -> update_item
/// DELETE /{id}    -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
}
