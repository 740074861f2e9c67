pub mod dashboard;
pub mod health;
pub mod items;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /staff                                        list, create
/// /staff/{id}                                   get, update, deactivate
/// /staff/{id}/progress                          completion progress (GET)
/// /staff/{id}/items                             annotated item catalog (GET)
/// /staff/{id}/items/{item_id}/submit            submit document (POST, throttled)
/// /staff/{id}/items/{item_id}/acknowledge       acknowledge document (POST)
/// /staff/{id}/items/{item_id}/approve           approve document (POST)
/// /staff/{id}/items/{item_id}/progress          training progress (PUT)
/// /staff/{id}/items/{item_id}/record            remove record (DELETE)
///
/// /items                                        list, create
/// /items/{id}                                   get, update, delete
///
/// /dashboard/stats                              org-wide rates (GET)
/// /dashboard/activity                           merged activity feed (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/staff", staff::router())
        .nest("/items", items::router())
        .nest("/dashboard", dashboard::router())
}
