//! Route definitions for the admin dashboard (PRD-24, PRD-27).
//!
//! Mounted at `/dashboard` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes.
///
/// ```text
/// GET /stats     -> stats (org-wide rates, degrades to zeros)
/// GET /activity  -> activity (merged feed)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/activity", get(dashboard::activity))
}
