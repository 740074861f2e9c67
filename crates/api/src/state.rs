use std::sync::Arc;

use staffhub_core::rate_limit::RateLimiter;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: staffhub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Process-wide submission rate limiter. Constructed once at startup;
    /// all handlers share the same counter table.
    pub rate_limiter: Arc<RateLimiter>,
}
