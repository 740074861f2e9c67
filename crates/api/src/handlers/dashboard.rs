//! Handlers for the admin dashboard (PRD-24, PRD-27).
//!
//! Aggregate statistics and the merged activity feed. The statistics
//! endpoint degrades to an all-zero payload when the database is
//! unavailable -- dashboard availability wins over correctness during an
//! outage.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use staffhub_core::activity::{self, TimelineEvent};
use staffhub_core::progress::{self, OrgRates};
use staffhub_db::repositories::{AuditRepo, RecordRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::records::load_items;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum entry counts for the activity feed.
const DEFAULT_ACTIVITY_LIMIT: i64 = 20;
const MAX_ACTIVITY_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// GET /dashboard/stats
// ---------------------------------------------------------------------------

/// Load everything the rate computation needs and run it.
async fn load_org_rates(state: &AppState) -> Result<OrgRates, AppError> {
    let (_, items) = load_items(&state.pool, None).await?;
    let records = RecordRepo::list_all(&state.pool)
        .await?
        .iter()
        .map(|r| r.to_domain())
        .collect::<Result<Vec<_>, String>>()
        .map_err(AppError::InternalError)?;

    Ok(progress::compute_org_rates(&items, &records))
}

/// Organization-wide completion statistics.
///
/// Never fails: an upstream error is logged and reported as zeroed rates so
/// the dashboard keeps rendering.
pub async fn stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rates = match load_org_rates(&state).await {
        Ok(rates) => rates,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load dashboard statistics; serving zeroed rates");
            OrgRates::default()
        }
    };

    Ok(Json(DataResponse { data: rates }))
}

// ---------------------------------------------------------------------------
// GET /dashboard/activity
// ---------------------------------------------------------------------------

/// Query params for `GET /dashboard/activity`.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum entries to return. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}

/// Merged activity feed: audit entries, submissions, and acknowledgments,
/// newest first.
pub async fn activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT).min(MAX_ACTIVITY_LIMIT);
    // Negative limits fall through as zero and are rejected by the merge.
    let merge_limit = usize::try_from(limit).unwrap_or(0);
    let fetch_limit = limit.max(1);

    // Fetching `limit` newest rows per source is enough: the merged top
    // `limit` can only contain rows from those prefixes.
    let audit = AuditRepo::list_recent_events(&state.pool, fetch_limit).await?;
    let submissions = RecordRepo::list_recent_submissions(&state.pool, fetch_limit).await?;
    let acknowledgments =
        RecordRepo::list_recent_acknowledgments(&state.pool, fetch_limit).await?;

    let audit: Vec<TimelineEvent> = audit.iter().map(|r| r.to_domain()).collect();
    let submissions: Vec<TimelineEvent> = submissions.iter().map(|r| r.to_domain()).collect();
    let acknowledgments: Vec<TimelineEvent> =
        acknowledgments.iter().map(|r| r.to_domain()).collect();

    let feed =
        activity::merge_activity_timeline(&audit, &submissions, &acknowledgments, merge_limit)?;

    Ok(Json(DataResponse { data: feed }))
}
