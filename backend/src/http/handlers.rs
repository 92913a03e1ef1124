//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer. Dashboard handlers always answer 200: malformed input is
//! treated as no filters and pipeline failures produce the degraded view.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    Json,
};

use super::dto::{DashboardView, HealthResponse, RawFilters};
use super::state::AppState;
use crate::services::{render_dashboard, PipelineError};

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports whether the dataset slot is filled, without triggering a fetch.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let dataset = match state.cache.snapshot() {
        Some(cached) => format!("{} ({} flights)", cached.origin, cached.dataset.len()),
        None => "not loaded".to_string(),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        dataset,
    })
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET / and GET /v1/dashboard
///
/// Filters come from the query string.
pub async fn dashboard_get(
    State(state): State<AppState>,
    query: Result<Query<RawFilters>, QueryRejection>,
) -> Json<DashboardView> {
    let filters = match query {
        Ok(Query(filters)) => filters,
        Err(e) => {
            tracing::warn!("Unreadable dashboard query, using no filters: {}", e);
            RawFilters::default()
        }
    };
    dashboard(state, filters).await
}

/// POST / and POST /v1/dashboard
///
/// Filters come from a urlencoded form body.
pub async fn dashboard_post(
    State(state): State<AppState>,
    form: Result<Form<RawFilters>, FormRejection>,
) -> Json<DashboardView> {
    let filters = match form {
        Ok(Form(filters)) => filters,
        Err(e) => {
            tracing::warn!("Unreadable dashboard form, using no filters: {}", e);
            RawFilters::default()
        }
    };
    dashboard(state, filters).await
}

async fn dashboard(state: AppState, filters: RawFilters) -> Json<DashboardView> {
    let cached = state.cache.get_or_fetch().await;
    let now = state.clock.now();
    let submitted = filters.clone();

    let view = run_blocking(move || render_dashboard(&cached.dataset, &filters, &now))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Dashboard pipeline error: {}", e);
            DashboardView::fallback(submitted, &now)
        });

    Json(view)
}

/// Run CPU-bound rendering on the blocking pool.
async fn run_blocking<F>(render: F) -> Result<DashboardView, PipelineError>
where
    F: FnOnce() -> DashboardView + Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| PipelineError::TaskFailed(format!("Task join error: {}", e)))
}
