//! Axum route handlers for the Search API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::search::orchestrator::{search_jobs, SearchRequest, SearchResponse};
use crate::state::AppState;

/// POST /api/v1/jobs/search
///
/// Loads the caller's profile, searches JSearch with parameters derived from
/// it and returns the listings filtered, scored and sorted by relevance.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload?;

    let span = info_span!("search_jobs", request_id = %Uuid::new_v4());
    let result = search_jobs(state.search_deps(), request)
        .instrument(span)
        .await;

    if let Err(e) = &result {
        warn!("Job search failed: {e}");
    }
    result.map(Json)
}
