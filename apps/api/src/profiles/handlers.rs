use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::ProfileDocument;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserIdParams {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub data: ProfileDocument,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/v1/profile?userId=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdParams>,
) -> Result<Json<ProfileResponse>, AppError> {
    fetch_profile(&state, params).await
}

/// POST /api/v1/profile
pub async fn handle_post_profile(
    State(state): State<AppState>,
    payload: Result<Json<UserIdParams>, JsonRejection>,
) -> Result<Json<ProfileResponse>, AppError> {
    let Json(params) = payload?;
    fetch_profile(&state, params).await
}

/// Returns the stored document as-is; no normalization is applied.
async fn fetch_profile(
    state: &AppState,
    params: UserIdParams,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = params
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Please provide userId parameter".to_string()))?;

    let data = state
        .profiles
        .get(user_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound(user_id.to_string()))?;

    Ok(Json(ProfileResponse {
        success: true,
        data,
        timestamp: Utc::now(),
    }))
}
