//! Personalized search pipeline:
//! validate → load profile → normalize → build query → fetch listings →
//! salary filter → score → sort → respond.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::listings::{ListingsApi, ListingsQuery};
use crate::models::listing::{JobListing, ScoredJobListing};
use crate::models::profile::UserProfile;
use crate::profiles::ProfileStore;
use crate::search::normalize::{normalize, NormalizedProfile};
use crate::search::query::{build_query, DatePosted};
use crate::search::scoring::{salary_matches, RelevanceScorer};

pub const RESPONSE_SOURCE: &str = "jsearch-api-personalized";

/// Inbound search request. Consumed once per invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "customQuery", default)]
    pub custom_query: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub num_pages: u32,
}

fn default_page() -> u32 {
    1
}

/// Echo of the profile preferences that shaped the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPreferences {
    pub user_id: String,
    pub search_query: String,
    pub preferences: PreferenceEcho,
    pub search_parameters: SearchParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceEcho {
    pub work_type: Option<String>,
    pub is_remote_preferred: bool,
    pub target_countries: Vec<String>,
    pub salary_expectation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub employment_types: String,
    pub country: String,
    pub date_posted: DatePosted,
    pub remote_jobs_only: bool,
}

/// Upstream response with `data` replaced by the personalized listings.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub upstream: Map<String, Value>,
    pub data: Vec<ScoredJobListing>,
    pub user_profile_applied: AppliedPreferences,
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
}

/// Collaborators the pipeline reads from. Borrowed from `AppState` per request.
pub struct SearchDeps<'a> {
    pub profiles: &'a dyn ProfileStore,
    pub listings: &'a dyn ListingsApi,
    pub scorer: &'a dyn RelevanceScorer,
}

/// Runs one personalized search end-to-end. Every failure is terminal.
pub async fn search_jobs(
    deps: SearchDeps<'_>,
    request: SearchRequest,
) -> Result<SearchResponse, AppError> {
    // 1. Received → validated
    let user_id = validate(&request)?;

    // 2. ProfileLoaded
    let document = deps
        .profiles
        .get(&user_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound(user_id.clone()))?;
    let profile = normalize(UserProfile::from_document(&document));
    debug!(
        job_roles = ?profile.job_roles,
        skills = ?profile.skills,
        work_type = ?profile.work_type,
        remote = profile.is_remote_preferred,
        "Profile loaded"
    );

    // 3. QueryBuilt
    let built = build_query(&profile);
    let search_query = request
        .custom_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .unwrap_or(built.query_string);

    let listings_query = ListingsQuery {
        query: search_query.clone(),
        page: request.page,
        num_pages: request.num_pages,
        date_posted: built.date_posted,
        country: built.country_code.to_string(),
        remote_jobs_only: profile.is_remote_preferred,
        employment_types: Some(built.employment_types.clone()),
    };
    info!(
        query = %listings_query.query,
        employment_types = %built.employment_types,
        country = built.country_code,
        date_posted = built.date_posted.as_str(),
        page = request.page,
        "Search parameters built from profile"
    );

    // 4. ListingsFetched
    let page = deps.listings.search(&listings_query).await?;
    let fetched = page.data.len();

    // 5. Scored
    let data = personalize(&profile, page.data, deps.scorer);
    info!(
        fetched,
        returned = data.len(),
        top_score = ?data.first().map(|j| j.relevance_score),
        top_employer = ?data.first().and_then(|j| j.listing.employer_name()),
        "Listings personalized"
    );

    // 6. Responded
    Ok(SearchResponse {
        upstream: page.rest,
        data,
        user_profile_applied: AppliedPreferences {
            user_id,
            search_query,
            preferences: PreferenceEcho {
                work_type: profile.work_type.clone(),
                is_remote_preferred: profile.is_remote_preferred,
                target_countries: profile.target_countries.clone(),
                salary_expectation: profile.salary_expectation,
            },
            search_parameters: SearchParameters {
                employment_types: built.employment_types,
                country: listings_query.country,
                date_posted: built.date_posted,
                remote_jobs_only: listings_query.remote_jobs_only,
            },
        },
        timestamp: Utc::now(),
        source: RESPONSE_SOURCE,
    })
}

fn validate(request: &SearchRequest) -> Result<String, AppError> {
    let user_id = request
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            AppError::InvalidRequest("Please provide userId in request body".to_string())
        })?;

    if request.page == 0 {
        return Err(AppError::InvalidRequest("page must be at least 1".to_string()));
    }
    if request.num_pages == 0 {
        return Err(AppError::InvalidRequest(
            "num_pages must be at least 1".to_string(),
        ));
    }
    Ok(user_id.to_string())
}

/// Salary filter, scoring and a stable descending sort. Listings that state
/// no minimum salary always pass the filter.
/// Equal scores keep their upstream order.
pub fn personalize(
    profile: &NormalizedProfile,
    listings: Vec<JobListing>,
    scorer: &dyn RelevanceScorer,
) -> Vec<ScoredJobListing> {
    let before = listings.len();
    let mut scored: Vec<ScoredJobListing> = listings
        .into_iter()
        .filter(|job| salary_matches(profile, job))
        .map(|job| {
            let relevance = scorer.score(profile, &job);
            ScoredJobListing::new(job, relevance.score, relevance.reasons)
        })
        .collect();

    let dropped = before - scored.len();
    if dropped > 0 {
        debug!(dropped, "Listings below salary expectation filtered out");
    }

    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored
}
