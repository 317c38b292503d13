pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::profiles::handlers as profile_handlers;
use crate::search::handlers as search_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search API
        .route(
            "/api/v1/jobs/search",
            post(search_handlers::handle_search_jobs),
        )
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile_handlers::handle_get_profile).post(profile_handlers::handle_post_profile),
        )
        .with_state(state)
}
