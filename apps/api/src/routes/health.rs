use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Reports service status, upstream key configuration and profile-store reachability.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store_ok = match state.profiles.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Profile store health check failed: {e}");
            false
        }
    };
    let api_key_configured = state.listings.is_configured();
    let status = if store_ok { "healthy" } else { "degraded" };
    let store_status = if store_ok { "connected" } else { "unreachable" };
    let rapidapi_status = if api_key_configured {
        "configured"
    } else {
        "not configured"
    };

    Json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "apiKeyConfigured": api_key_configured,
        "environment": state.config.environment,
        "services": {
            "profileStore": store_status,
            "rapidapi": rapidapi_status
        }
    }))
}
