use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::listings::ListingsError;
use crate::profiles::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is terminal for the request; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::UpstreamUnavailable(format!("profile store: {err}"))
    }
}

impl From<ListingsError> for AppError {
    fn from(err: ListingsError) -> Self {
        match err {
            ListingsError::Api { status, body } => AppError::UpstreamError { status, body },
            ListingsError::MissingApiKey => {
                AppError::Configuration("RapidAPI key is not configured".to_string())
            }
            other => AppError::UpstreamUnavailable(format!("job listings API: {other}")),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error, details) = match self {
            AppError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                "Invalid request".to_string(),
                msg,
            ),
            AppError::ProfileNotFound(user_id) => (
                StatusCode::NOT_FOUND,
                "PROFILE_NOT_FOUND",
                "User not found".to_string(),
                format!("No user profile found for userId: {user_id}"),
            ),
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNAVAILABLE",
                    "Upstream service unavailable".to_string(),
                    msg,
                )
            }
            AppError::UpstreamError { status, body } => {
                tracing::error!("JSearch API request failed with status {status}: {body}");
                let forwarded = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    forwarded,
                    "UPSTREAM_ERROR",
                    format!("JSearch API request failed: {status}"),
                    body,
                )
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Service misconfigured".to_string(),
                    msg,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    "An unexpected error occurred while processing the request".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "details": details,
            "code": code,
        }));

        (status, body).into_response()
    }
}

/// Converts a handler panic into the generic internal-error response.
/// Installed on the router via `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "panic payload not string".to_string());

    AppError::Internal(anyhow::anyhow!("handler panicked: {message}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_request_is_400_with_details() {
        let (status, body) =
            render(AppError::InvalidRequest("userId is required".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert_eq!(body["details"], "userId is required");
    }

    #[tokio::test]
    async fn test_profile_not_found_is_distinct_404() {
        let (status, body) = render(AppError::ProfileNotFound("abc".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PROFILE_NOT_FOUND");
        assert!(body["details"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn test_upstream_error_forwards_status_and_body() {
        let (status, body) = render(AppError::UpstreamError {
            status: 429,
            body: "quota exceeded".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["details"], "quota exceeded");
        assert_eq!(body["error"], "JSearch API request failed: 429");
    }

    #[tokio::test]
    async fn test_upstream_error_with_non_error_status_maps_to_bad_gateway() {
        let (status, _) = render(AppError::UpstreamError {
            status: 302,
            body: String::new(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) =
            render(AppError::Internal(anyhow::anyhow!("secret stack detail"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["details"].as_str().unwrap().contains("secret"));
    }

    #[tokio::test]
    async fn test_panic_response_is_generic_500() {
        let response = panic_response(Box::new("index out of bounds"));
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["details"].as_str().unwrap().contains("index"));
    }

    #[test]
    fn test_missing_api_key_maps_to_configuration() {
        let err: AppError = ListingsError::MissingApiKey.into();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_listings_api_error_keeps_status() {
        let err: AppError = ListingsError::Api {
            status: 403,
            body: "forbidden".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::UpstreamError { status: 403, .. }));
    }
}
