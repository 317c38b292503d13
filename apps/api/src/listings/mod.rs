/// Listings client — the single point of entry for JSearch (RapidAPI) calls.
///
/// No retries: a failed upstream call surfaces immediately to the caller.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::listing::ListingsPage;
use crate::search::query::DatePosted;

#[cfg(test)]
pub mod stub;

#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("RapidAPI key is not configured")]
    MissingApiKey,
}

/// Parameters of one `/search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingsQuery {
    pub query: String,
    pub page: u32,
    pub num_pages: u32,
    pub date_posted: DatePosted,
    pub country: String,
    pub remote_jobs_only: bool,
    pub employment_types: Option<String>,
}

impl ListingsQuery {
    /// Query-string pairs in the order JSearch documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
            ("date_posted", self.date_posted.as_str().to_string()),
            ("country", self.country.clone()),
        ];
        if self.remote_jobs_only {
            params.push(("remote_jobs_only", "true".to_string()));
        }
        if let Some(types) = self.employment_types.as_ref().filter(|t| !t.is_empty()) {
            params.push(("employment_types", types.clone()));
        }
        params
    }
}

/// Upstream job-listing search. Carried in `AppState` as `Arc<dyn ListingsApi>`.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    async fn search(&self, query: &ListingsQuery) -> Result<ListingsPage, ListingsError>;

    /// Whether credentials are present; reported by `/health`.
    fn is_configured(&self) -> bool;
}

/// JSearch client over `reqwest`.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: Option<String>,
}

impl JSearchClient {
    pub fn new(
        base_url: String,
        host: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ListingsError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            host,
            api_key,
        })
    }
}

#[async_trait]
impl ListingsApi for JSearchClient {
    async fn search(&self, query: &ListingsQuery) -> Result<ListingsPage, ListingsError> {
        let api_key = self.api_key.as_deref().ok_or(ListingsError::MissingApiKey)?;
        let url = format!("{}/search", self.base_url);

        debug!(url = %url, params = ?query.params(), "Requesting JSearch listings");

        let response = self
            .client
            .get(&url)
            .query(&query.params())
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await?;

        let status = response.status();
        debug!("JSearch API response status: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ListingsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let page: ListingsPage = serde_json::from_slice(&bytes)?;

        debug!(job_count = page.data.len(), "JSearch listings received");
        Ok(page)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_query() -> ListingsQuery {
        ListingsQuery {
            query: "Data Scientist OR Python".to_string(),
            page: 2,
            num_pages: 1,
            date_posted: DatePosted::Week,
            country: "DE".to_string(),
            remote_jobs_only: true,
            employment_types: Some("FULLTIME,PARTTIME".to_string()),
        }
    }

    fn client(server: &MockServer, api_key: Option<&str>) -> JSearchClient {
        JSearchClient::new(
            server.uri(),
            "jsearch.p.rapidapi.com".to_string(),
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_params_include_optional_flags_only_when_set() {
        let mut query = sample_query();
        let keys: Vec<_> = query.params().into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"remote_jobs_only"));
        assert!(keys.contains(&"employment_types"));

        query.remote_jobs_only = false;
        query.employment_types = None;
        let keys: Vec<_> = query.params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["query", "page", "num_pages", "date_posted", "country"]);
    }

    #[tokio::test]
    async fn test_search_sends_params_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "Data Scientist OR Python"))
            .and(query_param("page", "2"))
            .and(query_param("date_posted", "week"))
            .and(query_param("country", "DE"))
            .and(query_param("remote_jobs_only", "true"))
            .and(query_param("employment_types", "FULLTIME,PARTTIME"))
            .and(header("x-rapidapi-key", "secret"))
            .and(header("x-rapidapi-host", "jsearch.p.rapidapi.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "data": [{"job_title": "Data Scientist"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client(&server, Some("secret"))
            .search(&sample_query())
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title(), "Data Scientist");
        assert_eq!(page.rest["status"], "OK");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_string("not subscribed"))
            .mount(&server)
            .await;

        let err = client(&server, Some("secret"))
            .search(&sample_query())
            .await
            .unwrap_err();

        match err {
            ListingsError::Api { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "not subscribed");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client(&server, None);
        assert!(!client.is_configured());
        let err = client.search(&sample_query()).await.unwrap_err();
        assert!(matches!(err, ListingsError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server, Some("secret"))
            .search(&sample_query())
            .await
            .unwrap_err();
        assert!(matches!(err, ListingsError::Parse(_)));
    }
}
