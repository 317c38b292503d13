use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::listings::{ListingsApi, ListingsError, ListingsQuery};
use crate::models::listing::ListingsPage;

/// Returns a fixed page (or error) and records every query it receives.
pub struct StubListings {
    page: Value,
    error: Option<(u16, String)>,
    configured: bool,
    calls: AtomicUsize,
    last_query: Mutex<Option<ListingsQuery>>,
}

impl StubListings {
    pub fn returning(page: Value) -> Self {
        Self {
            page,
            error: None,
            configured: true,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            error: Some((status, body.to_string())),
            ..Self::returning(json!({}))
        }
    }

    /// Behaves like a client started without `RAPIDAPI_KEY`.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::returning(json!({}))
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> ListingsQuery {
        self.last_query
            .lock()
            .unwrap()
            .clone()
            .expect("no search was made")
    }
}

#[async_trait]
impl ListingsApi for StubListings {
    async fn search(&self, query: &ListingsQuery) -> Result<ListingsPage, ListingsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if !self.configured {
            return Err(ListingsError::MissingApiKey);
        }
        if let Some((status, body)) = &self.error {
            return Err(ListingsError::Api {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(serde_json::from_value(self.page.clone())?)
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
