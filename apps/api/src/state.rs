use std::sync::Arc;

use crate::config::Config;
use crate::listings::ListingsApi;
use crate::profiles::ProfileStore;
use crate::search::orchestrator::SearchDeps;
use crate::search::scoring::RelevanceScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Profile documents. Default: PgProfileStore.
    pub profiles: Arc<dyn ProfileStore>,
    /// JSearch client.
    pub listings: Arc<dyn ListingsApi>,
    /// Pluggable relevance scorer. Default: KeywordRelevanceScorer.
    pub scorer: Arc<dyn RelevanceScorer>,
    pub config: Config,
}

impl AppState {
    pub fn search_deps(&self) -> SearchDeps<'_> {
        SearchDeps {
            profiles: self.profiles.as_ref(),
            listings: self.listings.as_ref(),
            scorer: self.scorer.as_ref(),
        }
    }
}
