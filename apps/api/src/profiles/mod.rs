//! Profile store — keyed lookup of profile documents by user id.
//!
//! The search pipeline only ever reads profiles; writes belong to the
//! onboarding wizard and never pass through this service.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::profile::ProfileDocument;

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read access to stored profiles. Carried in `AppState` as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Exact-id fetch. `Ok(None)` when no profile exists for `user_id`.
    async fn get(&self, user_id: &str) -> Result<Option<ProfileDocument>, StoreError>;

    /// Cheap liveness probe for `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
