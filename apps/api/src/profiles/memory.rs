use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::models::profile::ProfileDocument;
use crate::profiles::{ProfileStore, StoreError};

/// In-memory profile store for tests. Counts lookups and can be told to fail.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: HashMap<String, ProfileDocument>,
    failing: bool,
    lookups: AtomicUsize,
}

impl InMemoryProfileStore {
    pub fn with_profile(mut self, user_id: &str, document: ProfileDocument) -> Self {
        self.profiles.insert(user_id.to_string(), document);
        self
    }

    /// Every call returns a database error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<ProfileDocument>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.profiles.get(user_id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
