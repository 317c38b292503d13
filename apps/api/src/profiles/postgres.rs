use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::profile::ProfileDocument;
use crate::profiles::{ProfileStore, StoreError};

/// Profiles stored as JSONB documents in `user_profiles` (see `migrations/`).
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<ProfileDocument>, StoreError> {
        let document: Option<ProfileDocument> =
            sqlx::query_scalar("SELECT data FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        debug!(user_id, found = document.is_some(), "profile lookup");
        Ok(document)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
