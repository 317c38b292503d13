use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates the PostgreSQL pool backing the profile store and applies
/// `migrations/` so `user_profiles` exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to the profile database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply profile store migrations")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
