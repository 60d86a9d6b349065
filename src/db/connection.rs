use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;

pub type DbPool = Arc<PgPool>;

pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = PgPool::connect(database_url).await?;
    Ok(Arc::new(pool))
}

/// Builds a pool without connecting. Used by tests and by code paths that
/// must construct state before the database is reachable.
pub fn create_lazy_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = PgPoolOptions::new().connect_lazy(database_url)?;
    Ok(Arc::new(pool))
}
