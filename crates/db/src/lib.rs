//! Persistence layer for the catalog.
//!
//! - [`models`]: persisted records, transfer DTOs and their mappings.
//! - [`store`]: the [`Store`] contract the services depend on.
//! - [`memory`]: an in-process [`MemoryStore`].
//! - [`postgres`]: the sqlx-backed [`PgStore`].
//! - [`repositories`]: table access that sits outside the entity stores.

pub mod mapper;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Store, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
