//! Storage contract consumed by the resource services.

use async_trait::async_trait;
use catalog_core::types::DbId;

/// Failure reported by a [`Store`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The row disappeared between load and write.
    #[error("Record with id {0} no longer exists")]
    Missing(DbId),

    /// The backend refused the write (constraint, unavailable, ...).
    #[error("Store rejected the operation: {0}")]
    Rejected(String),
}

/// Typed CRUD over one table.
///
/// Every write is its own transaction: `add`, `update` and `remove` either
/// persist completely or return an error and leave storage untouched.
/// Referential integrity is the backend's concern.
#[async_trait]
pub trait Store<R>: Send + Sync {
    /// All records, ordered by id.
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError>;

    /// Insert a new record. The store assigns the id; the stored row is
    /// returned.
    async fn add(&self, record: R) -> Result<R, StoreError>;

    /// Overwrite the row with `record`'s id.
    async fn update(&self, record: R) -> Result<R, StoreError>;

    /// Hard-delete the row with `record`'s id.
    async fn remove(&self, record: R) -> Result<(), StoreError>;
}
