//! Destinations for audit events.

use async_trait::async_trait;
use catalog_db::repositories::{AuditLogRepo, NewAuditLog};
use catalog_db::DbPool;

use crate::bus::{AuditEvent, AuditOutcome};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Append-only, best-effort consumer of audit events.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn consume(&self, event: &AuditEvent) -> Result<(), SinkError>;
}

/// Writes one structured log line per event.
pub struct TracingSink;

#[async_trait]
impl AuditSink for TracingSink {
    async fn consume(&self, event: &AuditEvent) -> Result<(), SinkError> {
        match event.outcome {
            AuditOutcome::Success => tracing::info!(
                action = event.action.as_str(),
                entity_type = %event.entity_type,
                payload = %event.payload,
                timestamp = %event.timestamp,
                "Audit: mutation succeeded"
            ),
            AuditOutcome::Failure => tracing::warn!(
                action = event.action.as_str(),
                entity_type = %event.entity_type,
                payload = %event.payload,
                timestamp = %event.timestamp,
                "Audit: mutation failed"
            ),
        }
        Ok(())
    }
}

/// Appends every event to the `logs` table.
pub struct PgAuditSink {
    pool: DbPool,
}

impl PgAuditSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn consume(&self, event: &AuditEvent) -> Result<(), SinkError> {
        let body = match &event.payload {
            serde_json::Value::String(message) => message.clone(),
            other => serde_json::to_string(other)?,
        };
        let entry = NewAuditLog {
            status: event.outcome.as_str(),
            action: event.action.as_str(),
            entity_type: event.entity_type.as_str(),
            body,
            date: event.timestamp,
        };
        AuditLogRepo::insert(&self.pool, &entry).await?;
        Ok(())
    }
}
