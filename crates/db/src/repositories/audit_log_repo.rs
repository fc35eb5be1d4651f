//! Repository for the append-only `logs` table holding audit events.

use sqlx::PgPool;

use catalog_core::types::Timestamp;

/// One audit row to append.
#[derive(Debug, Clone)]
pub struct NewAuditLog<'a> {
    pub status: &'a str,
    pub action: &'a str,
    pub entity_type: &'a str,
    /// Serialized event payload.
    pub body: String,
    pub date: Timestamp,
}

/// Append-only writes to `logs`.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert a row, returning its generated id (a v4 UUID string).
    pub async fn insert(pool: &PgPool, entry: &NewAuditLog<'_>) -> Result<String, sqlx::Error> {
        let id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO logs (id, status, action, entity_type, body, date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&id)
        .bind(entry.status)
        .bind(entry.action)
        .bind(entry.entity_type)
        .bind(&entry.body)
        .bind(entry.date)
        .execute(pool)
        .await?;
        Ok(id)
    }
}
