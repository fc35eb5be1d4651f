//! Table access outside the generic entity stores.

pub mod audit_log_repo;

pub use audit_log_repo::{AuditLogRepo, NewAuditLog};
