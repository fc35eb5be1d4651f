//! Audit event bus for catalog mutations.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`AuditEvent`]: outcome of one create / update / delete.
//! - [`AuditLogger`]: background subscriber that hands every event to an
//!   [`AuditSink`].
//! - [`sink`]: the sink contract plus the tracing and PostgreSQL sinks.

pub mod bus;
pub mod logger;
pub mod sink;

pub use bus::{AuditAction, AuditEvent, AuditOutcome, EventBus};
pub use logger::AuditLogger;
pub use sink::{AuditSink, PgAuditSink, SinkError, TracingSink};
