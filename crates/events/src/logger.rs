//! Background subscriber that drains the audit bus into a sink.
//!
//! [`AuditLogger`] runs as a long-lived task per sink. Sink errors and lag
//! are logged and swallowed here so they can never reach a publisher. The
//! loop ends when the [`EventBus`](crate::bus::EventBus) is dropped.

use tokio::sync::broadcast;

use crate::bus::AuditEvent;
use crate::sink::AuditSink;

pub struct AuditLogger;

impl AuditLogger {
    /// Run the consume loop until the channel closes.
    pub async fn run<S: AuditSink>(sink: S, mut receiver: broadcast::Receiver<AuditEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = sink.consume(&event).await {
                        tracing::error!(
                            error = %e,
                            action = event.action.as_str(),
                            entity_type = %event.entity_type,
                            "Failed to record audit event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Audit logger lagged, some events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Audit bus closed, audit logger shutting down");
                    break;
                }
            }
        }
    }
}
