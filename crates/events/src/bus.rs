//! In-process audit bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is constructed once at startup and shared via
//! `Arc<EventBus>` with every resource service and the HTTP state.

use catalog_core::entity::EntityType;
use catalog_core::types::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// AuditEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

impl AuditOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// `"created"`, `"updated"`, `"deleted"`; used in error messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Outcome of a single mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub outcome: AuditOutcome,
    pub action: AuditAction,
    pub entity_type: EntityType,

    /// The mutated transfer object on success, or a diagnostic message.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl AuditEvent {
    /// A confirmed mutation; `payload` is usually the serialized transfer.
    pub fn success(
        action: AuditAction,
        entity_type: EntityType,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            outcome: AuditOutcome::Success,
            action,
            entity_type,
            payload,
            timestamp: Utc::now(),
        }
    }

    /// A failed persistence attempt, described by `message`.
    pub fn failure(action: AuditAction, entity_type: EntityType, message: impl Into<String>) -> Self {
        Self {
            outcome: AuditOutcome::Failure,
            action,
            entity_type,
            payload: serde_json::Value::String(message.into()),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out audit bus.
///
/// Publishing never blocks and never fails from the caller's side: slow or
/// failing subscribers only affect themselves.
///
/// ```rust
/// use catalog_core::entity::EntityType;
/// use catalog_events::bus::{AuditAction, AuditEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AuditEvent::failure(
///     AuditAction::Create,
///     EntityType::Product,
///     "connection refused",
/// ));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AuditEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: AuditEvent) {
        tracing::trace!(
            outcome = event.outcome.as_str(),
            action = event.action.as_str(),
            entity_type = %event.entity_type,
            "Publishing audit event"
        );
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AuditEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
