use crate::types::DbId;

/// Boxed cause carried by [`CoreError::Persistence`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the catalog services.
///
/// `Validation` and `NotFound` are caller errors and are never audited.
/// `Persistence` is a system failure; the service publishes exactly one
/// failure audit event before returning it.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} has not been {action}: {source}")]
    Persistence {
        entity: &'static str,
        /// Past participle of the attempted action, e.g. `"created"`.
        action: &'static str,
        #[source]
        source: BoxedCause,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a backend failure for the given entity and action.
    pub fn persistence(
        entity: &'static str,
        action: &'static str,
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self::Persistence {
            entity,
            action,
            source: source.into(),
        }
    }
}
