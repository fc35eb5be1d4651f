//! Generic resource service: the read pipeline and the mutation pipeline
//! every catalog entity goes through.
//!
//! Ordering within one mutation is fixed: validate, load the current row,
//! copy fields, persist, and only then publish a failure event if the store
//! rejected the write. Success events are published by the HTTP layer once
//! the service returns.

use std::future::Future;
use std::sync::Arc;

use catalog_core::error::CoreError;
use catalog_core::pagination::{paginate, PaginationRequest, PaginationResponse};
use catalog_core::types::{timestamp_after, DbId};
use catalog_core::validation::{ValidationGate, CREATE, UPDATE};
use catalog_db::mapper::{transfer_all, transfer_opt, RecordMapper};
use catalog_db::models::{CatalogEntity, PersistedRecord};
use catalog_db::{Store, StoreError};
use catalog_events::{AuditAction, AuditEvent, EventBus};
use chrono::Utc;

/// Shared handle to a record store.
pub type SharedStore<R> = Arc<dyn Store<R>>;

/// CRUD, pagination and audit wiring for one entity type.
pub struct ResourceService<E: CatalogEntity> {
    store: SharedStore<E::Record>,
    gate: ValidationGate<E>,
    events: Arc<EventBus>,
}

impl<E: CatalogEntity> ResourceService<E> {
    pub fn new(store: SharedStore<E::Record>, events: Arc<EventBus>) -> Self {
        Self {
            store,
            gate: E::validation_gate(),
            events,
        }
    }

    /// Every record, in store (id) order.
    pub async fn get_all(&self) -> Result<Vec<E>, CoreError> {
        let records = self.store.list().await.map_err(read_error::<E>)?;
        Ok(transfer_all(&records))
    }

    /// Filtered, sorted and sliced page plus the filtered total.
    pub async fn get_pagination(
        &self,
        request: &PaginationRequest,
    ) -> Result<PaginationResponse<E>, CoreError> {
        let records = self.store.list().await.map_err(read_error::<E>)?;
        Ok(paginate(records, request, E::to_transfer))
    }

    /// A missing id is a validation error; a missing record is `Ok(None)`.
    pub async fn get_by_id(&self, id: Option<DbId>) -> Result<Option<E>, CoreError> {
        let id = id.ok_or_else(|| {
            CoreError::Validation(format!("{} id can't be null", entity_name::<E>()))
        })?;
        let record = self.store.find_by_id(id).await.map_err(read_error::<E>)?;
        Ok(transfer_opt(record.as_ref()))
    }

    /// Validate, stamp `created == updated == now`, and insert.
    pub async fn create(&self, mut input: E) -> Result<E, CoreError> {
        self.gate.validate(&input, CREATE)?;

        input.stamp_created(Utc::now());
        let record = input.to_persisted();

        let stored = self
            .persist(AuditAction::Create, move |store| async move {
                store.add(record).await
            })
            .await?;

        tracing::debug!(entity = %E::ENTITY, id = stored.id(), "Created record");
        Ok(E::to_transfer(&stored))
    }

    /// Validate, load by id, copy the mutable fields, bump `updated`, save.
    pub async fn update(&self, input: E) -> Result<E, CoreError> {
        self.gate.validate(&input, UPDATE)?;

        let id = input.id().ok_or_else(|| {
            CoreError::Validation(format!("{} id can't be null", entity_name::<E>()))
        })?;
        let mut record = self.load_for(AuditAction::Update, id).await?;

        input.apply_to(&mut record);
        record.set_updated_at(timestamp_after(record.updated_at()));

        let stored = self
            .persist(AuditAction::Update, move |store| async move {
                store.update(record).await
            })
            .await?;

        tracing::debug!(entity = %E::ENTITY, id, "Updated record");
        Ok(E::to_transfer(&stored))
    }

    /// Load by id and hard-delete.
    pub async fn delete(&self, id: Option<DbId>) -> Result<(), CoreError> {
        let id = id.ok_or_else(|| {
            CoreError::Validation(format!("Invalid {} id", entity_name::<E>().to_lowercase()))
        })?;
        let record = self.load_for(AuditAction::Delete, id).await?;

        self.persist(AuditAction::Delete, move |store| async move {
            store.remove(record).await
        })
        .await?;

        tracing::debug!(entity = %E::ENTITY, id, "Deleted record");
        Ok(())
    }

    /// Fetch the row a mutation targets. Absence is the caller's fault and is
    /// not audited; a store failure is.
    async fn load_for(&self, action: AuditAction, id: DbId) -> Result<E::Record, CoreError> {
        let store = Arc::clone(&self.store);
        self.persist(action, move |_| async move { store.find_by_id(id).await })
            .await?
            .ok_or(CoreError::NotFound {
                entity: entity_name::<E>(),
                id,
            })
    }

    /// Run a store operation and, if the backend fails, publish exactly one
    /// failure event before returning the error. A row that vanished before
    /// the write surfaces as `NotFound` and is not audited.
    ///
    /// The operation and the failure event run together on a spawned task,
    /// so dropping the caller's future cannot separate the two.
    async fn persist<T, F, Fut>(&self, action: AuditAction, op: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(SharedStore<E::Record>) -> Fut,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        let entity = E::ENTITY;
        let events = Arc::clone(&self.events);
        let operation = op(Arc::clone(&self.store));

        let task = tokio::spawn(async move {
            let result = operation.await;
            // A row deleted between load and write is the caller's not-found,
            // not a backend failure.
            if let Err(e @ (StoreError::Database(_) | StoreError::Rejected(_))) = &result {
                tracing::error!(
                    error = %e,
                    entity = %entity,
                    action = action.as_str(),
                    "Changes were not saved in the database"
                );
                events.publish(AuditEvent::failure(
                    action,
                    entity,
                    format!("Changes were not saved in the database: {e}"),
                ));
            }
            result
        });

        match task.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(StoreError::Missing(id))) => Err(CoreError::NotFound {
                entity: entity_name::<E>(),
                id,
            }),
            Ok(Err(e)) => Err(CoreError::persistence(
                entity_name::<E>(),
                action.past_tense(),
                e,
            )),
            Err(join) => Err(CoreError::Internal(format!(
                "{} persistence task failed: {join}",
                entity_name::<E>()
            ))),
        }
    }
}

fn entity_name<E: CatalogEntity>() -> &'static str {
    E::ENTITY.display_name()
}

/// Store failure on a read-only path. Reads are not audited.
fn read_error<E: CatalogEntity>(e: StoreError) -> CoreError {
    CoreError::persistence(entity_name::<E>(), "loaded", e)
}
