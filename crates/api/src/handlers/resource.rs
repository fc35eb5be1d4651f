//! Generic CRUD handlers shared by every catalog entity.
//!
//! Each handler is instantiated per entity type by
//! [`routes::resource::router`](crate::routes::resource::router). A success
//! audit event is published only after the service call returns `Ok`;
//! failure events come from the service itself.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::pagination::PaginationRequest;
use catalog_core::types::DbId;
use catalog_db::models::CatalogEntity;
use catalog_events::{AuditAction, AuditEvent, EventBus};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::services::ResourceService;

type Service<E> = State<Arc<ResourceService<E>>>;

/// GET /api/v1/{entity}
pub async fn list<E: CatalogEntity>(State(service): Service<E>) -> AppResult<impl IntoResponse> {
    let items = service.get_all().await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/{entity}/pagination
///
/// Free-text filter, sort, skip/take. `total` counts the filtered set
/// before slicing.
pub async fn paginate<E: CatalogEntity>(
    State(service): Service<E>,
    request: Result<Json<PaginationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = request.map_err(bad_body)?;
    let page = service.get_pagination(&request).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/{entity}/{id}
pub async fn get_by_id<E: CatalogEntity>(
    State(service): Service<E>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id.map_err(bad_path)?;
    let item = service
        .get_by_id(Some(id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: E::ENTITY.display_name(),
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/{entity}
pub async fn create<E: CatalogEntity>(
    State(service): Service<E>,
    State(events): State<Arc<EventBus>>,
    input: Result<Json<E>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input.map_err(bad_body)?;
    let created = service.create(input).await?;

    publish_success(&events, AuditAction::Create, &created);
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/{entity}
///
/// The target id travels in the body.
pub async fn update<E: CatalogEntity>(
    State(service): Service<E>,
    State(events): State<Arc<EventBus>>,
    input: Result<Json<E>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input.map_err(bad_body)?;
    let updated = service.update(input).await?;

    publish_success(&events, AuditAction::Update, &updated);
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/{entity}/{id}
pub async fn delete<E: CatalogEntity>(
    State(service): Service<E>,
    State(events): State<Arc<EventBus>>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = id.map_err(bad_path)?;
    service.delete(Some(id)).await?;

    events.publish(AuditEvent::success(
        AuditAction::Delete,
        E::ENTITY,
        serde_json::Value::String(format!("with ID: {id}")),
    ));
    Ok(StatusCode::NO_CONTENT)
}

fn publish_success<E: CatalogEntity>(events: &EventBus, action: AuditAction, item: &E) {
    let payload = serde_json::to_value(item).unwrap_or_else(|e| {
        tracing::warn!(error = %e, entity = %E::ENTITY, "Failed to serialize audit payload");
        serde_json::Value::Null
    });
    events.publish(AuditEvent::success(action, E::ENTITY, payload));
}

fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

fn bad_path(rejection: PathRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
