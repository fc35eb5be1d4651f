use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use catalog_db::models::CatalogEntity;

use crate::handlers::resource;
use crate::services::ResourceService;
use crate::state::AppState;

/// Routes for one entity type, mounted under its plural path.
///
/// ```text
/// GET    /              list
/// POST   /              create
/// PUT    /              update (id in body)
/// POST   /pagination    filtered page
/// GET    /{id}          get by id
/// DELETE /{id}          delete
/// ```
pub fn router<E>() -> Router<AppState>
where
    E: CatalogEntity,
    Arc<ResourceService<E>>: FromRef<AppState>,
{
    Router::new()
        .route(
            "/",
            get(resource::list::<E>)
                .post(resource::create::<E>)
                .put(resource::update::<E>),
        )
        .route("/pagination", post(resource::paginate::<E>))
        .route(
            "/{id}",
            get(resource::get_by_id::<E>).delete(resource::delete::<E>),
        )
}
