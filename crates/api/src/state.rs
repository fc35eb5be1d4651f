use std::sync::Arc;

use axum::extract::FromRef;
use catalog_db::models::{
    NutrientCategoryDto, NutrientCategoryRecord, NutrientDto, NutrientRecord, ProductCategoryDto,
    ProductCategoryRecord, ProductDto, ProductNutrientDto, ProductNutrientRecord, ProductRecord,
    ProductSubCategoryDto, ProductSubCategoryRecord, TreatingTypeDto, TreatingTypeRecord,
};
use catalog_db::postgres::PgRecord;
use catalog_db::{DbPool, MemoryStore, PgStore};
use catalog_events::EventBus;

use crate::config::ServerConfig;
use crate::services::resource::SharedStore;
use crate::services::ResourceService;

/// Shared application state available to all Axum handlers.
///
/// Cheaply cloneable; every field is behind an `Arc` or is already `Clone`.
/// Handlers extract the one service they need through [`FromRef`].
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Audit event bus shared by services and handlers.
    pub event_bus: Arc<EventBus>,
    /// Database pool, absent when running on in-memory stores.
    pub pool: Option<DbPool>,
    pub product_categories: Arc<ResourceService<ProductCategoryDto>>,
    pub product_sub_categories: Arc<ResourceService<ProductSubCategoryDto>>,
    pub products: Arc<ResourceService<ProductDto>>,
    pub nutrient_categories: Arc<ResourceService<NutrientCategoryDto>>,
    pub nutrients: Arc<ResourceService<NutrientDto>>,
    pub treating_types: Arc<ResourceService<TreatingTypeDto>>,
    pub product_nutrients: Arc<ResourceService<ProductNutrientDto>>,
}

/// One store per entity table.
pub struct Stores {
    pub product_categories: SharedStore<ProductCategoryRecord>,
    pub product_sub_categories: SharedStore<ProductSubCategoryRecord>,
    pub products: SharedStore<ProductRecord>,
    pub nutrient_categories: SharedStore<NutrientCategoryRecord>,
    pub nutrients: SharedStore<NutrientRecord>,
    pub treating_types: SharedStore<TreatingTypeRecord>,
    pub product_nutrients: SharedStore<ProductNutrientRecord>,
}

impl Stores {
    /// Fresh in-memory tables.
    pub fn in_memory() -> Self {
        Self {
            product_categories: Arc::new(MemoryStore::new()),
            product_sub_categories: Arc::new(MemoryStore::new()),
            products: Arc::new(MemoryStore::new()),
            nutrient_categories: Arc::new(MemoryStore::new()),
            nutrients: Arc::new(MemoryStore::new()),
            treating_types: Arc::new(MemoryStore::new()),
            product_nutrients: Arc::new(MemoryStore::new()),
        }
    }

    /// PostgreSQL-backed tables sharing one pool.
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            product_categories: pg(pool),
            product_sub_categories: pg(pool),
            products: pg(pool),
            nutrient_categories: pg(pool),
            nutrients: pg(pool),
            treating_types: pg(pool),
            product_nutrients: pg(pool),
        }
    }
}

fn pg<R: PgRecord>(pool: &DbPool) -> SharedStore<R> {
    Arc::new(PgStore::<R>::new(pool.clone()))
}

impl AppState {
    /// Wire one [`ResourceService`] per entity over the given stores.
    pub fn new(
        config: Arc<ServerConfig>,
        event_bus: Arc<EventBus>,
        pool: Option<DbPool>,
        stores: Stores,
    ) -> Self {
        let bus = || Arc::clone(&event_bus);
        Self {
            product_categories: Arc::new(ResourceService::new(stores.product_categories, bus())),
            product_sub_categories: Arc::new(ResourceService::new(
                stores.product_sub_categories,
                bus(),
            )),
            products: Arc::new(ResourceService::new(stores.products, bus())),
            nutrient_categories: Arc::new(ResourceService::new(stores.nutrient_categories, bus())),
            nutrients: Arc::new(ResourceService::new(stores.nutrients, bus())),
            treating_types: Arc::new(ResourceService::new(stores.treating_types, bus())),
            product_nutrients: Arc::new(ResourceService::new(stores.product_nutrients, bus())),
            config,
            event_bus,
            pool,
        }
    }

    /// State backed by in-memory stores.
    pub fn in_memory(config: Arc<ServerConfig>, event_bus: Arc<EventBus>) -> Self {
        Self::new(config, event_bus, None, Stores::in_memory())
    }

    /// State backed by PostgreSQL.
    pub fn postgres(config: Arc<ServerConfig>, event_bus: Arc<EventBus>, pool: DbPool) -> Self {
        let stores = Stores::postgres(&pool);
        Self::new(config, event_bus, Some(pool), stores)
    }
}
