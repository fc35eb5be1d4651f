pub mod health;
pub mod resource;

use axum::Router;
use catalog_db::models::{
    NutrientCategoryDto, NutrientDto, ProductCategoryDto, ProductDto, ProductNutrientDto,
    ProductSubCategoryDto, TreatingTypeDto,
};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every entity mounts the same six routes:
///
/// ```text
/// /{entity}                  GET list, POST create, PUT update
/// /{entity}/pagination       POST filtered page
/// /{entity}/{id}             GET by id, DELETE
/// ```
///
/// Entities: `product-categories`, `product-subcategories`, `products`,
/// `nutrient-categories`, `nutrients`, `treating-types`, `product-nutrients`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/product-categories",
            resource::router::<ProductCategoryDto>(),
        )
        .nest(
            "/product-subcategories",
            resource::router::<ProductSubCategoryDto>(),
        )
        .nest("/products", resource::router::<ProductDto>())
        .nest(
            "/nutrient-categories",
            resource::router::<NutrientCategoryDto>(),
        )
        .nest("/nutrients", resource::router::<NutrientDto>())
        .nest("/treating-types", resource::router::<TreatingTypeDto>())
        .nest(
            "/product-nutrients",
            resource::router::<ProductNutrientDto>(),
        )
}
