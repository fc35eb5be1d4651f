//! Catalog records and transfer objects.
//!
//! Each module pairs a `*Record` (the row, `FromRow`) with a `*Dto` (the
//! camelCase JSON shape that crosses the service boundary) and wires them
//! together through [`RecordMapper`] and [`CatalogEntity`].

pub mod nutrient;
pub mod nutrient_category;
pub mod product;
pub mod product_category;
pub mod product_nutrient;
pub mod product_sub_category;
pub mod treating_type;

use catalog_core::entity::EntityType;
use catalog_core::pagination::Searchable;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::rules::{field_bounds, letters_only, positive_id, required_text};
use catalog_core::validation::{Rule, ValidationGate, CREATE, UPDATE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::mapper::RecordMapper;

pub use nutrient::{NutrientDto, NutrientRecord};
pub use nutrient_category::{NutrientCategoryDto, NutrientCategoryRecord};
pub use product::{ProductDto, ProductRecord};
pub use product_category::{ProductCategoryDto, ProductCategoryRecord};
pub use product_nutrient::{ProductNutrientDto, ProductNutrientRecord};
pub use product_sub_category::{ProductSubCategoryDto, ProductSubCategoryRecord};
pub use treating_type::{TreatingTypeDto, TreatingTypeRecord};

/// Sort keys shared by every titled entity.
pub(crate) const TITLED_SORT_FIELDS: &[&str] = &["id", "title", "created", "updated"];

/// A stored row with identity and audit timestamps.
pub trait PersistedRecord: Searchable + Clone + Send + Sync + 'static {
    fn id(&self) -> DbId;

    /// Set by the store on insert.
    fn assign_id(&mut self, id: DbId);

    fn created_at(&self) -> Timestamp;

    fn updated_at(&self) -> Timestamp;

    fn set_updated_at(&mut self, at: Timestamp);

    /// Drop embedded relations; only scalar columns are stored.
    fn detach_relations(&mut self) {}
}

/// A transfer type served by a resource service.
pub trait CatalogEntity:
    RecordMapper<Record: PersistedRecord> + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    const ENTITY: EntityType;

    fn id(&self) -> Option<DbId>;

    /// Set `created` and `updated` to `at`.
    fn stamp_created(&mut self, at: Timestamp);

    /// Copy the mutable fields onto a loaded record. Never touches the id or
    /// the timestamps.
    fn apply_to(&self, record: &mut Self::Record);

    /// The `"create"` and `"update"` rule sets for this type.
    fn validation_gate() -> ValidationGate<Self>;
}

/// Length bounds, presence and letters-only checks on the title.
pub(crate) fn title_rules<T: Validate + 'static>(title: fn(&T) -> Option<&str>) -> Vec<Rule<T>> {
    vec![
        field_bounds::<T>(),
        required_text("title", title),
        letters_only("title", title),
    ]
}

/// Build a gate whose update set is the create set plus a positive `id`.
pub(crate) fn create_and_update<T: 'static>(
    id: fn(&T) -> Option<DbId>,
    rules: fn() -> Vec<Rule<T>>,
) -> ValidationGate<T> {
    let mut update = vec![positive_id("id", id)];
    update.extend(rules());
    ValidationGate::new()
        .with_rule_set(CREATE, rules())
        .with_rule_set(UPDATE, update)
}
