//! Product–nutrient association: how much of a nutrient a product carries
//! for a given treating type.
//!
//! The only untitled entity; free-text queries do not filter it.

use std::cmp::Ordering;

use catalog_core::entity::EntityType;
use catalog_core::pagination::Searchable;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::rules::{non_negative, positive_id};
use catalog_core::validation::ValidationGate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nutrient::{NutrientDto, NutrientRecord};
use super::product::{ProductDto, ProductRecord};
use super::treating_type::{TreatingTypeDto, TreatingTypeRecord};
use super::{create_and_update, CatalogEntity, PersistedRecord};
use crate::mapper::{persisted_opt, transfer_opt, RecordMapper};

/// A row from the `product_nutrients` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductNutrientRecord {
    pub id: DbId,
    pub product_id: DbId,
    pub nutrient_id: DbId,
    pub treating_type_id: DbId,
    pub quality: f64,
    #[sqlx(skip)]
    pub product: Option<ProductRecord>,
    #[sqlx(skip)]
    pub nutrient: Option<NutrientRecord>,
    #[sqlx(skip)]
    pub treating_type: Option<TreatingTypeRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNutrientDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub product_id: Option<DbId>,
    #[serde(default)]
    pub nutrient_id: Option<DbId>,
    #[serde(default)]
    pub treating_type_id: Option<DbId>,
    #[serde(default)]
    pub quality: Option<f64>,
    #[serde(default)]
    pub product: Option<ProductDto>,
    #[serde(default)]
    pub nutrient: Option<NutrientDto>,
    #[serde(default)]
    pub treating_type: Option<TreatingTypeDto>,
    #[serde(default)]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub updated: Option<Timestamp>,
}

impl Searchable for ProductNutrientRecord {
    const SORT_FIELDS: &'static [&'static str] = &[
        "id",
        "productId",
        "nutrientId",
        "treatingTypeId",
        "quality",
        "created",
        "updated",
    ];

    fn search_text(&self) -> Option<&str> {
        None
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "productId" => self.product_id.cmp(&other.product_id),
            "nutrientId" => self.nutrient_id.cmp(&other.nutrient_id),
            "treatingTypeId" => self.treating_type_id.cmp(&other.treating_type_id),
            "quality" => self.quality.total_cmp(&other.quality),
            "created" => self.created_at.cmp(&other.created_at),
            "updated" => self.updated_at.cmp(&other.updated_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

impl PersistedRecord for ProductNutrientRecord {
    fn id(&self) -> DbId {
        self.id
    }

    fn assign_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: Timestamp) {
        self.updated_at = at;
    }

    fn detach_relations(&mut self) {
        self.product = None;
        self.nutrient = None;
        self.treating_type = None;
    }
}

impl RecordMapper for ProductNutrientDto {
    type Record = ProductNutrientRecord;

    fn to_transfer(record: &ProductNutrientRecord) -> Self {
        Self {
            id: Some(record.id),
            product_id: Some(record.product_id),
            nutrient_id: Some(record.nutrient_id),
            treating_type_id: Some(record.treating_type_id),
            quality: Some(record.quality),
            product: transfer_opt(record.product.as_ref()),
            nutrient: transfer_opt(record.nutrient.as_ref()),
            treating_type: transfer_opt(record.treating_type.as_ref()),
            created: Some(record.created_at),
            updated: Some(record.updated_at),
        }
    }

    fn to_persisted(&self) -> ProductNutrientRecord {
        ProductNutrientRecord {
            id: self.id.unwrap_or_default(),
            product_id: self.product_id.unwrap_or_default(),
            nutrient_id: self.nutrient_id.unwrap_or_default(),
            treating_type_id: self.treating_type_id.unwrap_or_default(),
            quality: self.quality.unwrap_or_default(),
            product: persisted_opt(self.product.as_ref()),
            nutrient: persisted_opt(self.nutrient.as_ref()),
            treating_type: persisted_opt(self.treating_type.as_ref()),
            created_at: self.created.unwrap_or_default(),
            updated_at: self.updated.unwrap_or_default(),
        }
    }
}

impl CatalogEntity for ProductNutrientDto {
    const ENTITY: EntityType = EntityType::ProductNutrient;

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn stamp_created(&mut self, at: Timestamp) {
        self.created = Some(at);
        self.updated = Some(at);
    }

    fn apply_to(&self, record: &mut ProductNutrientRecord) {
        record.product_id = self.product_id.unwrap_or_default();
        record.nutrient_id = self.nutrient_id.unwrap_or_default();
        record.treating_type_id = self.treating_type_id.unwrap_or_default();
        record.quality = self.quality.unwrap_or_default();
    }

    fn validation_gate() -> ValidationGate<Self> {
        create_and_update(
            |d: &Self| d.id,
            || {
                vec![
                    positive_id("productId", |d: &Self| d.product_id),
                    positive_id("nutrientId", |d: &Self| d.nutrient_id),
                    positive_id("treatingTypeId", |d: &Self| d.treating_type_id),
                    non_negative("quality", |d: &Self| d.quality),
                ]
            },
        )
    }
}
