//! Product subcategory, owned by a product category.

use std::cmp::Ordering;

use catalog_core::entity::EntityType;
use catalog_core::pagination::Searchable;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::rules::positive_id;
use catalog_core::validation::ValidationGate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::product_category::{ProductCategoryDto, ProductCategoryRecord};
use super::{create_and_update, title_rules, CatalogEntity, PersistedRecord};
use crate::mapper::{persisted_opt, transfer_opt, RecordMapper};

/// A row from the `product_sub_categories` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductSubCategoryRecord {
    pub id: DbId,
    pub title: String,
    pub product_category_id: DbId,
    /// Parent category, when loaded.
    #[sqlx(skip)]
    pub product_category: Option<ProductCategoryRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubCategoryDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub product_category_id: Option<DbId>,
    #[serde(default)]
    pub product_category: Option<ProductCategoryDto>,
    #[serde(default)]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub updated: Option<Timestamp>,
}

impl Searchable for ProductSubCategoryRecord {
    const SORT_FIELDS: &'static [&'static str] =
        &["id", "title", "productCategoryId", "created", "updated"];

    fn search_text(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.cmp(&other.title),
            "productCategoryId" => self.product_category_id.cmp(&other.product_category_id),
            "created" => self.created_at.cmp(&other.created_at),
            "updated" => self.updated_at.cmp(&other.updated_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

impl PersistedRecord for ProductSubCategoryRecord {
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
        self.product_category = None;
    }
}

impl RecordMapper for ProductSubCategoryDto {
    type Record = ProductSubCategoryRecord;

    fn to_transfer(record: &ProductSubCategoryRecord) -> Self {
        Self {
            id: Some(record.id),
            title: Some(record.title.clone()),
            product_category_id: Some(record.product_category_id),
            product_category: transfer_opt(record.product_category.as_ref()),
            created: Some(record.created_at),
            updated: Some(record.updated_at),
        }
    }

    fn to_persisted(&self) -> ProductSubCategoryRecord {
        ProductSubCategoryRecord {
            id: self.id.unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            product_category_id: self.product_category_id.unwrap_or_default(),
            product_category: persisted_opt(self.product_category.as_ref()),
            created_at: self.created.unwrap_or_default(),
            updated_at: self.updated.unwrap_or_default(),
        }
    }
}

impl CatalogEntity for ProductSubCategoryDto {
    const ENTITY: EntityType = EntityType::ProductSubCategory;

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn stamp_created(&mut self, at: Timestamp) {
        self.created = Some(at);
        self.updated = Some(at);
    }

    fn apply_to(&self, record: &mut ProductSubCategoryRecord) {
        record.title = self.title.clone().unwrap_or_default();
        record.product_category_id = self.product_category_id.unwrap_or_default();
    }

    fn validation_gate() -> ValidationGate<Self> {
        create_and_update(
            |d: &Self| d.id,
            || {
                let mut rules = title_rules(|d: &Self| d.title.as_deref());
                rules.push(positive_id("productCategoryId", |d: &Self| d.product_category_id));
                rules
            },
        )
    }
}
