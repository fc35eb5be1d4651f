//! Product, owned by a product subcategory.

use std::cmp::Ordering;

use catalog_core::entity::EntityType;
use catalog_core::pagination::Searchable;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::rules::positive_id;
use catalog_core::validation::ValidationGate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::product_sub_category::{ProductSubCategoryDto, ProductSubCategoryRecord};
use super::{create_and_update, title_rules, CatalogEntity, PersistedRecord};
use crate::mapper::{persisted_opt, transfer_opt, RecordMapper};

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductRecord {
    pub id: DbId,
    pub title: String,
    pub product_sub_category_id: DbId,
    /// Parent subcategory, when loaded.
    #[sqlx(skip)]
    pub product_sub_category: Option<ProductSubCategoryRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub product_sub_category_id: Option<DbId>,
    #[serde(default)]
    pub product_sub_category: Option<ProductSubCategoryDto>,
    #[serde(default)]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub updated: Option<Timestamp>,
}

impl Searchable for ProductRecord {
    const SORT_FIELDS: &'static [&'static str] =
        &["id", "title", "productSubCategoryId", "created", "updated"];

    fn search_text(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.cmp(&other.title),
            "productSubCategoryId" => self
                .product_sub_category_id
                .cmp(&other.product_sub_category_id),
            "created" => self.created_at.cmp(&other.created_at),
            "updated" => self.updated_at.cmp(&other.updated_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

impl PersistedRecord for ProductRecord {
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
        self.product_sub_category = None;
    }
}

impl RecordMapper for ProductDto {
    type Record = ProductRecord;

    fn to_transfer(record: &ProductRecord) -> Self {
        Self {
            id: Some(record.id),
            title: Some(record.title.clone()),
            product_sub_category_id: Some(record.product_sub_category_id),
            product_sub_category: transfer_opt(record.product_sub_category.as_ref()),
            created: Some(record.created_at),
            updated: Some(record.updated_at),
        }
    }

    fn to_persisted(&self) -> ProductRecord {
        ProductRecord {
            id: self.id.unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            product_sub_category_id: self.product_sub_category_id.unwrap_or_default(),
            product_sub_category: persisted_opt(self.product_sub_category.as_ref()),
            created_at: self.created.unwrap_or_default(),
            updated_at: self.updated.unwrap_or_default(),
        }
    }
}

impl CatalogEntity for ProductDto {
    const ENTITY: EntityType = EntityType::Product;

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn stamp_created(&mut self, at: Timestamp) {
        self.created = Some(at);
        self.updated = Some(at);
    }

    fn apply_to(&self, record: &mut ProductRecord) {
        record.title = self.title.clone().unwrap_or_default();
        record.product_sub_category_id = self.product_sub_category_id.unwrap_or_default();
    }

    fn validation_gate() -> ValidationGate<Self> {
        create_and_update(
            |d: &Self| d.id,
            || {
                let mut rules = title_rules(|d: &Self| d.title.as_deref());
                rules.push(positive_id("productSubCategoryId", |d: &Self| {
                    d.product_sub_category_id
                }));
                rules
            },
        )
    }
}
