//! Nutrient category (vitamins, minerals, ...).

use std::cmp::Ordering;

use catalog_core::entity::EntityType;
use catalog_core::pagination::Searchable;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::ValidationGate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{create_and_update, title_rules, CatalogEntity, PersistedRecord, TITLED_SORT_FIELDS};
use crate::mapper::RecordMapper;

/// A row from the `nutrient_categories` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct NutrientCategoryRecord {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NutrientCategoryDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub updated: Option<Timestamp>,
}

impl Searchable for NutrientCategoryRecord {
    const SORT_FIELDS: &'static [&'static str] = TITLED_SORT_FIELDS;

    fn search_text(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.cmp(&other.title),
            "created" => self.created_at.cmp(&other.created_at),
            "updated" => self.updated_at.cmp(&other.updated_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

impl PersistedRecord for NutrientCategoryRecord {
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
}

impl RecordMapper for NutrientCategoryDto {
    type Record = NutrientCategoryRecord;

    fn to_transfer(record: &NutrientCategoryRecord) -> Self {
        Self {
            id: Some(record.id),
            title: Some(record.title.clone()),
            created: Some(record.created_at),
            updated: Some(record.updated_at),
        }
    }

    fn to_persisted(&self) -> NutrientCategoryRecord {
        NutrientCategoryRecord {
            id: self.id.unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            created_at: self.created.unwrap_or_default(),
            updated_at: self.updated.unwrap_or_default(),
        }
    }
}

impl CatalogEntity for NutrientCategoryDto {
    const ENTITY: EntityType = EntityType::NutrientCategory;

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn stamp_created(&mut self, at: Timestamp) {
        self.created = Some(at);
        self.updated = Some(at);
    }

    fn apply_to(&self, record: &mut NutrientCategoryRecord) {
        record.title = self.title.clone().unwrap_or_default();
    }

    fn validation_gate() -> ValidationGate<Self> {
        create_and_update(|d: &Self| d.id, || title_rules(|d: &Self| d.title.as_deref()))
    }
}
