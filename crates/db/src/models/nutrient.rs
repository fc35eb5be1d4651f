//! Nutrient, grouped under a nutrient category, with a recommended daily dose.

use std::cmp::Ordering;

use catalog_core::entity::EntityType;
use catalog_core::pagination::Searchable;
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::rules::{non_negative, positive_id};
use catalog_core::validation::ValidationGate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::nutrient_category::{NutrientCategoryDto, NutrientCategoryRecord};
use super::{create_and_update, title_rules, CatalogEntity, PersistedRecord};
use crate::mapper::{persisted_opt, transfer_opt, RecordMapper};

/// A row from the `nutrients` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct NutrientRecord {
    pub id: DbId,
    pub title: String,
    pub daily_dose: f64,
    pub nutrient_category_id: DbId,
    #[sqlx(skip)]
    pub nutrient_category: Option<NutrientCategoryRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NutrientDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub daily_dose: Option<f64>,
    #[serde(default)]
    pub nutrient_category_id: Option<DbId>,
    #[serde(default)]
    pub nutrient_category: Option<NutrientCategoryDto>,
    #[serde(default)]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub updated: Option<Timestamp>,
}

impl Searchable for NutrientRecord {
    const SORT_FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "dailyDose",
        "nutrientCategoryId",
        "created",
        "updated",
    ];

    fn search_text(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.cmp(&other.title),
            "dailyDose" => self.daily_dose.total_cmp(&other.daily_dose),
            "nutrientCategoryId" => self.nutrient_category_id.cmp(&other.nutrient_category_id),
            "created" => self.created_at.cmp(&other.created_at),
            "updated" => self.updated_at.cmp(&other.updated_at),
            _ => self.id.cmp(&other.id),
        }
    }
}

impl PersistedRecord for NutrientRecord {
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
        self.nutrient_category = None;
    }
}

impl RecordMapper for NutrientDto {
    type Record = NutrientRecord;

    fn to_transfer(record: &NutrientRecord) -> Self {
        Self {
            id: Some(record.id),
            title: Some(record.title.clone()),
            daily_dose: Some(record.daily_dose),
            nutrient_category_id: Some(record.nutrient_category_id),
            nutrient_category: transfer_opt(record.nutrient_category.as_ref()),
            created: Some(record.created_at),
            updated: Some(record.updated_at),
        }
    }

    fn to_persisted(&self) -> NutrientRecord {
        NutrientRecord {
            id: self.id.unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            daily_dose: self.daily_dose.unwrap_or_default(),
            nutrient_category_id: self.nutrient_category_id.unwrap_or_default(),
            nutrient_category: persisted_opt(self.nutrient_category.as_ref()),
            created_at: self.created.unwrap_or_default(),
            updated_at: self.updated.unwrap_or_default(),
        }
    }
}

impl CatalogEntity for NutrientDto {
    const ENTITY: EntityType = EntityType::Nutrient;

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn stamp_created(&mut self, at: Timestamp) {
        self.created = Some(at);
        self.updated = Some(at);
    }

    fn apply_to(&self, record: &mut NutrientRecord) {
        record.title = self.title.clone().unwrap_or_default();
        record.daily_dose = self.daily_dose.unwrap_or_default();
        record.nutrient_category_id = self.nutrient_category_id.unwrap_or_default();
    }

    fn validation_gate() -> ValidationGate<Self> {
        create_and_update(
            |d: &Self| d.id,
            || {
                let mut rules = title_rules(|d: &Self| d.title.as_deref());
                rules.push(non_negative("dailyDose", |d: &Self| d.daily_dose));
                rules.push(positive_id("nutrientCategoryId", |d: &Self| {
                    d.nutrient_category_id
                }));
                rules
            },
        )
    }
}
