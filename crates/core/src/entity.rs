//! Entity-type tags for the catalog resources.

use serde::{Deserialize, Serialize};

/// The seven catalog resources.
///
/// Serialized in `snake_case`; used as the `entity_type` of audit events and
/// as the entity name in [`CoreError`](crate::error::CoreError) messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    ProductCategory,
    ProductSubCategory,
    Product,
    NutrientCategory,
    Nutrient,
    TreatingType,
    ProductNutrient,
}

impl EntityType {
    /// Stable machine name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductCategory => "product_category",
            Self::ProductSubCategory => "product_sub_category",
            Self::Product => "product",
            Self::NutrientCategory => "nutrient_category",
            Self::Nutrient => "nutrient",
            Self::TreatingType => "treating_type",
            Self::ProductNutrient => "product_nutrient",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ProductCategory => "Product category",
            Self::ProductSubCategory => "Product subcategory",
            Self::Product => "Product",
            Self::NutrientCategory => "Nutrient category",
            Self::Nutrient => "Nutrient",
            Self::TreatingType => "Treating type",
            Self::ProductNutrient => "Product-nutrient",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_name() {
        for entity in [
            EntityType::ProductCategory,
            EntityType::ProductSubCategory,
            EntityType::Product,
            EntityType::NutrientCategory,
            EntityType::Nutrient,
            EntityType::TreatingType,
            EntityType::ProductNutrient,
        ] {
            let json = serde_json::to_value(entity).unwrap();
            assert_eq!(json, entity.as_str());
        }
    }
}
