//! Typed domain records.
//!
//! Rows read through the catalog are mapped into these types at the store
//! boundary, so the planning code never touches entity models directly.

use crate::entities::{bag_item, bag_template, item};
use crate::errors::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of item categories offered by the catalog screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Rice, lentils, flour and other dry staples
    DryGoods,
    /// Oil, milk, juice
    Liquids,
    /// Tinned food
    Canned,
    /// Whole grains
    Grains,
    /// Salt, spices, seasoning
    Spices,
    /// Meat and poultry
    Meat,
    /// Bags, boxes and wrapping
    Packaging,
    /// Anything else
    #[default]
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 8] = [
        Self::DryGoods,
        Self::Liquids,
        Self::Canned,
        Self::Grains,
        Self::Spices,
        Self::Meat,
        Self::Packaging,
        Self::Other,
    ];

    /// The tag stored in the `items.category` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DryGoods => "dryGoods",
            Self::Liquids => "liquids",
            Self::Canned => "canned",
            Self::Grains => "grains",
            Self::Spices => "spices",
            Self::Meat => "meat",
            Self::Packaging => "packaging",
            Self::Other => "other",
        }
    }

    /// Parses a stored tag. Unknown or empty tags become [`Category::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == tag.trim())
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language used when picking an item's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog identifier
    pub id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// English display name
    pub name_en: String,
    /// Price per base unit bought loose
    pub unit_price: f64,
    /// Price per bulk package
    pub bulk_price: f64,
    /// Base units in one bulk package
    pub units_per_bulk: f64,
    /// Kilograms per base unit
    #[serde(default)]
    pub weight_kg: f64,
    /// Category tag
    #[serde(default)]
    pub category: Category,
}

impl Item {
    /// Name to show for the given locale.
    #[must_use]
    pub fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name_en,
            Locale::Ar => &self.name_ar,
        }
    }
}

impl From<item::Model> for Item {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name_ar: model.name_ar,
            name_en: model.name_en,
            unit_price: model.unit_price,
            bulk_price: model.bulk_price,
            units_per_bulk: model.units_per_bulk,
            weight_kg: model.weight_kg,
            category: Category::from_tag(&model.category),
        }
    }
}

/// Fields used to create or edit a catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Arabic display name
    pub name_ar: String,
    /// English display name
    pub name_en: String,
    /// Price per base unit bought loose
    pub unit_price: f64,
    /// Price per bulk package
    pub bulk_price: f64,
    /// Base units in one bulk package
    pub units_per_bulk: f64,
    /// Kilograms per base unit
    pub weight_kg: f64,
    /// Category tag
    pub category: Category,
}

impl NewItem {
    /// Checks the catalog invariants: both names present, prices and weight
    /// finite and non-negative, package size finite and positive.
    ///
    /// # Errors
    /// Returns `Error::InvalidName` for a blank name and
    /// `Error::InvalidAmount` for the first out-of-range number.
    pub fn validate(&self) -> Result<()> {
        if self.name_ar.trim().is_empty() {
            return Err(Error::InvalidName {
                message: "Arabic name cannot be empty".to_string(),
            });
        }
        if self.name_en.trim().is_empty() {
            return Err(Error::InvalidName {
                message: "English name cannot be empty".to_string(),
            });
        }

        for amount in [self.unit_price, self.bulk_price, self.weight_kg] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::InvalidAmount { amount });
            }
        }

        if !self.units_per_bulk.is_finite() || self.units_per_bulk <= 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.units_per_bulk,
            });
        }

        Ok(())
    }
}

/// One item in a bag together with how many units go into each bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagLine {
    /// Base units per bag; fractional values are allowed
    pub quantity: f64,
    /// The packed item
    pub item: Item,
}

impl BagLine {
    /// Cost of this line for a single bag, priced at the loose unit price.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.quantity * self.item.unit_price
    }
}

/// A saved bag composition.
#[derive(Debug, Clone, PartialEq)]
pub struct BagTemplate {
    /// Template identifier
    pub id: i64,
    /// Name given when saving
    pub name: String,
    /// Target bag count at save time
    pub target_count: u64,
    /// Total budget at save time
    pub total_budget: f64,
    /// Owner
    pub user_id: String,
    /// When it was saved
    pub created_at: NaiveDateTime,
}

impl From<bag_template::Model> for BagTemplate {
    fn from(model: bag_template::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            target_count: u64::try_from(model.target_count).unwrap_or_default(),
            total_budget: model.total_budget,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

/// Fields used to save a new template.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    /// Template name
    pub name: String,
    /// Target bag count
    pub target_count: u64,
    /// Total budget
    pub total_budget: f64,
}

/// A persisted template line as stored: item reference and quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateLine {
    /// Referenced catalog item
    pub item_id: i64,
    /// Base units per bag
    pub quantity: f64,
}

impl From<bag_item::Model> for TemplateLine {
    fn from(model: bag_item::Model) -> Self {
        Self {
            item_id: model.item_id,
            quantity: model.quantity,
        }
    }
}

impl From<&BagLine> for TemplateLine {
    fn from(line: &BagLine) -> Self {
        Self {
            item_id: line.item.id,
            quantity: line.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sample_new_item;

    #[test]
    fn test_category_round_trips_through_tag() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.as_str()), category);
        }
    }

    #[test]
    fn test_unknown_category_tag_is_other() {
        assert_eq!(Category::from_tag("frozen"), Category::Other);
        assert_eq!(Category::from_tag(""), Category::Other);
    }

    #[test]
    fn test_new_item_validation() {
        assert!(sample_new_item("Rice", 2.0).validate().is_ok());

        let mut blank_name = sample_new_item("Rice", 2.0);
        blank_name.name_en = "  ".to_string();
        assert!(matches!(
            blank_name.validate(),
            Err(Error::InvalidName { .. })
        ));

        let mut negative_price = sample_new_item("Rice", 2.0);
        negative_price.bulk_price = -1.0;
        assert!(matches!(
            negative_price.validate(),
            Err(Error::InvalidAmount { amount }) if amount == -1.0
        ));

        let mut empty_package = sample_new_item("Rice", 2.0);
        empty_package.units_per_bulk = 0.0;
        assert!(matches!(
            empty_package.validate(),
            Err(Error::InvalidAmount { .. })
        ));

        let mut nan_weight = sample_new_item("Rice", 2.0);
        nan_weight.weight_kg = f64::NAN;
        assert!(nan_weight.validate().is_err());
    }

    #[test]
    fn test_display_name_by_locale() {
        let mut item = crate::test_utils::sample_item(1, "Rice", 2.0);
        item.name_ar = "أرز".to_string();
        assert_eq!(item.display_name(Locale::En), "Rice");
        assert_eq!(item.display_name(Locale::Ar), "أرز");
    }

    #[test]
    fn test_template_with_negative_target_maps_to_zero() {
        let model = bag_template::Model {
            id: 7,
            name: "Ramadan".to_string(),
            target_count: -3,
            total_budget: 100.0,
            user_id: "u1".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        let template = BagTemplate::from(model);
        assert_eq!(template.target_count, 0);
        assert_eq!(template.total_budget, 100.0);
    }
}
