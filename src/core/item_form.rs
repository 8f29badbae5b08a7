//! Item entry form - the text state behind the catalog add/edit dialog.
//!
//! The three price fields are linked: typing a bulk price or package size
//! rewrites the unit price, typing a unit price rewrites the bulk price. The
//! stored item keeps both prices, so they can still diverge afterwards.

use crate::core::money::{parse_amount, unit_price};
use crate::errors::Result;
use crate::models::{Category, Item, NewItem};

/// Raw text of the item dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemForm {
    /// Arabic name
    pub name_ar: String,
    /// English name
    pub name_en: String,
    /// Bulk package price text
    pub bulk_price: String,
    /// Units per package text
    pub units_per_bulk: String,
    /// Unit price text
    pub unit_price: String,
    /// Weight per unit text, in kilograms
    pub weight_kg: String,
    /// Selected category
    pub category: Category,
}

impl ItemForm {
    /// A blank form for a new item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing item, for editing.
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        Self {
            name_ar: item.name_ar.clone(),
            name_en: item.name_en.clone(),
            bulk_price: item.bulk_price.to_string(),
            units_per_bulk: item.units_per_bulk.to_string(),
            unit_price: item.unit_price.to_string(),
            weight_kg: item.weight_kg.to_string(),
            category: item.category,
        }
    }

    /// Bulk price edited: recompute the unit price from it.
    pub fn set_bulk_price(&mut self, text: &str) {
        self.bulk_price = text.to_string();
        self.unit_price = derived_text(unit_price(self.bulk_amount(), self.units_amount()));
    }

    /// Package size edited: recompute the unit price.
    pub fn set_units_per_bulk(&mut self, text: &str) {
        self.units_per_bulk = text.to_string();
        self.unit_price = derived_text(unit_price(self.bulk_amount(), self.units_amount()));
    }

    /// Unit price edited: recompute the bulk price from it.
    pub fn set_unit_price(&mut self, text: &str) {
        self.unit_price = text.to_string();
        let unit = parse_amount(text).unwrap_or(0.0);
        self.bulk_price = derived_text(unit * self.units_amount());
    }

    /// Converts the text into item fields.
    ///
    /// Unreadable bulk price or weight count as 0, an unreadable or zero
    /// package size counts as 1, and an entered unit price wins over the one
    /// derived from the bulk price.
    ///
    /// # Errors
    /// Returns the validation error of [`NewItem::validate`].
    pub fn to_new_item(&self) -> Result<NewItem> {
        let bulk_price = self.bulk_amount();
        let units_per_bulk = self.units_amount();
        let unit_price = if self.unit_price.trim().is_empty() {
            unit_price(bulk_price, units_per_bulk)
        } else {
            parse_amount(&self.unit_price).unwrap_or(0.0)
        };

        let item = NewItem {
            name_ar: self.name_ar.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
            unit_price,
            bulk_price,
            units_per_bulk,
            weight_kg: parse_amount(&self.weight_kg).unwrap_or(0.0),
            category: self.category,
        };
        item.validate()?;
        Ok(item)
    }

    fn bulk_amount(&self) -> f64 {
        parse_amount(&self.bulk_price).unwrap_or(0.0)
    }

    fn units_amount(&self) -> f64 {
        parse_amount(&self.units_per_bulk)
            .filter(|units| *units != 0.0)
            .unwrap_or(1.0)
    }
}

/// Two-decimal text for a derived price, blank when it is not positive.
fn derived_text(value: f64) -> String {
    if value > 0.0 {
        format!("{value:.2}")
    } else {
        String::new()
    }
}
