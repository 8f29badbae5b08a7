//! Item entity - A catalog entry that can be packed into a bag.
//!
//! Each item carries a loose unit price and a bulk package price. The two are
//! stored independently; the catalog screen keeps them in step but nothing
//! here enforces `unit_price == bulk_price / units_per_bulk`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// English display name
    pub name_en: String,
    /// Price of one base unit bought loose
    pub unit_price: f64,
    /// Price of one bulk package
    pub bulk_price: f64,
    /// Base units contained in one bulk package (may be fractional)
    pub units_per_bulk: f64,
    /// Weight of one base unit in kilograms, 0 when unknown
    pub weight_kg: f64,
    /// Category tag, e.g. `"dryGoods"`; unknown values read back as `"other"`
    pub category: String,
    /// Owner of the catalog entry
    pub user_id: Option<String>,
    /// When the item was created
    pub created_at: DateTime,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item appears in many bag lines
    #[sea_orm(has_many = "super::bag_item::Entity")]
    BagItems,
}

impl Related<super::bag_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BagItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
