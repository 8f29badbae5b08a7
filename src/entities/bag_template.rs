//! Bag template entity - A named, saved bag composition.
//!
//! The lines of a template live in `bag_items`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bag template database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bag_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name given when the bag was saved
    pub name: String,
    /// Number of bags the user was aiming for
    pub target_count: i64,
    /// Budget available for the whole run
    pub total_budget: f64,
    /// User who saved the template
    pub user_id: String,
    /// When the template was saved
    pub created_at: DateTime,
}

/// Defines relationships between `BagTemplate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template has many lines
    #[sea_orm(has_many = "super::bag_item::Entity")]
    BagItems,
}

impl Related<super::bag_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BagItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
