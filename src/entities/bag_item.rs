//! Bag item entity - One line of a saved bag template.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bag item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bag_items")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Template this line belongs to
    pub bag_id: i64,
    /// Catalog item packed on this line
    pub item_id: i64,
    /// Base units of the item per bag
    pub quantity: f64,
}

/// Defines relationships between `BagItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one template
    #[sea_orm(
        belongs_to = "super::bag_template::Entity",
        from = "Column::BagId",
        to = "super::bag_template::Column::Id",
        on_delete = "Cascade"
    )]
    BagTemplate,
    /// Each line references one catalog item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
}

impl Related<super::bag_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BagTemplate.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
