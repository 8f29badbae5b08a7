//! Entity module - Contains all SeaORM entity definitions for the database.
//! `items`, `bag_templates` and `bag_items` form the shared catalog;
//! `local_state` lives in the client-local cache database.

pub mod bag_item;
pub mod bag_template;
pub mod item;
pub mod local_state;

// Re-export specific types to avoid conflicts
pub use bag_item::{Column as BagItemColumn, Entity as BagItem, Model as BagItemModel};
pub use bag_template::{
    Column as BagTemplateColumn, Entity as BagTemplate, Model as BagTemplateModel,
};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use local_state::{
    Column as LocalStateColumn, Entity as LocalState, Model as LocalStateModel,
};
