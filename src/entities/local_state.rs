//! Local state entity - Key/value pairs kept on the client.
//! Holds the cached bag composition and the onboarding tour flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Local state database model - stores key-value pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "local_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Cache key (e.g., `"bag-composition"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Cached value stored as string
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTime,
}

/// `LocalState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
