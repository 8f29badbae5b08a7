//! Shared test utilities for the bag planner.
//!
//! This module provides common helper functions for setting up test databases
//! and building catalog records with sensible defaults.

use crate::{
    core::{
        cache::SqliteCache,
        catalog,
        identity::{IdentityProvider, LocalIdentity, User},
    },
    errors::Result,
    models::{BagLine, BagTemplate, Category, Item, NewItem, NewTemplate},
};
use sea_orm::DatabaseConnection;

/// Owner id used for rows created in tests.
pub const TEST_USER: &str = "test_user";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a local cache over its own in-memory database.
pub async fn setup_test_cache() -> Result<SqliteCache> {
    SqliteCache::open("sqlite::memory:").await
}

/// Installs a test subscriber so `tracing` output shows up with `--nocapture`.
/// Safe to call from several tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// A local identity already signed in as [`TEST_USER`].
pub async fn signed_in_identity() -> Result<LocalIdentity> {
    let mut identity = LocalIdentity::new();
    identity.register(
        User {
            id: TEST_USER.to_string(),
            email: "test@example.org".to_string(),
        },
        "password",
    );
    identity.sign_in("test@example.org", "password").await?;
    Ok(identity)
}

/// Item fields with sensible defaults.
///
/// # Defaults
/// * `name_ar`: `"{name} (ar)"`
/// * `units_per_bulk`: 10
/// * `bulk_price`: ten times `unit_price`
/// * `weight_kg`: 0
/// * `category`: dry goods
#[must_use]
pub fn sample_new_item(name: &str, unit_price: f64) -> NewItem {
    NewItem {
        name_ar: format!("{name} (ar)"),
        name_en: name.to_string(),
        unit_price,
        bulk_price: unit_price * 10.0,
        units_per_bulk: 10.0,
        weight_kg: 0.0,
        category: Category::DryGoods,
    }
}

/// An in-memory catalog item with the same defaults as [`sample_new_item`].
#[must_use]
pub fn sample_item(id: i64, name: &str, unit_price: f64) -> Item {
    let fields = sample_new_item(name, unit_price);
    Item {
        id,
        name_ar: fields.name_ar,
        name_en: fields.name_en,
        unit_price: fields.unit_price,
        bulk_price: fields.bulk_price,
        units_per_bulk: fields.units_per_bulk,
        weight_kg: fields.weight_kg,
        category: fields.category,
    }
}

/// A bag line holding `quantity` units of `item`.
#[must_use]
pub fn line(item: Item, quantity: f64) -> BagLine {
    BagLine { quantity, item }
}

/// An in-memory template owned by [`TEST_USER`].
#[must_use]
pub fn sample_template(id: i64, name: &str, target_count: u64, total_budget: f64) -> BagTemplate {
    BagTemplate {
        id,
        name: name.to_string(),
        target_count,
        total_budget,
        user_id: TEST_USER.to_string(),
        created_at: chrono::Utc::now().naive_utc(),
    }
}

/// Inserts a catalog item with [`sample_new_item`] defaults.
pub async fn create_test_item(db: &DatabaseConnection, name: &str, unit_price: f64) -> Result<Item> {
    catalog::create_item(db, &sample_new_item(name, unit_price), TEST_USER).await
}

/// Inserts a template with a target of 10 bags and a budget of 100.
pub async fn create_test_template(db: &DatabaseConnection, name: &str) -> Result<BagTemplate> {
    catalog::create_template(
        db,
        &NewTemplate {
            name: name.to_string(),
            target_count: 10,
            total_budget: 100.0,
        },
        TEST_USER,
    )
    .await
}
