//! Planner configuration loading from config.toml
//!
//! The file carries the transport capacity used for truck estimates and an
//! optional list of catalog items. Those items seed the catalog the first
//! time the planner runs against an empty database.

use crate::{
    core::{catalog::CatalogStore, money, procurement::DEFAULT_TRANSPORT_CAPACITY_KG},
    errors::{Error, Result},
    models::{Category, NewItem},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Owner recorded on items created from config.toml.
pub const SEED_OWNER: &str = "config";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Load capacity of one transport unit, in kilograms
    #[serde(default = "default_transport_capacity")]
    pub transport_capacity_kg: f64,
    /// Catalog items to seed into an empty catalog
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport_capacity_kg: DEFAULT_TRANSPORT_CAPACITY_KG,
            items: Vec::new(),
        }
    }
}

const fn default_transport_capacity() -> f64 {
    DEFAULT_TRANSPORT_CAPACITY_KG
}

/// Configuration for a single seed item
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ItemConfig {
    /// Arabic display name
    pub name_ar: String,
    /// English display name
    pub name_en: String,
    /// Price per bulk package
    pub bulk_price: f64,
    /// Base units in one bulk package
    pub units_per_bulk: f64,
    /// Price per base unit; derived from the bulk price when absent
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// Kilograms per base unit
    #[serde(default)]
    pub weight_kg: f64,
    /// Category tag such as `dryGoods` or `liquids`
    #[serde(default)]
    pub category: Option<String>,
}

impl ItemConfig {
    /// Converts the entry into catalog item fields.
    #[must_use]
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            name_ar: self.name_ar.clone(),
            name_en: self.name_en.clone(),
            unit_price: self
                .unit_price
                .unwrap_or_else(|| money::unit_price(self.bulk_price, self.units_per_bulk)),
            bulk_price: self.bulk_price,
            units_per_bulk: self.units_per_bulk,
            weight_kg: self.weight_kg,
            category: self
                .category
                .as_deref()
                .map_or(Category::Other, Category::from_tag),
        }
    }
}

/// Parses config.toml contents.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or the transport capacity is
/// not a positive number.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if !config.transport_capacity_kg.is_finite() || config.transport_capacity_kg <= 0.0 {
        return Err(Error::Config {
            message: format!(
                "transport_capacity_kg must be positive, got {}",
                config.transport_capacity_kg
            ),
        });
    }
    Ok(config)
}

/// Loads planner configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads ./config.toml, falling back to defaults when the file is absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        warn!("config.toml not found, using default planner settings.");
        return Ok(Config::default());
    }
    load_config(path)
}

/// Inserts the configured items when the catalog has no items yet.
///
/// Returns how many items were added. Entries that fail validation are
/// skipped with a warning.
///
/// # Errors
/// Returns the catalog error of the list or insert calls.
pub async fn seed_catalog<S: CatalogStore>(catalog: &S, config: &Config) -> Result<usize> {
    if config.items.is_empty() {
        return Ok(0);
    }
    if !catalog.list_items().await?.is_empty() {
        info!("Catalog already has items, skipping seed.");
        return Ok(0);
    }

    let mut seeded = 0;
    for entry in &config.items {
        match catalog.create_item(&entry.to_new_item(), SEED_OWNER).await {
            Ok(_) => seeded += 1,
            Err(Error::InvalidName { message }) => {
                warn!("Skipping seed item '{}': {}", entry.name_en, message);
            }
            Err(Error::InvalidAmount { amount }) => {
                warn!("Skipping seed item '{}': invalid amount {}", entry.name_en, amount);
            }
            Err(e) => return Err(e),
        }
    }
    info!("Seeded {} catalog items from config.toml", seeded);
    Ok(seeded)
}
