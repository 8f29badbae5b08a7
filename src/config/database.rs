//! Database configuration for the catalog store.
//!
//! Connects to the `SQLite` database named by `DATABASE_URL` and creates the
//! catalog tables from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the
//! Rust structs. Creation is idempotent.

use crate::entities::{BagItem, BagTemplate, Item, bag_item};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, sea_query::Index};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalog database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/bag_planner.sqlite?mode=rwc";

/// Client-local cache database used when `LOCAL_CACHE_URL` is not set.
pub const DEFAULT_LOCAL_CACHE_URL: &str = "sqlite://data/local_cache.sqlite?mode=rwc";

/// Gets the catalog database URL from `DATABASE_URL`, or the default path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Gets the local cache URL from `LOCAL_CACHE_URL`, or the default path.
#[must_use]
pub fn get_local_cache_url() -> String {
    std::env::var("LOCAL_CACHE_URL").unwrap_or_else(|_| DEFAULT_LOCAL_CACHE_URL.to_string())
}

/// Directory holding the file of a `sqlite:` URL; `None` for in-memory
/// databases, other backends and files in the working directory.
#[must_use]
pub fn sqlite_parent_dir(url: &str) -> Option<PathBuf> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Creates the directory a `sqlite:` file URL points into, if it has one.
///
/// # Errors
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_sqlite_dir(url: &str) -> Result<()> {
    if let Some(dir) = sqlite_parent_dir(url) {
        debug!("Ensuring database directory {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Connects to the catalog database.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!("Connecting to catalog database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the items, templates and template lines tables if they are missing,
/// plus the unique index that keeps one line per item on a template.
///
/// # Errors
/// Returns an error if a `CREATE TABLE` statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut item_table = schema.create_table_from_entity(Item);
    let mut template_table = schema.create_table_from_entity(BagTemplate);
    let mut line_table = schema.create_table_from_entity(BagItem);

    item_table.if_not_exists();
    template_table.if_not_exists();
    line_table.if_not_exists();

    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&template_table)).await?;
    db.execute(builder.build(&line_table)).await?;

    let line_index = Index::create()
        .name("idx_bag_items_bag_id_item_id")
        .table(BagItem)
        .col(bag_item::Column::BagId)
        .col(bag_item::Column::ItemId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&line_index)).await?;

    Ok(())
}
