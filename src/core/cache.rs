//! Local durable cache - survives restarts on this device, never shared.
//!
//! Holds two things: the snapshot of the live bag composition and the
//! "onboarding tour completed" flag. Derived figures are never cached.

use crate::{
    core::bag::BagComposition,
    entities::{LocalState, local_state},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, Set, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Key of the bag composition snapshot.
pub const COMPOSITION_KEY: &str = "bag-composition";
/// Key of the onboarding tour flag.
pub const TOUR_COMPLETED_KEY: &str = "product-tour-completed";

/// Client-scoped string key/value storage.
#[allow(async_fn_in_trait)]
pub trait LocalCache {
    /// Reads a value.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Deletes a value; deleting a missing key is fine.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// [`LocalCache`] backed by the `local_state` table of a client-local `SQLite` file.
#[derive(Debug, Clone)]
pub struct SqliteCache {
    db: DatabaseConnection,
}

impl SqliteCache {
    /// Connects to `url` and makes sure the `local_state` table exists.
    ///
    /// # Errors
    /// Returns an error if the connection or table creation fails.
    pub async fn open(url: &str) -> Result<Self> {
        let db = Database::connect(url).await?;
        Self::from_connection(db).await
    }

    /// Wraps an existing connection, creating the `local_state` table if needed.
    ///
    /// # Errors
    /// Returns an error if table creation fails.
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        let builder = db.get_database_backend();
        let schema = Schema::new(builder);
        let mut table = schema.create_table_from_entity(LocalState);
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
        Ok(Self { db })
    }
}

impl LocalCache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let state = LocalState::find()
            .filter(local_state::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(state.map(|s| s.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();
        let existing = LocalState::find()
            .filter(local_state::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(state) = existing {
            let mut active_model: local_state::ActiveModel = state.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_state = local_state::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_state.insert(&self.db).await?;
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        LocalState::delete_many()
            .filter(local_state::Column::Key.eq(key))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

/// Writes the composition snapshot.
///
/// # Errors
/// Returns `Error::Cache` if serialization fails, or the cache write error.
#[instrument(skip_all, fields(lines = composition.lines.len()))]
pub async fn persist_composition<C: LocalCache>(cache: &C, composition: &BagComposition) -> Result<()> {
    let snapshot = toml::to_string(composition).map_err(|e| Error::Cache {
        message: format!("Failed to serialize bag composition: {e}"),
    })?;
    cache.set(COMPOSITION_KEY, &snapshot).await?;
    debug!("Bag composition cached.");
    Ok(())
}

/// Reads the composition snapshot back.
///
/// A missing snapshot gives an empty composition. So does an unreadable one,
/// with a warning, so a bad cache never blocks startup.
///
/// # Errors
/// Returns the cache read error.
#[instrument(skip_all)]
pub async fn restore_composition<C: LocalCache>(cache: &C) -> Result<BagComposition> {
    let Some(snapshot) = cache.get(COMPOSITION_KEY).await? else {
        debug!("No cached bag composition, starting empty.");
        return Ok(BagComposition::default());
    };

    match toml::from_str::<BagComposition>(&snapshot) {
        Ok(composition) => {
            info!(
                "Restored cached bag '{}' with {} lines.",
                composition.name,
                composition.lines.len()
            );
            Ok(composition)
        }
        Err(e) => {
            warn!("Discarding unreadable cached bag composition: {}", e);
            Ok(BagComposition::default())
        }
    }
}

/// Whether the onboarding tour has been completed or dismissed.
///
/// # Errors
/// Returns the cache read error.
pub async fn has_seen_tour<C: LocalCache>(cache: &C) -> Result<bool> {
    Ok(cache.get(TOUR_COMPLETED_KEY).await?.as_deref() == Some("true"))
}

/// Records that the tour was completed or dismissed.
///
/// # Errors
/// Returns the cache write error.
pub async fn mark_tour_completed<C: LocalCache>(cache: &C) -> Result<()> {
    cache.set(TOUR_COMPLETED_KEY, "true").await
}

/// Forgets the tour flag so the tour runs again.
///
/// # Errors
/// Returns the cache write error.
pub async fn reset_tour<C: LocalCache>(cache: &C) -> Result<()> {
    cache.remove(TOUR_COMPLETED_KEY).await
}
