//! Catalog store - items, saved bag templates and their lines.
//!
//! [`CatalogStore`] is the seam the planning workflows talk to. The SeaORM
//! implementation below is the one the binary uses; every row is mapped into
//! the typed records of [`crate::models`] before it leaves this module.

use crate::{
    core::bag::BagComposition,
    entities::{
        BagItem, BagTemplate as BagTemplateEntity, Item as ItemEntity, bag_item, bag_template,
        item,
    },
    errors::{Error, Result},
    models::{BagTemplate, Item, NewItem, NewTemplate, TemplateLine},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Remote storage for the catalog and saved templates.
///
/// Every call may fail; a failed call has not changed anything the caller
/// holds.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    /// All catalog items, ordered by English name.
    async fn list_items(&self) -> Result<Vec<Item>>;
    /// Adds an item owned by `owner`.
    async fn create_item(&self, fields: &NewItem, owner: &str) -> Result<Item>;
    /// Overwrites an item's fields.
    async fn update_item(&self, id: i64, fields: &NewItem) -> Result<()>;
    /// Deletes an item together with any template lines that use it.
    async fn delete_item(&self, id: i64) -> Result<()>;
    /// All saved templates, newest first.
    async fn list_templates(&self) -> Result<Vec<BagTemplate>>;
    /// One saved template.
    async fn get_template(&self, id: i64) -> Result<BagTemplate>;
    /// Saves a template header owned by `owner`.
    async fn create_template(&self, fields: &NewTemplate, owner: &str) -> Result<BagTemplate>;
    /// The stored lines of a template.
    async fn list_template_lines(&self, template_id: i64) -> Result<Vec<TemplateLine>>;
    /// Stores lines for an existing template.
    async fn create_template_lines(&self, template_id: i64, lines: &[TemplateLine]) -> Result<()>;
}

impl CatalogStore for DatabaseConnection {
    async fn list_items(&self) -> Result<Vec<Item>> {
        get_all_items(self).await
    }

    async fn create_item(&self, fields: &NewItem, owner: &str) -> Result<Item> {
        create_item(self, fields, owner).await
    }

    async fn update_item(&self, id: i64, fields: &NewItem) -> Result<()> {
        update_item(self, id, fields).await.map(|_| ())
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        delete_item(self, id).await
    }

    async fn list_templates(&self) -> Result<Vec<BagTemplate>> {
        get_all_templates(self).await
    }

    async fn get_template(&self, id: i64) -> Result<BagTemplate> {
        get_template_by_id(self, id).await
    }

    async fn create_template(&self, fields: &NewTemplate, owner: &str) -> Result<BagTemplate> {
        create_template(self, fields, owner).await
    }

    async fn list_template_lines(&self, template_id: i64) -> Result<Vec<TemplateLine>> {
        get_template_lines(self, template_id).await
    }

    async fn create_template_lines(&self, template_id: i64, lines: &[TemplateLine]) -> Result<()> {
        create_template_lines(self, template_id, lines).await
    }
}

/// Retrieves every catalog item ordered alphabetically by English name.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn get_all_items(db: &DatabaseConnection) -> Result<Vec<Item>> {
    let items = ItemEntity::find()
        .order_by_asc(item::Column::NameEn)
        .order_by_asc(item::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} catalog items.", items.len());
    Ok(items.into_iter().map(Item::from).collect())
}

/// Creates a catalog item after validating its fields.
///
/// Names are trimmed before they are stored.
///
/// # Errors
/// Returns an error if:
/// - Either name is empty or whitespace-only
/// - A price or the weight is negative or not finite
/// - The package size is not positive
/// - The database insert fails
#[instrument(skip(db, fields))]
pub async fn create_item(db: &DatabaseConnection, fields: &NewItem, owner: &str) -> Result<Item> {
    fields.validate()?;

    let item = item::ActiveModel {
        name_ar: Set(fields.name_ar.trim().to_string()),
        name_en: Set(fields.name_en.trim().to_string()),
        unit_price: Set(fields.unit_price),
        bulk_price: Set(fields.bulk_price),
        units_per_bulk: Set(fields.units_per_bulk),
        weight_kg: Set(fields.weight_kg),
        category: Set(fields.category.as_str().to_string()),
        user_id: Set(Some(owner.to_string())),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let created = item.insert(db).await?;
    info!(
        "Added catalog item '{}' (ID: {}) at {} per unit, {} per package of {}",
        created.name_en, created.id, created.unit_price, created.bulk_price, created.units_per_bulk
    );
    Ok(created.into())
}

/// Overwrites every editable field of an existing item.
///
/// # Errors
/// Returns an error if the fields fail validation, the item does not exist,
/// or the database update fails.
#[instrument(skip(db, fields))]
pub async fn update_item(db: &DatabaseConnection, item_id: i64, fields: &NewItem) -> Result<Item> {
    fields.validate()?;

    let mut item: item::ActiveModel = ItemEntity::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?
        .into();

    item.name_ar = Set(fields.name_ar.trim().to_string());
    item.name_en = Set(fields.name_en.trim().to_string());
    item.unit_price = Set(fields.unit_price);
    item.bulk_price = Set(fields.bulk_price);
    item.units_per_bulk = Set(fields.units_per_bulk);
    item.weight_kg = Set(fields.weight_kg);
    item.category = Set(fields.category.as_str().to_string());

    let updated = item.update(db).await?;
    info!("Updated catalog item {}", updated.id);
    Ok(updated.into())
}

/// Deletes an item. Template lines referencing it are removed by the
/// database cascade.
///
/// # Errors
/// Returns `Error::ItemNotFound` if no row was deleted, or a database error.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = ItemEntity::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ItemNotFound { id: item_id });
    }
    info!("Deleted catalog item {}", item_id);
    Ok(())
}

/// Retrieves every saved template, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn get_all_templates(db: &DatabaseConnection) -> Result<Vec<BagTemplate>> {
    let templates = BagTemplateEntity::find()
        .order_by_desc(bag_template::Column::CreatedAt)
        .order_by_desc(bag_template::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} bag templates.", templates.len());
    Ok(templates.into_iter().map(BagTemplate::from).collect())
}

/// Retrieves one template by id.
///
/// # Errors
/// Returns `Error::TemplateNotFound` when it does not exist, or a database error.
#[instrument(skip(db))]
pub async fn get_template_by_id(db: &DatabaseConnection, template_id: i64) -> Result<BagTemplate> {
    BagTemplateEntity::find_by_id(template_id)
        .one(db)
        .await?
        .map(BagTemplate::from)
        .ok_or(Error::TemplateNotFound { id: template_id })
}

/// Saves a template header.
///
/// # Errors
/// Returns an error if the name is blank, the budget is negative or not
/// finite, or the database insert fails.
#[instrument(skip(db, fields))]
pub async fn create_template(
    db: &DatabaseConnection,
    fields: &NewTemplate,
    owner: &str,
) -> Result<BagTemplate> {
    if fields.name.trim().is_empty() {
        return Err(Error::InvalidName {
            message: "Bag name cannot be empty".to_string(),
        });
    }
    if !fields.total_budget.is_finite() || fields.total_budget < 0.0 {
        return Err(Error::InvalidAmount {
            amount: fields.total_budget,
        });
    }

    let template = bag_template::ActiveModel {
        name: Set(fields.name.clone()),
        target_count: Set(i64::try_from(fields.target_count).unwrap_or(i64::MAX)),
        total_budget: Set(fields.total_budget),
        user_id: Set(owner.to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let created = template.insert(db).await?;
    info!("Saved bag template '{}' (ID: {})", created.name, created.id);
    Ok(created.into())
}

/// Retrieves the stored lines of a template in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn get_template_lines(
    db: &DatabaseConnection,
    template_id: i64,
) -> Result<Vec<TemplateLine>> {
    let lines = BagItem::find()
        .filter(bag_item::Column::BagId.eq(template_id))
        .order_by_asc(bag_item::Column::Id)
        .all(db)
        .await?;
    Ok(lines.into_iter().map(TemplateLine::from).collect())
}

/// Stores lines for a template in one insert. An empty slice is a no-op.
///
/// # Errors
/// Returns an error if a quantity is negative or not finite, an item appears
/// twice, or the insert fails (for example because the template or an item
/// does not exist, or the item already has a line on this template).
#[instrument(skip(db, lines), fields(count = lines.len()))]
pub async fn create_template_lines(
    db: &DatabaseConnection,
    template_id: i64,
    lines: &[TemplateLine],
) -> Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    if let Some(bad) = lines
        .iter()
        .find(|line| !line.quantity.is_finite() || line.quantity < 0.0)
    {
        return Err(Error::InvalidAmount {
            amount: bad.quantity,
        });
    }
    for (index, line) in lines.iter().enumerate() {
        if lines[..index].iter().any(|other| other.item_id == line.item_id) {
            return Err(Error::DuplicateLine {
                item_id: line.item_id,
            });
        }
    }

    let models = lines.iter().map(|line| bag_item::ActiveModel {
        bag_id: Set(template_id),
        item_id: Set(line.item_id),
        quantity: Set(line.quantity),
        ..Default::default()
    });
    BagItem::insert_many(models).exec(db).await?;
    debug!("Stored {} lines for template {}", lines.len(), template_id);
    Ok(())
}

/// Catalog search: substring match on the Arabic name, case-insensitive match
/// on the English name or category tag. An empty query matches everything.
#[must_use]
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.trim();
    let lowered = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.name_ar.contains(query)
                || item.name_en.to_lowercase().contains(&lowered)
                || item.category.as_str().to_lowercase().contains(&lowered)
        })
        .collect()
}

/// Items that can still be added to the bag: not already in it and matching
/// `query` by name.
#[must_use]
pub fn addable_items<'a>(
    items: &'a [Item],
    bag: &BagComposition,
    query: &str,
) -> Vec<&'a Item> {
    let query = query.trim();
    let lowered = query.to_lowercase();
    items
        .iter()
        .filter(|item| !bag.contains(item.id))
        .filter(|item| item.name_ar.contains(query) || item.name_en.to_lowercase().contains(&lowered))
        .collect()
}
