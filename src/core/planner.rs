//! Planning workflows - glue between the live bag, the catalog store and the
//! identity provider.
//!
//! Anything that reads or writes saved templates needs a signed-in user and
//! quietly does nothing without one. Remote calls finish before the live
//! composition is touched, so a failed load leaves it exactly as it was.

use crate::{
    core::{
        bag::{self, BagComposition},
        catalog::CatalogStore,
        identity::IdentityProvider,
        procurement::{self, BagCount, ProcurementPlan},
    },
    errors::Result,
    models::{BagLine, BagTemplate, Item, NewTemplate, TemplateLine},
};
use tracing::{debug, info, instrument, warn};

/// How the number of bags in a procurement plan is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    /// As many bags as the budget affords
    #[default]
    Budget,
    /// Exactly the target count
    Target,
}

/// The bag a procurement plan is built for.
#[derive(Debug, Clone, Copy)]
pub enum BagSource<'a> {
    /// The live composition being edited
    Current(&'a BagComposition),
    /// A saved template and its resolved lines
    Saved {
        /// Template header
        template: &'a BagTemplate,
        /// Lines with their catalog items
        lines: &'a [BagLine],
    },
}

impl BagSource<'_> {
    /// Lines of the selected bag.
    #[must_use]
    pub fn lines(&self) -> &[BagLine] {
        match self {
            Self::Current(composition) => &composition.lines,
            Self::Saved { lines, .. } => lines,
        }
    }

    /// Budget to plan with. A saved template uses its own budget when it has
    /// one; otherwise `fallback_budget` (the budget already on screen) stays.
    #[must_use]
    pub fn budget(&self, fallback_budget: f64) -> f64 {
        match self {
            Self::Current(composition) => composition.total_budget,
            Self::Saved { template, .. } if template.total_budget > 0.0 => template.total_budget,
            Self::Saved { .. } => fallback_budget,
        }
    }

    /// Target bag count of the selected bag.
    #[must_use]
    pub fn target_count(&self) -> u64 {
        match self {
            Self::Current(composition) => composition.target_count,
            Self::Saved { template, .. } => template.target_count,
        }
    }
}

/// Builds the procurement plan for a bag.
///
/// Returns `None` when there is nothing to plan (no lines, or zero bags).
#[must_use]
pub fn plan_procurement(
    source: BagSource<'_>,
    scaling: Scaling,
    fallback_budget: f64,
    transport_capacity_kg: f64,
) -> Option<ProcurementPlan> {
    let count = match scaling {
        Scaling::Budget => BagCount::FromBudget(source.budget(fallback_budget)),
        Scaling::Target => BagCount::Explicit(source.target_count()),
    };
    procurement::aggregate(source.lines(), count, transport_capacity_kg)
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// Items in the catalog
    pub total_items: usize,
    /// Saved bag templates
    pub saved_bags: usize,
    /// Cost of one live bag
    pub cost_per_bag: f64,
    /// Lines in the live bag
    pub lines_in_bag: usize,
}

/// Collects dashboard statistics. `None` when nobody is signed in.
///
/// # Errors
/// Returns the catalog error if either list call fails.
#[instrument(skip_all)]
pub async fn dashboard_stats<S, I>(
    catalog: &S,
    identity: &I,
    composition: &BagComposition,
) -> Result<Option<DashboardStats>>
where
    S: CatalogStore,
    I: IdentityProvider,
{
    if identity.current_user().is_none() {
        return Ok(None);
    }
    let total_items = catalog.list_items().await?.len();
    let saved_bags = catalog.list_templates().await?.len();
    Ok(Some(DashboardStats {
        total_items,
        saved_bags,
        cost_per_bag: composition.cost_per_bag(),
        lines_in_bag: composition.lines.len(),
    }))
}

/// Saved templates visible to the signed-in user; empty when signed out.
///
/// # Errors
/// Returns the catalog error.
pub async fn saved_bags<S, I>(catalog: &S, identity: &I) -> Result<Vec<BagTemplate>>
where
    S: CatalogStore,
    I: IdentityProvider,
{
    if identity.current_user().is_none() {
        return Ok(Vec::new());
    }
    catalog.list_templates().await
}

/// Saves the live composition as a new template.
///
/// Does nothing (returns `Ok(None)`) when nobody is signed in or the bag name
/// is blank. The header is written first and the lines second; if the second
/// write fails the header stays behind.
///
/// # Errors
/// Returns the first catalog error.
#[instrument(skip_all, fields(name = %composition.name))]
pub async fn save_current_bag<S, I>(
    catalog: &S,
    identity: &I,
    composition: &BagComposition,
) -> Result<Option<BagTemplate>>
where
    S: CatalogStore,
    I: IdentityProvider,
{
    let Some(user) = identity.current_user() else {
        debug!("Not signed in, skipping save.");
        return Ok(None);
    };
    if composition.name.trim().is_empty() {
        debug!("Bag has no name, skipping save.");
        return Ok(None);
    }

    let template = catalog
        .create_template(
            &NewTemplate {
                name: composition.name.clone(),
                target_count: composition.target_count,
                total_budget: composition.total_budget,
            },
            &user.id,
        )
        .await?;

    let lines: Vec<TemplateLine> = composition.lines.iter().map(TemplateLine::from).collect();
    if !lines.is_empty() {
        catalog.create_template_lines(template.id, &lines).await?;
    }

    info!(
        "Saved bag '{}' as template {} with {} lines",
        template.name,
        template.id,
        lines.len()
    );
    Ok(Some(template))
}

/// Fetches a template and its lines with their catalog items.
///
/// # Errors
/// Returns the catalog error; `Error::TemplateNotFound` for an unknown id.
#[instrument(skip(catalog))]
pub async fn fetch_saved_bag<S: CatalogStore>(
    catalog: &S,
    template_id: i64,
) -> Result<(BagTemplate, Vec<BagLine>)> {
    let template = catalog.get_template(template_id).await?;
    let stored = catalog.list_template_lines(template_id).await?;
    let items = catalog.list_items().await?;
    Ok((template, resolve_lines(&stored, &items)))
}

/// Loads a saved template into the live composition, replacing it.
///
/// Returns `Ok(false)` without touching anything when nobody is signed in.
/// On error the composition is unchanged.
///
/// # Errors
/// Returns the catalog error.
#[instrument(skip(catalog, identity, composition))]
pub async fn load_saved_bag<S, I>(
    catalog: &S,
    identity: &I,
    template_id: i64,
    composition: &mut BagComposition,
) -> Result<bool>
where
    S: CatalogStore,
    I: IdentityProvider,
{
    if identity.current_user().is_none() {
        debug!("Not signed in, skipping load.");
        return Ok(false);
    }
    let (template, lines) = fetch_saved_bag(catalog, template_id).await?;
    composition.load(&template, lines);
    Ok(true)
}

/// Joins stored template lines with catalog items.
///
/// Lines whose item is no longer in the catalog are dropped with a warning,
/// and so is every line after the first for the same item.
#[must_use]
pub fn resolve_lines(stored: &[TemplateLine], items: &[Item]) -> Vec<BagLine> {
    let mut resolved: Vec<BagLine> = Vec::with_capacity(stored.len());
    for line in stored {
        if resolved.iter().any(|kept| kept.item.id == line.item_id) {
            warn!("Template repeats item {}, keeping the first line", line.item_id);
            continue;
        }
        let Some(item) = items.iter().find(|item| item.id == line.item_id) else {
            warn!("Template line references missing item {}", line.item_id);
            continue;
        };
        resolved.push(BagLine {
            quantity: line.quantity,
            item: item.clone(),
        });
    }
    resolved
}

/// Cost of one bag of a saved template.
#[must_use]
pub fn saved_bag_cost(lines: &[BagLine]) -> f64 {
    bag::cost_per_bag(lines)
}
