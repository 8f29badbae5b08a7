//! Procurement planning - turns a bag composition and a bag count into a
//! shopping list of bulk packages and loose units.
//!
//! [`plan`] works on a single line; [`aggregate`] applies it to every line
//! of a bag and rolls the results up into grand totals and a weight-based
//! transport estimate. Neither function rounds currency.

use crate::core::bag;
use crate::models::{BagLine, Item};

/// Default load capacity of one transport unit (a pickup truck), in kilograms.
pub const DEFAULT_TRANSPORT_CAPACITY_KG: f64 = 1000.0;

/// Purchase breakdown for one item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PurchasePlan {
    /// Base units needed across all bags
    pub total_needed: f64,
    /// Whole bulk packages to buy
    pub packages_to_buy: f64,
    /// Base units bought loose on top of the packages
    pub loose_units: f64,
    /// `packages_to_buy * package_price + loose_units * unit_price`
    pub estimated_cost: f64,
}

/// Computes how to buy one item for `bag_count` bags.
///
/// ```text
/// total_needed    = bag_count * quantity_per_bag
/// packages_to_buy = floor(total_needed / units_per_package)
/// loose_units     = total_needed % units_per_package
/// estimated_cost  = packages_to_buy * package_price + loose_units * unit_price
/// ```
///
/// A zero or negative `units_per_package` would make the division undefined;
/// in that case nothing is bought in packages and every unit is priced loose.
#[must_use]
pub fn plan(
    bag_count: u64,
    quantity_per_bag: f64,
    units_per_package: f64,
    package_price: f64,
    unit_price: f64,
) -> PurchasePlan {
    // Cast safety: bag counts stay far below 2^53.
    #[allow(clippy::cast_precision_loss)]
    let total_needed = bag_count as f64 * quantity_per_bag;

    if units_per_package <= 0.0 || !units_per_package.is_finite() {
        return PurchasePlan {
            total_needed,
            packages_to_buy: 0.0,
            loose_units: total_needed,
            estimated_cost: total_needed * unit_price,
        };
    }

    let packages_to_buy = (total_needed / units_per_package).floor();
    let loose_units = total_needed % units_per_package;
    #[allow(clippy::suboptimal_flops)]
    let estimated_cost = packages_to_buy * package_price + loose_units * unit_price;

    PurchasePlan {
        total_needed,
        packages_to_buy,
        loose_units,
        estimated_cost,
    }
}

/// Where the number of bags to plan for comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BagCount {
    /// As many bags as the budget affords at the loose unit price
    FromBudget(f64),
    /// A count chosen by the caller
    Explicit(u64),
}

impl BagCount {
    /// Resolves the count for a bag costing `cost_per_bag`.
    #[must_use]
    pub fn resolve(self, cost_per_bag: f64) -> u64 {
        match self {
            Self::FromBudget(budget) => bag::max_affordable_bags(budget, cost_per_bag),
            Self::Explicit(count) => count,
        }
    }
}

/// One item's row in a procurement plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementLine {
    /// The item being bought
    pub item: Item,
    /// Base units per bag
    pub quantity_per_bag: f64,
    /// Base units needed across all bags
    pub total_needed: f64,
    /// Whole bulk packages to buy
    pub packages_to_buy: f64,
    /// Base units bought loose
    pub loose_units: f64,
    /// Cost of the packages plus the loose units
    pub estimated_cost: f64,
    /// `total_needed * item.weight_kg`
    pub total_weight: f64,
}

/// A full plan for a bag run, with totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementPlan {
    /// Number of bags planned for
    pub bag_count: u64,
    /// Cost of one bag at loose unit prices
    pub cost_per_bag: f64,
    /// One row per bag line, in bag order
    pub lines: Vec<ProcurementLine>,
    /// Sum of every line's estimated cost
    pub grand_total: f64,
    /// Sum of every line's weight, in kilograms
    pub total_weight: f64,
    /// Transport units needed to carry `total_weight`
    pub transport_units: u64,
}

/// Plans every line of a bag.
///
/// Returns `None` when there is nothing to plan: the bag has no lines or the
/// resolved bag count is zero.
#[must_use]
pub fn aggregate(
    lines: &[BagLine],
    count: BagCount,
    transport_capacity_kg: f64,
) -> Option<ProcurementPlan> {
    if lines.is_empty() {
        return None;
    }

    let cost_per_bag = bag::cost_per_bag(lines);
    let bag_count = count.resolve(cost_per_bag);
    if bag_count == 0 {
        return None;
    }

    let planned: Vec<ProcurementLine> = lines
        .iter()
        .map(|line| {
            let item = &line.item;
            let purchase = plan(
                bag_count,
                line.quantity,
                item.units_per_bulk,
                item.bulk_price,
                item.unit_price,
            );
            ProcurementLine {
                item: item.clone(),
                quantity_per_bag: line.quantity,
                total_needed: purchase.total_needed,
                packages_to_buy: purchase.packages_to_buy,
                loose_units: purchase.loose_units,
                estimated_cost: purchase.estimated_cost,
                total_weight: purchase.total_needed * item.weight_kg,
            }
        })
        .collect();

    let grand_total = planned.iter().map(|line| line.estimated_cost).sum();
    let total_weight = planned.iter().map(|line| line.total_weight).sum();

    Some(ProcurementPlan {
        bag_count,
        cost_per_bag,
        lines: planned,
        grand_total,
        total_weight,
        transport_units: transport_units_needed(total_weight, transport_capacity_kg),
    })
}

/// `ceil(total_weight / capacity)`; zero when the capacity is not positive.
#[must_use]
pub fn transport_units_needed(total_weight: f64, capacity_kg: f64) -> u64 {
    if capacity_kg <= 0.0 || total_weight <= 0.0 {
        return 0;
    }
    // Cast safety: both operands are positive; `as` saturates on overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let units = (total_weight / capacity_kg).ceil() as u64;
    units
}
