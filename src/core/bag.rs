//! Bag composition - the single bag being edited and its derived figures.
//!
//! A [`BagComposition`] is an owned value held once at the application root
//! and handed to whatever needs it. Mutations that would break an invariant
//! (negative quantity, budget or target) are ignored rather than reported;
//! each mutator returns whether the state changed so the caller knows when to
//! write the snapshot back to the local cache.
//!
//! The derived figures are plain functions over lines and numbers so they can
//! be used on a loaded template as well as on the live composition.

use crate::core::money::parse_amount;
use crate::models::{BagLine, BagTemplate, Item};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Step used by the quantity plus/minus controls.
pub const QUANTITY_STEP: f64 = 0.5;

/// The live bag: name, lines, target count and budget.
///
/// This is also the snapshot written to the local cache.
// Scalar fields stay ahead of `lines`; TOML needs values before tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BagComposition {
    /// Display name, may be empty
    #[serde(default)]
    pub name: String,
    /// Number of bags the user is aiming for
    #[serde(default)]
    pub target_count: u64,
    /// Money available for the whole run
    #[serde(default)]
    pub total_budget: f64,
    /// Lines in insertion order, at most one per item id
    #[serde(default)]
    pub lines: Vec<BagLine>,
}

impl BagComposition {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line for `item_id`, if the item is in the bag.
    #[must_use]
    pub fn line(&self, item_id: i64) -> Option<&BagLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    /// Whether the item is already in the bag.
    #[must_use]
    pub fn contains(&self, item_id: i64) -> bool {
        self.line(item_id).is_some()
    }

    /// Adds `item` with a quantity of 1. Adding an item that is already in the
    /// bag does nothing.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.contains(item.id) {
            trace!(item_id = item.id, "Item already in bag, ignoring add");
            return false;
        }
        debug!(item_id = item.id, "Adding item to bag");
        self.lines.push(BagLine {
            quantity: 1.0,
            item,
        });
        true
    }

    /// Removes the line for `item_id`, if present.
    pub fn remove_item(&mut self, item_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item.id != item_id);
        before != self.lines.len()
    }

    /// Sets the per-bag quantity of an item. Negative or non-finite
    /// quantities are ignored; zero is kept as a zero-quantity line.
    pub fn update_quantity(&mut self, item_id: i64, quantity: f64) -> bool {
        if !quantity.is_finite() || quantity < 0.0 {
            trace!(item_id, quantity, "Rejected quantity");
            return false;
        }
        match self.lines.iter_mut().find(|line| line.item.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Raises an item's quantity by [`QUANTITY_STEP`].
    pub fn increment_quantity(&mut self, item_id: i64) -> bool {
        let Some(quantity) = self.line(item_id).map(|line| line.quantity + QUANTITY_STEP) else {
            return false;
        };
        self.update_quantity(item_id, quantity)
    }

    /// Lowers an item's quantity by [`QUANTITY_STEP`]; ignored when that would
    /// go below zero.
    pub fn decrement_quantity(&mut self, item_id: i64) -> bool {
        let Some(quantity) = self.line(item_id).map(|line| line.quantity - QUANTITY_STEP) else {
            return false;
        };
        self.update_quantity(item_id, quantity)
    }

    /// Sets the quantity from form text; malformed text is ignored.
    pub fn update_quantity_input(&mut self, item_id: i64, text: &str) -> bool {
        parse_amount(text).is_some_and(|quantity| self.update_quantity(item_id, quantity))
    }

    /// Sets the target bag count. Negative counts are ignored.
    pub fn set_target_count(&mut self, count: i64) -> bool {
        match u64::try_from(count) {
            Ok(count) => {
                self.target_count = count;
                true
            }
            Err(_) => false,
        }
    }

    /// Sets the target count from form text; malformed or negative text is
    /// ignored.
    pub fn set_target_count_input(&mut self, text: &str) -> bool {
        text.trim()
            .parse::<i64>()
            .is_ok_and(|count| self.set_target_count(count))
    }

    /// Sets the total budget. Negative or non-finite budgets are ignored.
    pub fn set_total_budget(&mut self, amount: f64) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            return false;
        }
        self.total_budget = amount;
        true
    }

    /// Sets the budget from form text; malformed or negative text is ignored.
    pub fn set_total_budget_input(&mut self, text: &str) -> bool {
        parse_amount(text).is_some_and(|amount| self.set_total_budget(amount))
    }

    /// Renames the bag; any string is accepted.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Resets everything to the empty state.
    pub fn clear(&mut self) {
        debug!("Clearing bag composition");
        *self = Self::default();
    }

    /// Replaces the whole composition with a saved template and its lines.
    /// Nothing from the previous state is kept. Only the first line for each
    /// item is taken.
    pub fn load(&mut self, template: &BagTemplate, lines: Vec<BagLine>) {
        debug!(
            template_id = template.id,
            lines = lines.len(),
            "Loading template into bag"
        );
        let mut unique: Vec<BagLine> = Vec::with_capacity(lines.len());
        for line in lines {
            if unique.iter().any(|kept| kept.item.id == line.item.id) {
                trace!(item_id = line.item.id, "Dropping repeated line");
                continue;
            }
            unique.push(line);
        }
        *self = Self {
            name: template.name.clone(),
            target_count: template.target_count,
            total_budget: template.total_budget,
            lines: unique,
        };
    }

    /// See [`cost_per_bag`].
    #[must_use]
    pub fn cost_per_bag(&self) -> f64 {
        cost_per_bag(&self.lines)
    }

    /// See [`max_affordable_bags`].
    #[must_use]
    pub fn max_affordable_bags(&self) -> u64 {
        max_affordable_bags(self.total_budget, self.cost_per_bag())
    }

    /// See [`required_budget`].
    #[must_use]
    pub fn required_budget_for_target(&self) -> f64 {
        required_budget(self.target_count, self.cost_per_bag())
    }
}

/// Cost of one bag: the sum of `quantity * unit_price` over every line.
#[must_use]
pub fn cost_per_bag(lines: &[BagLine]) -> f64 {
    lines.iter().map(BagLine::cost).sum()
}

/// How many whole bags `budget` pays for, or 0 when a bag costs nothing or
/// the budget is not a finite positive amount.
#[must_use]
pub fn max_affordable_bags(budget: f64, cost_per_bag: f64) -> u64 {
    if cost_per_bag <= 0.0 || !budget.is_finite() || budget <= 0.0 {
        return 0;
    }
    // Cast safety: the quotient is positive; `as` saturates on overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bags = (budget / cost_per_bag).floor() as u64;
    bags
}

/// Money needed to build `target_count` bags.
#[must_use]
pub fn required_budget(target_count: u64, cost_per_bag: f64) -> f64 {
    // Cast safety: bag counts stay far below 2^53.
    #[allow(clippy::cast_precision_loss)]
    let target = target_count as f64;
    target * cost_per_bag
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{line, sample_item, sample_template};

    fn bag_with(items: &[(i64, &str, f64)]) -> BagComposition {
        let mut bag = BagComposition::new();
        for &(id, name, price) in items {
            bag.add_item(sample_item(id, name, price));
        }
        bag
    }

    #[test]
    fn test_add_item_starts_at_one() {
        let bag = bag_with(&[(1, "Rice", 2.0)]);
        assert_eq!(bag.lines.len(), 1);
        assert_eq!(bag.lines[0].quantity, 1.0);
    }

    #[test]
    fn test_add_same_item_twice_is_noop() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        assert!(bag.update_quantity(1, 4.0));

        assert!(!bag.add_item(sample_item(1, "Rice again", 9.0)));
        assert_eq!(bag.lines.len(), 1);
        assert_eq!(bag.lines[0].quantity, 4.0);
        assert_eq!(bag.lines[0].item.name_en, "Rice");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let bag = bag_with(&[(3, "Tea", 1.0), (1, "Rice", 2.0), (2, "Oil", 4.0)]);
        let ids: Vec<i64> = bag.lines.iter().map(|line| line.item.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_item() {
        let mut bag = bag_with(&[(1, "Rice", 2.0), (2, "Oil", 4.0)]);
        assert!(bag.remove_item(1));
        assert!(!bag.contains(1));
        assert!(bag.contains(2));
        assert!(!bag.remove_item(99));
        assert_eq!(bag.lines.len(), 1);
    }

    #[test]
    fn test_update_quantity_rejects_negative() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        bag.update_quantity(1, 2.5);
        assert!(!bag.update_quantity(1, -1.0));
        assert!(!bag.update_quantity(1, f64::NAN));
        assert_eq!(bag.line(1).unwrap().quantity, 2.5);
    }

    #[test]
    fn test_update_quantity_keeps_zero_lines() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        assert!(bag.update_quantity(1, 0.0));
        assert_eq!(bag.lines.len(), 1);
        assert_eq!(bag.cost_per_bag(), 0.0);
    }

    #[test]
    fn test_update_quantity_unknown_item() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        assert!(!bag.update_quantity(42, 3.0));
        assert_eq!(bag.line(1).unwrap().quantity, 1.0);
    }

    #[test]
    fn test_quantity_steps() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        assert!(bag.increment_quantity(1));
        assert_eq!(bag.line(1).unwrap().quantity, 1.5);
        assert!(bag.decrement_quantity(1));
        assert!(bag.decrement_quantity(1));
        assert!(bag.decrement_quantity(1));
        assert_eq!(bag.line(1).unwrap().quantity, 0.0);
        assert!(!bag.decrement_quantity(1));
        assert_eq!(bag.line(1).unwrap().quantity, 0.0);
        assert!(!bag.increment_quantity(99));
    }

    #[test]
    fn test_text_inputs_ignore_malformed_values() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        bag.set_total_budget(100.0);
        bag.set_target_count(10);

        assert!(!bag.set_total_budget_input("lots"));
        assert!(!bag.set_total_budget_input("-5"));
        assert!(!bag.set_target_count_input("12.5"));
        assert!(!bag.set_target_count_input("-2"));
        assert!(!bag.update_quantity_input(1, ""));
        assert_eq!(bag.total_budget, 100.0);
        assert_eq!(bag.target_count, 10);
        assert_eq!(bag.line(1).unwrap().quantity, 1.0);

        assert!(bag.set_total_budget_input("250.75"));
        assert!(bag.set_target_count_input(" 40 "));
        assert!(bag.update_quantity_input(1, "2.5"));
        assert_eq!(bag.total_budget, 250.75);
        assert_eq!(bag.target_count, 40);
        assert_eq!(bag.line(1).unwrap().quantity, 2.5);
    }

    #[test]
    fn test_target_and_budget_reject_negative() {
        let mut bag = BagComposition::new();
        assert!(bag.set_target_count(25));
        assert!(!bag.set_target_count(-1));
        assert_eq!(bag.target_count, 25);

        assert!(bag.set_total_budget(540.0));
        assert!(!bag.set_total_budget(-0.01));
        assert_eq!(bag.total_budget, 540.0);
    }

    #[test]
    fn test_infinite_values_are_rejected() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        bag.set_total_budget(540.0);

        assert!(!bag.set_total_budget(f64::INFINITY));
        assert!(!bag.set_total_budget(f64::NEG_INFINITY));
        assert_eq!(bag.total_budget, 540.0);
        assert_eq!(bag.max_affordable_bags(), 270);

        assert!(!bag.update_quantity(1, f64::INFINITY));
        assert_eq!(bag.line(1).unwrap().quantity, 1.0);
        assert_eq!(max_affordable_bags(f64::INFINITY, 2.0), 0);
    }

    #[test]
    fn test_set_name_accepts_anything() {
        let mut bag = BagComposition::new();
        bag.set_name("Winter bag");
        assert_eq!(bag.name, "Winter bag");
        bag.set_name("");
        assert_eq!(bag.name, "");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut bag = bag_with(&[(1, "Rice", 2.0)]);
        bag.set_name("Eid");
        bag.set_target_count(10);
        bag.set_total_budget(500.0);

        bag.clear();
        assert_eq!(bag, BagComposition::default());
        assert_eq!(bag.cost_per_bag(), 0.0);
        assert_eq!(bag.max_affordable_bags(), 0);
        assert_eq!(bag.required_budget_for_target(), 0.0);
    }

    #[test]
    fn test_load_replaces_state() {
        let mut bag = bag_with(&[(1, "Rice", 2.0), (2, "Oil", 4.0)]);
        bag.set_name("Old");
        bag.set_total_budget(1.0);

        let template = sample_template(5, "Ramadan", 120, 3000.0);
        let lines = vec![line(sample_item(7, "Dates", 3.0), 2.0)];
        bag.load(&template, lines.clone());

        assert_eq!(bag.name, "Ramadan");
        assert_eq!(bag.target_count, 120);
        assert_eq!(bag.total_budget, 3000.0);
        assert_eq!(bag.lines, lines);
    }

    #[test]
    fn test_load_keeps_first_line_per_item() {
        let mut bag = BagComposition::new();
        let rice = sample_item(1, "Rice", 2.0);
        let template = sample_template(5, "Ramadan", 10, 100.0);
        bag.load(
            &template,
            vec![
                line(rice.clone(), 3.0),
                line(sample_item(2, "Oil", 4.0), 1.0),
                line(rice, 2.0),
            ],
        );

        assert_eq!(bag.lines.len(), 2);
        assert_eq!(bag.line(1).unwrap().quantity, 3.0);
        assert!(bag.update_quantity(1, 5.0));
        assert_eq!(bag.line(1).unwrap().quantity, 5.0);
        assert!(bag.remove_item(1));
        assert_eq!(bag.lines.len(), 1);
    }

    #[test]
    fn test_derived_figures() {
        let mut bag = bag_with(&[(1, "Rice", 2.0), (2, "Oil", 4.0)]);
        bag.update_quantity(1, 3.0);
        bag.update_quantity(2, 3.0);
        bag.set_total_budget(540.0);
        bag.set_target_count(10);

        assert_eq!(bag.cost_per_bag(), 18.0);
        assert_eq!(bag.max_affordable_bags(), 30);
        assert_eq!(bag.required_budget_for_target(), 180.0);
    }

    #[test]
    fn test_empty_bag_has_no_affordable_bags() {
        let mut bag = BagComposition::new();
        bag.set_total_budget(1_000.0);
        assert_eq!(bag.cost_per_bag(), 0.0);
        assert_eq!(bag.max_affordable_bags(), 0);
    }

    #[test]
    fn test_max_affordable_bags_floors() {
        assert_eq!(max_affordable_bags(540.0, 18.0), 30);
        assert_eq!(max_affordable_bags(539.99, 18.0), 29);
        assert_eq!(max_affordable_bags(10.0, 0.0), 0);
        assert_eq!(max_affordable_bags(0.0, 18.0), 0);
    }
}
