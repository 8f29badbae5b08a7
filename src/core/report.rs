//! Plain-text reports for the live bag and for procurement plans.
//!
//! Everything here is formatting over already computed figures; nothing
//! touches storage. Item names follow the requested [`Locale`].

use crate::{
    core::{
        bag::BagComposition,
        money::{format_currency, format_number},
        procurement::{ProcurementLine, ProcurementPlan},
    },
    models::Locale,
};
use std::fmt::Write;

/// Summary figures of the live bag.
#[derive(Debug, Clone, PartialEq)]
pub struct BagSummary {
    /// Bag name
    pub name: String,
    /// Number of lines
    pub line_count: usize,
    /// Cost of one bag
    pub cost_per_bag: f64,
    /// Bags the budget affords
    pub max_affordable_bags: u64,
    /// Target bag count
    pub target_count: u64,
    /// Money needed for the target count
    pub required_budget: f64,
    /// Money available
    pub total_budget: f64,
}

/// Collects the summary figures of a composition.
#[must_use]
pub fn summarize(composition: &BagComposition) -> BagSummary {
    BagSummary {
        name: composition.name.clone(),
        line_count: composition.lines.len(),
        cost_per_bag: composition.cost_per_bag(),
        max_affordable_bags: composition.max_affordable_bags(),
        target_count: composition.target_count,
        required_budget: composition.required_budget_for_target(),
        total_budget: composition.total_budget,
    }
}

/// Share of `budget` that `spent` uses, as a percentage.
///
/// Zero when there is no budget.
#[must_use]
pub fn budget_usage_percent(spent: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return 0.0;
    }
    (spent / budget) * 100.0
}

/// Text progress bar such as `[████████░░] 80.0%`.
///
/// The bar is clamped to 0-100; the printed percentage is not.
#[must_use]
pub fn format_progress_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };

    // Cast safety: clamped ∈ [0, 100] and length is small.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Renders the live bag: one row per line, then the budget figures.
#[must_use]
pub fn format_bag(composition: &BagComposition, locale: Locale) -> String {
    let summary = summarize(composition);
    let mut out = String::new();

    let title = if summary.name.trim().is_empty() {
        "Untitled bag"
    } else {
        summary.name.as_str()
    };
    let _ = writeln!(out, "{title} ({} items)", summary.line_count);

    for line in &composition.lines {
        let _ = writeln!(
            out,
            "- {}: {} x {} = {}",
            line.item.display_name(locale),
            format_number(line.quantity),
            format_currency(line.item.unit_price),
            format_currency(line.cost())
        );
    }

    let _ = writeln!(out, "Cost per bag: {}", format_currency(summary.cost_per_bag));
    let _ = writeln!(
        out,
        "Budget: {} covers {} bags",
        format_currency(summary.total_budget),
        summary.max_affordable_bags
    );
    let _ = write!(
        out,
        "Target: {} bags need {}",
        summary.target_count,
        format_currency(summary.required_budget)
    );
    out
}

/// One row of a procurement plan.
#[must_use]
pub fn format_plan_line(line: &ProcurementLine, locale: Locale) -> String {
    format!(
        "- {}: {} packages of {} + {} loose ({} total) = {}",
        line.item.display_name(locale),
        format_number(line.packages_to_buy),
        format_number(line.item.units_per_bulk),
        format_number(line.loose_units),
        format_number(line.total_needed),
        format_currency(line.estimated_cost)
    )
}

/// Renders a procurement plan with its totals and transport estimate.
///
/// When `budget` is positive a bar shows how much of it the plan spends.
#[must_use]
pub fn format_plan(plan: &ProcurementPlan, budget: f64, locale: Locale) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Procurement for {} bags ({} per bag)",
        plan.bag_count,
        format_currency(plan.cost_per_bag)
    );
    for line in &plan.lines {
        let _ = writeln!(out, "{}", format_plan_line(line, locale));
    }
    let _ = writeln!(out, "Total: {}", format_currency(plan.grand_total));
    if budget > 0.0 {
        let percent = budget_usage_percent(plan.grand_total, budget);
        let _ = writeln!(out, "Budget used: {}", format_progress_bar(percent, None));
    }
    let _ = write!(
        out,
        "Weight: {} kg, {} transport units",
        format_number(plan.total_weight),
        plan.transport_units
    );
    out
}
