/// Money helpers: unit price, formatting and amount parsing
pub mod money;

/// Purchase planning per item and per bag run
pub mod procurement;

/// The live bag composition and its derived figures
pub mod bag;

/// Catalog store: items, templates and template lines
pub mod catalog;

/// Identity provider and local accounts
pub mod identity;

/// Client-local cache for the bag snapshot and the tour flag
pub mod cache;

/// Item entry form with linked price fields
pub mod item_form;

/// Save, load and procurement workflows
pub mod planner;

/// Plain-text reports
pub mod report;
