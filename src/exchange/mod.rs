//! Food exchange list: categorized reference foods with standardized portions
//! and per-portion nutrient values. Read-only to the plan.

mod catalog;

pub use catalog::{ExchangeCatalog, FoodItem, CANONICAL_CATEGORY_ORDER};
