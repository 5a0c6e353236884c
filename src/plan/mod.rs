//! The seven-day, four-meal-slot plan structure and its derived nutritional
//! aggregation. Plain owned data mutated synchronously by a single logical
//! actor; aggregates are recomputed on demand.

mod model;
mod totals;

pub use model::{DayPlan, EntryId, MealSlot, PlannedFoodEntry, WeekPlan, Weekday};
pub use totals::{BudgetStatus, DaySummary, MacroSpec, MacroTargets, NutrientTotals};
