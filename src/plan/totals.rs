use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::model::{MealSlot, WeekPlan, Weekday};
use crate::error::AppResult;
use crate::exchange::FoodItem;
use crate::nutrition::{macro_grams, MacroBreakdown, MacroSplit};

/// Elementwise nutrient sums. Non-negative by construction: foods carry
/// non-negative per-portion values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub calories: f64,
}

impl NutrientTotals {
    pub const ZERO: NutrientTotals = NutrientTotals {
        carbs: 0.0,
        protein: 0.0,
        fat: 0.0,
        calories: 0.0,
    };

    pub fn of_food(food: &FoodItem) -> Self {
        Self {
            carbs: food.carbohydrates,
            protein: food.protein,
            fat: food.fat,
            calories: food.calories,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, rhs: NutrientTotals) -> NutrientTotals {
        NutrientTotals {
            carbs: self.carbs + rhs.carbs,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            calories: self.calories + rhs.calories,
        }
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: NutrientTotals) {
        *self = *self + rhs;
    }
}

/// The target envelope aggregation compares against. Read-only input; absent
/// targets fall back to the fixed default envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            carbs: 200.0,
            protein: 150.0,
            fat: 65.0,
        }
    }
}

impl From<MacroBreakdown> for MacroTargets {
    fn from(b: MacroBreakdown) -> Self {
        Self {
            calories: b.total_calories,
            carbs: b.grams.carbs,
            protein: b.grams.protein,
            fat: b.grams.fat,
        }
    }
}

/// Macro amounts stated either as a percentage split or directly in grams.
/// Converted explicitly at the boundary; never left ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MacroSpec {
    Percent {
        carbs: f64,
        protein: f64,
        fat: f64,
    },
    Grams {
        carbs: f64,
        protein: f64,
        fat: f64,
    },
}

impl MacroSpec {
    /// Resolves against a calorie target. A percentage split must pass the
    /// 100 ± 0.1 validity check.
    pub fn into_targets(self, calories: f64) -> AppResult<MacroTargets> {
        match self {
            MacroSpec::Percent {
                carbs,
                protein,
                fat,
            } => {
                let breakdown = macro_grams(calories, MacroSplit::new(carbs, protein, fat))?;
                Ok(breakdown.into())
            }
            MacroSpec::Grams {
                carbs,
                protein,
                fat,
            } => Ok(MacroTargets {
                calories,
                carbs,
                protein,
                fat,
            }),
        }
    }
}

/// Three-band classification of consumed-vs-target for a single nutrient.
/// Drives UI coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn classify(consumed: f64, target: f64) -> Self {
        if consumed > target {
            BudgetStatus::Exceeded
        } else if target > 0.0 && consumed >= 0.9 * target {
            BudgetStatus::Warning
        } else {
            // With no positive target there is nothing to warn against.
            BudgetStatus::Normal
        }
    }
}

/// One row of the weekly summary, in fixed weekday order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: Weekday,
    pub item_count: usize,
    pub totals: NutrientTotals,
}

impl WeekPlan {
    /// Elementwise sum over the slot's entries; zero for an empty slot.
    pub fn meal_totals(&self, day: Weekday, slot: MealSlot) -> NutrientTotals {
        self.get_slot(day, slot)
            .iter()
            .fold(NutrientTotals::ZERO, |acc, e| {
                acc + NutrientTotals::of_food(&e.food)
            })
    }

    /// Sum of meal totals over the day's four slots.
    pub fn day_totals(&self, day: Weekday) -> NutrientTotals {
        MealSlot::ALL
            .into_iter()
            .fold(NutrientTotals::ZERO, |acc, slot| {
                acc + self.meal_totals(day, slot)
            })
    }

    /// One row per day, Monday through Sunday.
    pub fn week_summary(&self) -> Vec<DaySummary> {
        Weekday::ALL
            .into_iter()
            .map(|day| DaySummary {
                day,
                item_count: self.day(day).item_count(),
                totals: self.day_totals(day),
            })
            .collect()
    }

    /// Remaining budget per nutrient, clamped at zero: remaining is never
    /// reported negative. Callers wanting "over budget" compare consumed vs
    /// target directly.
    pub fn remaining(&self, day: Weekday, targets: &MacroTargets) -> NutrientTotals {
        let consumed = self.day_totals(day);
        NutrientTotals {
            carbs: (targets.carbs - consumed.carbs).max(0.0),
            protein: (targets.protein - consumed.protein).max(0.0),
            fat: (targets.fat - consumed.fat).max(0.0),
            calories: (targets.calories - consumed.calories).max(0.0),
        }
    }

    /// Calorie status band for one day against the target envelope.
    pub fn day_status(&self, day: Weekday, targets: &MacroTargets) -> BudgetStatus {
        BudgetStatus::classify(self.day_totals(day).calories, targets.calories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::food;

    fn plan_with_breakfast(calories: f64) -> WeekPlan {
        let mut plan = WeekPlan::new();
        // carbs*4 + protein*4 + fat*9 = calories for the fixture helper;
        // 300 kcal -> 45C/30P/0F as one plausible food.
        let carbs = calories / 4.0 * 0.6;
        let protein = calories / 4.0 * 0.4;
        plan.add_food(
            Weekday::Monday,
            MealSlot::Breakfast,
            food("Porridge", "Starches", carbs, protein, 0.0),
        );
        plan
    }

    #[test]
    fn empty_slot_totals_are_zero() {
        let plan = WeekPlan::new();
        assert!(plan.meal_totals(Weekday::Monday, MealSlot::Lunch).is_zero());
        assert!(plan.day_totals(Weekday::Monday).is_zero());
    }

    #[test]
    fn day_totals_sum_all_four_slots() {
        let mut plan = WeekPlan::new();
        for slot in MealSlot::ALL {
            plan.add_food(Weekday::Thursday, slot, food("Apple", "Fruits", 15.0, 0.0, 0.0));
        }
        let totals = plan.day_totals(Weekday::Thursday);
        assert_eq!(totals.carbs, 60.0);
        assert_eq!(totals.calories, 240.0);
    }

    #[test]
    fn fresh_plan_summary_has_seven_rows_of_zero_items() {
        let summary = WeekPlan::new().week_summary();
        assert_eq!(summary.len(), 7);
        assert!(summary.iter().all(|row| row.item_count == 0 && row.totals.is_zero()));
        assert_eq!(summary[0].day, Weekday::Monday);
        assert_eq!(summary[6].day, Weekday::Sunday);
    }

    #[test]
    fn single_300_kcal_breakfast_against_2000_target() {
        let plan = plan_with_breakfast(300.0);
        let targets = MacroTargets::default();

        assert_eq!(plan.day_totals(Weekday::Monday).calories, 300.0);
        assert_eq!(plan.remaining(Weekday::Monday, &targets).calories, 1700.0);
        assert_eq!(plan.day_status(Weekday::Monday, &targets), BudgetStatus::Normal);
    }

    #[test]
    fn remaining_is_never_negative() {
        let plan = plan_with_breakfast(5000.0);
        let remaining = plan.remaining(Weekday::Monday, &MacroTargets::default());
        assert_eq!(remaining.calories, 0.0);
        assert_eq!(remaining.carbs, 0.0);
        assert_eq!(remaining.protein, 0.0);
        assert!(remaining.fat >= 0.0);
    }

    #[test]
    fn status_bands() {
        assert_eq!(BudgetStatus::classify(100.0, 2000.0), BudgetStatus::Normal);
        assert_eq!(BudgetStatus::classify(1800.0, 2000.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(2000.0, 2000.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(2000.1, 2000.0), BudgetStatus::Exceeded);
    }

    #[test]
    fn zero_target_with_zero_consumed_is_normal_not_warning() {
        assert_eq!(BudgetStatus::classify(0.0, 0.0), BudgetStatus::Normal);
        assert_eq!(BudgetStatus::classify(1.0, 0.0), BudgetStatus::Exceeded);
    }

    #[test]
    fn macro_spec_percent_resolves_through_the_validity_check() {
        let targets = MacroSpec::Percent {
            carbs: 40.0,
            protein: 30.0,
            fat: 30.0,
        }
        .into_targets(2000.0)
        .unwrap();
        assert_eq!(targets.carbs, 200.0);
        assert_eq!(targets.protein, 150.0);
        assert_eq!(targets.calories, 2000.0);

        let invalid = MacroSpec::Percent {
            carbs: 50.0,
            protein: 30.0,
            fat: 30.0,
        }
        .into_targets(2000.0);
        assert!(invalid.is_err());
    }

    #[test]
    fn macro_spec_grams_passes_through() {
        let targets = MacroSpec::Grams {
            carbs: 180.0,
            protein: 140.0,
            fat: 60.0,
        }
        .into_targets(1900.0)
        .unwrap();
        assert_eq!(targets.carbs, 180.0);
        assert_eq!(targets.calories, 1900.0);
    }

    #[test]
    fn default_targets_are_the_fixed_fallback_envelope() {
        let t = MacroTargets::default();
        assert_eq!(
            (t.calories, t.carbs, t.protein, t.fat),
            (2000.0, 200.0, 150.0, 65.0)
        );
    }
}
