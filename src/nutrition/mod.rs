//! Pure nutrition calculators: BMI, Mifflin-St Jeor BMR, TDEE, goal calories
//! and macro gram splits. Stateless and deterministic; invalid anthropometric
//! input is rejected at this boundary, never propagated as a panic.

mod calc;
mod inputs;

pub use calc::{
    bmi, bmr, goal_calories, macro_grams, tdee, BmiCategory, BmiResult, MacroBreakdown,
    MacroValues, KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
pub use inputs::{
    cm_to_m, feet_inches_to_cm, ActivityLevel, Gender, GoalKind, MacroSplit,
};
