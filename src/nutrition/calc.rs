use serde::{Deserialize, Serialize};

use super::inputs::{ensure_positive, ActivityLevel, Gender, GoalKind, MacroSplit};
use crate::error::{AppError, AppResult};

pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

/// BMI = weight / height², rounded to two decimals.
pub fn bmi(weight_kg: f64, height_m: f64) -> AppResult<BmiResult> {
    let weight = ensure_positive("weight", weight_kg)?;
    let height = ensure_positive("height", height_m)?;

    let value = (weight / (height * height) * 100.0).round() / 100.0;
    Ok(BmiResult {
        bmi: value,
        category: BmiCategory::from_bmi(value),
    })
}

/// Basal metabolic rate via Mifflin-St Jeor, keyed by gender. Height in cm.
pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age_years: f64) -> AppResult<f64> {
    let weight = ensure_positive("weight", weight_kg)?;
    let height = ensure_positive("height", height_cm)?;
    let age = ensure_positive("age", age_years)?;

    let base = 10.0 * weight + 6.25 * height - 5.0 * age;
    Ok(match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    })
}

/// TDEE = BMR × fixed activity multiplier.
pub fn tdee(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * level.multiplier()
}

/// Goal calories = TDEE + signed goal offset.
pub fn goal_calories(tdee: f64, goal: GoalKind) -> f64 {
    tdee + goal.calorie_offset()
}

/// Gram and calorie amounts for one macro split applied to a calorie target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroValues {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub grams: MacroValues,
    pub calories: MacroValues,
    pub total_calories: f64,
}

/// Derives macro grams from a calorie total and a percentage split.
///
/// grams = calories × pct/100 ÷ kcal-per-gram (4 for carbs/protein, 9 for
/// fat). The split must sum to 100 within ±0.1.
pub fn macro_grams(calories: f64, split: MacroSplit) -> AppResult<MacroBreakdown> {
    let calories = ensure_positive("calories", calories)?;
    if !split.is_valid() {
        return Err(AppError::invalid_input(format!(
            "percentages must add up to 100%, got {}%",
            split.total()
        )));
    }

    let carbs_kcal = calories * split.carbs_percent / 100.0;
    let protein_kcal = calories * split.protein_percent / 100.0;
    let fat_kcal = calories * split.fat_percent / 100.0;

    Ok(MacroBreakdown {
        grams: MacroValues {
            carbs: carbs_kcal / KCAL_PER_GRAM_CARBS,
            protein: protein_kcal / KCAL_PER_GRAM_PROTEIN,
            fat: fat_kcal / KCAL_PER_GRAM_FAT,
        },
        calories: MacroValues {
            carbs: carbs_kcal,
            protein: protein_kcal,
            fat: fat_kcal,
        },
        total_calories: calories,
    })
}
