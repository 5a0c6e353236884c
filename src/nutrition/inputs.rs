use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// Activity level with its fixed TDEE multiplier.
///
/// Wire spellings follow the calculator form; the intake form's shorthand
/// variants are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "sedentary")]
    Sedentary,
    #[serde(rename = "lightly active", alias = "light")]
    LightlyActive,
    #[serde(rename = "moderately active", alias = "moderate")]
    ModeratelyActive,
    #[serde(rename = "very active", alias = "active", alias = "very_active")]
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly active",
            ActivityLevel::ModeratelyActive => "moderately active",
            ActivityLevel::VeryActive => "very active",
        })
    }
}

/// Dietary goal with its signed daily calorie offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    #[serde(rename = "weight loss")]
    WeightLoss,
    #[serde(rename = "maintenance")]
    Maintenance,
    #[serde(rename = "weight gain")]
    WeightGain,
}

impl GoalKind {
    pub const ALL: [GoalKind; 3] = [
        GoalKind::WeightLoss,
        GoalKind::Maintenance,
        GoalKind::WeightGain,
    ];

    pub fn calorie_offset(self) -> f64 {
        match self {
            GoalKind::WeightLoss => -300.0,
            GoalKind::Maintenance => 0.0,
            GoalKind::WeightGain => 300.0,
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalKind::WeightLoss => "weight loss",
            GoalKind::Maintenance => "maintenance",
            GoalKind::WeightGain => "weight gain",
        })
    }
}

/// A carbs/protein/fat percentage triple for deriving gram targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub carbs_percent: f64,
    pub protein_percent: f64,
    pub fat_percent: f64,
}

impl MacroSplit {
    pub fn new(carbs_percent: f64, protein_percent: f64, fat_percent: f64) -> Self {
        Self {
            carbs_percent,
            protein_percent,
            fat_percent,
        }
    }

    pub fn total(&self) -> f64 {
        self.carbs_percent + self.protein_percent + self.fat_percent
    }

    /// Percentages must sum to 100 within ±0.1 before grams are considered
    /// valid for persistence.
    pub fn is_valid(&self) -> bool {
        (self.total() - 100.0).abs() <= 0.1
    }
}

/// Validates a single anthropometric field: finite and strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "{name} must be a positive number"
        )));
    }
    Ok(value)
}

/// Converts an imperial height reading to centimeters, as the intake form
/// does before submission.
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    feet * 30.48 + inches * 2.54
}

pub fn cm_to_m(cm: f64) -> f64 {
    cm / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_activity_level_has_a_distinct_fixed_multiplier() {
        let mults: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert_eq!(mults, vec![1.2, 1.375, 1.55, 1.725]);
    }

    #[test]
    fn goal_offsets_are_minus_300_0_plus_300() {
        let offsets: Vec<f64> = GoalKind::ALL.iter().map(|g| g.calorie_offset()).collect();
        assert_eq!(offsets, vec![-300.0, 0.0, 300.0]);
    }

    #[test]
    fn split_validity_tolerates_a_tenth_of_a_percent() {
        assert!(MacroSplit::new(40.0, 30.0, 30.0).is_valid());
        assert!(MacroSplit::new(40.05, 30.0, 30.0).is_valid());
        assert!(!MacroSplit::new(40.2, 30.0, 30.0).is_valid());
        assert!(!MacroSplit::new(50.0, 30.0, 30.0).is_valid());
    }

    #[test]
    fn intake_form_spellings_deserialize_as_aliases() {
        let light: ActivityLevel = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(light, ActivityLevel::LightlyActive);
        let very: ActivityLevel = serde_json::from_str("\"very_active\"").unwrap();
        assert_eq!(very, ActivityLevel::VeryActive);
        let canonical: ActivityLevel = serde_json::from_str("\"moderately active\"").unwrap();
        assert_eq!(canonical, ActivityLevel::ModeratelyActive);
    }

    #[test]
    fn imperial_height_converts_to_cm() {
        let cm = feet_inches_to_cm(5.0, 10.0);
        assert!((cm - 177.8).abs() < 1e-9);
        assert!((cm_to_m(cm) - 1.778).abs() < 1e-9);
    }

    #[test]
    fn ensure_positive_rejects_non_finite_and_negative() {
        assert!(ensure_positive("weight", f64::NAN).is_err());
        assert!(ensure_positive("weight", f64::INFINITY).is_err());
        assert!(ensure_positive("weight", -70.0).is_err());
        assert!(ensure_positive("weight", 0.0).is_err());
        assert_eq!(ensure_positive("weight", 70.0).unwrap(), 70.0);
    }
}
