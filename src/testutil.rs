//! Shared fixtures for unit tests.

use crate::exchange::FoodItem;

pub(crate) fn food(name: &str, group: &str, carbs: f64, protein: f64, fat: f64) -> FoodItem {
    FoodItem {
        name: name.into(),
        group: group.into(),
        subgroup: None,
        portion: "1 serving".into(),
        carbohydrates: carbs,
        protein,
        fat,
        calories: carbs * 4.0 + protein * 4.0 + fat * 9.0,
    }
}
