use serde::{Deserialize, Serialize};

/// Fixed display ordering for exchange categories; anything not listed is
/// appended after these in first-seen order.
pub const CANONICAL_CATEGORY_ORDER: [&str; 7] = [
    "Starches",
    "Fruits",
    "Milk",
    "Vegetables",
    "Meat",
    "Fats",
    "Sweets",
];

/// One exchange-list food with its reference portion and per-portion
/// nutrient values. Immutable reference data owned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
    pub portion: String,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
    pub calories: f64,
}

/// In-memory view over the exchange list fetched from the remote collaborator.
#[derive(Debug, Clone, Default)]
pub struct ExchangeCatalog {
    items: Vec<FoodItem>,
}

impl ExchangeCatalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    pub fn list_all(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring match against name, group or subgroup.
    pub fn filter(&self, term: &str) -> Vec<&FoodItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item.group.to_lowercase().contains(&needle)
                    || item
                        .subgroup
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Groups items by category in canonical order, dropping empty
    /// categories. Unknown categories follow the canonical ones in the order
    /// they first appear.
    pub fn group_by_category(&self) -> Vec<(String, Vec<&FoodItem>)> {
        self.group_filtered("")
    }

    /// Same as [`group_by_category`](Self::group_by_category) but over a
    /// filtered subset, as the planner's food picker shows.
    pub fn group_filtered(&self, term: &str) -> Vec<(String, Vec<&FoodItem>)> {
        let mut groups: Vec<(String, Vec<&FoodItem>)> = CANONICAL_CATEGORY_ORDER
            .iter()
            .map(|g| (g.to_string(), Vec::new()))
            .collect();

        let matched = if term.is_empty() {
            self.items.iter().collect::<Vec<_>>()
        } else {
            self.filter(term)
        };

        for item in matched {
            match groups.iter_mut().find(|(g, _)| *g == item.group) {
                Some((_, bucket)) => bucket.push(item),
                None => groups.push((item.group.clone(), vec![item])),
            }
        }

        groups.retain(|(_, bucket)| !bucket.is_empty());
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::food;

    fn sample_catalog() -> ExchangeCatalog {
        ExchangeCatalog::new(vec![
            food("Olive oil", "Fats", 0.0, 0.0, 5.0),
            food("White rice", "Starches", 15.0, 2.0, 0.0),
            food("Apple", "Fruits", 15.0, 0.0, 0.0),
            food("Grilled chicken", "Meat", 0.0, 7.0, 3.0),
            food("Brown rice", "Starches", 15.0, 3.0, 1.0),
            food("Herbal tea", "Beverages", 0.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn list_all_is_finite_and_restartable() {
        let catalog = sample_catalog();
        let first: Vec<_> = catalog.list_all().iter().map(|f| &f.name).collect();
        let second: Vec<_> = catalog.list_all().iter().map(|f| &f.name).collect();
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
    }

    #[test]
    fn filter_matches_name_and_group_case_insensitively() {
        let catalog = sample_catalog();
        assert_eq!(catalog.filter("RICE").len(), 2);
        assert_eq!(catalog.filter("starches").len(), 2);
        assert_eq!(catalog.filter("no such food").len(), 0);
    }

    #[test]
    fn filter_matches_subgroup() {
        let mut item = food("Skim milk", "Milk", 12.0, 8.0, 0.0);
        item.subgroup = Some("Fat-free".into());
        let catalog = ExchangeCatalog::new(vec![item]);
        assert_eq!(catalog.filter("fat-free").len(), 1);
    }

    #[test]
    fn grouping_preserves_canonical_order_and_drops_empty_categories() {
        let catalog = sample_catalog();
        let groups = catalog.group_by_category();
        let names: Vec<&str> = groups.iter().map(|(g, _)| g.as_str()).collect();
        // Milk, Vegetables and Sweets are absent; Beverages trails the canon.
        assert_eq!(names, vec!["Starches", "Fruits", "Meat", "Fats", "Beverages"]);
    }

    #[test]
    fn grouping_a_filtered_subset() {
        let catalog = sample_catalog();
        let groups = catalog.group_filtered("rice");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Starches");
        assert_eq!(groups[0].1.len(), 2);
    }
}
