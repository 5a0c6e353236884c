use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exchange::FoodItem;

/// Weekday labels in fixed Monday-first order. `Ord` follows declaration
/// order so day maps iterate in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four meal occasions of one day. Entry order within a slot is
/// insertion order, meaningful for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Snack,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Snack,
        MealSlot::Lunch,
        MealSlot::Dinner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Snack => "Snack",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

/// Session-unique identifier for a planned entry, assigned monotonically at
/// insertion so double-click removals stay stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EntryId(pub u64);

/// A food copied out of the exchange list into one meal slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedFoodEntry {
    pub id: EntryId,
    pub slot: MealSlot,
    #[serde(flatten)]
    pub food: FoodItem,
}

/// One day's four meal slots, all always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Vec<PlannedFoodEntry>,
    #[serde(default)]
    pub snack: Vec<PlannedFoodEntry>,
    #[serde(default)]
    pub lunch: Vec<PlannedFoodEntry>,
    #[serde(default)]
    pub dinner: Vec<PlannedFoodEntry>,
}

impl DayPlan {
    pub fn slot(&self, slot: MealSlot) -> &[PlannedFoodEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Snack => &self.snack,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<PlannedFoodEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Snack => &mut self.snack,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &PlannedFoodEntry> {
        MealSlot::ALL.into_iter().flat_map(|s| self.slot(s).iter())
    }

    pub fn item_count(&self) -> usize {
        self.entries().count()
    }
}

/// The full week. Always holds exactly seven day keys, possibly empty, so
/// aggregation stays total and rendering stays simple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Weekday, DayPlan>", into = "BTreeMap<Weekday, DayPlan>")]
pub struct WeekPlan {
    days: BTreeMap<Weekday, DayPlan>,
    next_entry_id: u64,
}

impl Default for WeekPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekPlan {
    /// A fresh plan with all 7×4 slots present and empty.
    pub fn new() -> Self {
        Self {
            days: Weekday::ALL
                .into_iter()
                .map(|d| (d, DayPlan::default()))
                .collect(),
            next_entry_id: 1,
        }
    }

    pub fn day(&self, day: Weekday) -> &DayPlan {
        // Construction and deserialization both guarantee all seven keys.
        &self.days[&day]
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DayPlan)> {
        self.days.iter().map(|(d, p)| (*d, p))
    }

    /// Appends a copy of `food` to the slot with a freshly generated unique
    /// id. Never fails; there is no capacity limit.
    pub fn add_food(&mut self, day: Weekday, slot: MealSlot, food: FoodItem) -> &PlannedFoodEntry {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;

        let entries = self
            .days
            .get_mut(&day)
            .expect("week plan holds every weekday")
            .slot_mut(slot);
        entries.push(PlannedFoodEntry { id, slot, food });
        entries.last().expect("entry just pushed")
    }

    /// Removes the entry with that id if present. A no-op on an absent id:
    /// double-click removals must not crash. Returns whether an entry was
    /// removed.
    pub fn remove_food(&mut self, day: Weekday, slot: MealSlot, id: EntryId) -> bool {
        let entries = self
            .days
            .get_mut(&day)
            .expect("week plan holds every weekday")
            .slot_mut(slot);
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Current slot contents in insertion order.
    pub fn get_slot(&self, day: Weekday, slot: MealSlot) -> &[PlannedFoodEntry] {
        self.day(day).slot(slot)
    }

    pub fn total_item_count(&self) -> usize {
        self.days.values().map(DayPlan::item_count).sum()
    }
}

// Deserialized plans may come from the backend with days missing and with
// previously assigned entry ids; fill the gaps and re-seed the id counter
// above anything already in use so uniqueness holds for new insertions.
impl From<BTreeMap<Weekday, DayPlan>> for WeekPlan {
    fn from(mut days: BTreeMap<Weekday, DayPlan>) -> Self {
        for day in Weekday::ALL {
            days.entry(day).or_default();
        }
        let max_id = days
            .values()
            .flat_map(DayPlan::entries)
            .map(|e| e.id.0)
            .max()
            .unwrap_or(0);
        Self {
            days,
            next_entry_id: max_id + 1,
        }
    }
}

impl From<WeekPlan> for BTreeMap<Weekday, DayPlan> {
    fn from(plan: WeekPlan) -> Self {
        plan.days
    }
}
