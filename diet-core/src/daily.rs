use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, Result, non_negative};
use crate::hydration::{Hydration, hydration};
use crate::macros::MacroTargets;
use crate::percent::display_percent;

/// Meal a food entry was logged under.
///
/// `Other` collects entries whose declared slot is missing or unknown.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Other,
}

impl MealSlot {
    /// Display order of the dashboard buckets.
    pub const ALL: [MealSlot; 5] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
        MealSlot::Other,
    ];

    fn index(self) -> usize {
        match self {
            MealSlot::Breakfast => 0,
            MealSlot::Lunch => 1,
            MealSlot::Dinner => 2,
            MealSlot::Snack => 3,
            MealSlot::Other => 4,
        }
    }

    /// Slot to preselect for a meal logged at `hour` (0-23, local time).
    pub fn for_hour(hour: u32) -> MealSlot {
        match hour {
            5..=10 => MealSlot::Breakfast,
            11..=16 => MealSlot::Lunch,
            17..=21 => MealSlot::Dinner,
            _ => MealSlot::Snack,
        }
    }

    /// Never fails: unknown names land in `Other`.
    pub fn parse_lenient(s: &str) -> MealSlot {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => MealSlot::Breakfast,
            "lunch" => MealSlot::Lunch,
            "dinner" => MealSlot::Dinner,
            "snack" | "snacks" => MealSlot::Snack,
            _ => MealSlot::Other,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
            MealSlot::Other => "Other",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carb_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    /// Slot name as stored; see [`FoodEntry::slot`].
    #[serde(default)]
    pub meal_slot: Option<String>,
    #[serde(default)]
    pub portion: Option<String>,
}

impl FoodEntry {
    pub fn slot(&self) -> MealSlot {
        self.meal_slot
            .as_deref()
            .map_or(MealSlot::Other, MealSlot::parse_lenient)
    }

    /// Calories and macro grams must be finite and not negative.
    pub fn validate(&self) -> Result<()> {
        for (value, what) in [
            (self.calories, "calories"),
            (self.protein_g, "protein"),
            (self.carb_g, "carbohydrate"),
            (self.fat_g, "fat"),
        ] {
            non_negative(value, what).map_err(|reason| EngineError::InvalidLogEntry {
                name: self.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub name: String,
    #[serde(default)]
    pub duration_minutes: u32,
    pub calories_burnt: f64,
}

impl ExerciseEntry {
    pub fn validate(&self) -> Result<()> {
        non_negative(self.calories_burnt, "calories burnt")
            .map(drop)
            .map_err(|reason| EngineError::InvalidLogEntry {
                name: self.name.clone(),
                reason,
            })
    }
}

/// One row of a day's log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogEntry {
    Food(FoodEntry),
    Exercise(ExerciseEntry),
}

impl LogEntry {
    pub fn validate(&self) -> Result<()> {
        match self {
            LogEntry::Food(food) => food.validate(),
            LogEntry::Exercise(ex) => ex.validate(),
        }
    }
}

/// Everything logged for one day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    #[serde(default)]
    pub entries: Vec<LogEntry>,
    #[serde(default)]
    pub water_ml: u32,
}

/// Targets the day is measured against.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: u32,
    pub macros: MacroTargets,
    pub water_ml: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub total_g: f64,
    pub target_g: u32,
    /// Capped to [0, 100] for progress bars; `total_g` is not capped.
    pub percent: f64,
}

impl MacroProgress {
    fn new(total_g: f64, target_g: u32) -> Self {
        MacroProgress {
            total_g,
            target_g,
            percent: display_percent(total_g, target_g as f64),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealTotal {
    pub slot: MealSlot,
    pub calories: f64,
    pub entries: usize,
}

/// Dashboard figures for one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_calories_in: f64,
    pub total_calories_burnt: f64,
    pub net_calories: f64,
    /// Negative when the user is over target.
    pub remaining_calories: f64,
    pub calorie_target: u32,
    pub progress_percent: f64,
    pub protein: MacroProgress,
    pub carb: MacroProgress,
    pub fat: MacroProgress,
    pub hydration: Hydration,
    pub meals: Vec<MealTotal>,
}

/// Food entries bucketed by meal slot, plus the day's exercise.
#[derive(Debug, Default)]
pub struct MealGroups<'a> {
    buckets: [Vec<&'a FoodEntry>; 5],
    pub exercises: Vec<&'a ExerciseEntry>,
}

impl<'a> MealGroups<'a> {
    pub fn slot(&self, slot: MealSlot) -> &[&'a FoodEntry] {
        &self.buckets[slot.index()]
    }

    /// Non-empty buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &[&'a FoodEntry])> + '_ {
        MealSlot::ALL
            .into_iter()
            .map(|s| (s, self.slot(s)))
            .filter(|(_, entries)| !entries.is_empty())
    }
}

pub fn group_by_meal(entries: &[LogEntry]) -> MealGroups<'_> {
    let mut groups = MealGroups::default();
    for entry in entries {
        match entry {
            LogEntry::Food(food) => groups.buckets[food.slot().index()].push(food),
            LogEntry::Exercise(ex) => groups.exercises.push(ex),
        }
    }
    groups
}

/// Aggregate a day's log against the active targets.
pub fn summarize(log: &DayLog, targets: &DailyTargets) -> Result<DailySummary> {
    if targets.calories == 0 {
        return Err(EngineError::InvalidTargets(
            "daily calorie target must be greater than zero".into(),
        ));
    }
    for entry in &log.entries {
        entry.validate()?;
    }

    let groups = group_by_meal(&log.entries);

    let mut total_in = 0.0;
    let (mut protein, mut carb, mut fat) = (0.0, 0.0, 0.0);
    let mut meals = Vec::with_capacity(MealSlot::ALL.len());
    for slot in MealSlot::ALL {
        let foods = groups.slot(slot);
        let calories: f64 = foods.iter().map(|f| f.calories).sum();
        for f in foods {
            protein += f.protein_g;
            carb += f.carb_g;
            fat += f.fat_g;
        }
        total_in += calories;
        meals.push(MealTotal {
            slot,
            calories,
            entries: foods.len(),
        });
    }
    let total_burnt: f64 = groups.exercises.iter().map(|e| e.calories_burnt).sum();

    let net = total_in - total_burnt;
    let target = targets.calories as f64;

    Ok(DailySummary {
        total_calories_in: total_in,
        total_calories_burnt: total_burnt,
        net_calories: net,
        remaining_calories: target - net,
        calorie_target: targets.calories,
        progress_percent: display_percent(net, target),
        protein: MacroProgress::new(protein, targets.macros.protein_g),
        carb: MacroProgress::new(carb, targets.macros.carb_g),
        fat: MacroProgress::new(fat, targets.macros.fat_g),
        hydration: hydration(log.water_ml, targets.water_ml),
        meals,
    })
}
