//! Nutrition target and progress engine.
//!
//! Pure functions that turn a body profile into energy and macronutrient
//! targets, propose weight-change plans, project a weight trajectory, and
//! aggregate a day's log against the active targets, then report on the week
//! and on progress toward the target weight. Nothing here performs
//! I/O or keeps state between calls.

pub mod body;
pub mod daily;
pub mod energy;
pub mod error;
pub mod exercise;
pub mod hydration;
pub mod macros;
pub mod metrics;
pub mod percent;
pub mod plan;
pub mod profile;
pub mod report;
pub mod trajectory;

pub use body::{WeightRange, bmi, check_target_weight, healthy_weight_range};
pub use daily::{
    DailySummary, DailyTargets, DayLog, ExerciseEntry, FoodEntry, LogEntry, MacroProgress,
    MealGroups, MealSlot, MealTotal, group_by_meal, summarize,
};
pub use energy::{EnergyTargets, compute_bmr, compute_tdee, energy_targets};
pub use error::{EngineError, Result};
pub use exercise::exercise_calories;
pub use hydration::{GLASS_ML, Hydration, hydration, water_target_liters, water_target_ml};
pub use macros::{MacroTargets, allocate};
pub use metrics::{ActivityLevel, BodyMetrics, Sex};
pub use percent::display_percent;
pub use plan::{Plan, PlanLabel, PlanSet, PlanWarning, generate};
pub use profile::UserProfile;
pub use report::{
    GOAL_REACHED_TOLERANCE_KG, GoalDirection, GoalProgress, REPORT_DAYS, WeeklyReport,
    goal_progress, weekly_report,
};
pub use trajectory::{TRAJECTORY_LABELS, Trajectory, project};
