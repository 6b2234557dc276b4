//! Views over more than one day: the weekly calorie report and progress
//! toward the target weight.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::daily::DailySummary;
use crate::error::{EngineError, Result, positive};

/// Days covered by a weekly report.
pub const REPORT_DAYS: usize = 7;

/// Distance from the target weight that counts as having reached it.
pub const GOAL_REACHED_TOLERANCE_KG: f64 = 0.5;

/// Calories eaten over the last seven days, oldest first.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Days without a summary read as 0 kcal.
    pub calories: [f64; REPORT_DAYS],
    /// Series total divided by seven, rounded to whole kcal.
    pub average_calories: u32,
    /// Consecutive days with food logged, counting back from the last day.
    pub streak_days: u32,
}

/// Build the report from daily summaries in date order.
///
/// Only the last seven summaries are used. With fewer than seven, the
/// missing days are padded at the start as empty days, so the average is
/// always taken over a full week.
pub fn weekly_report(days: &[DailySummary]) -> WeeklyReport {
    let recent = &days[days.len().saturating_sub(REPORT_DAYS)..];
    let mut calories = [0.0; REPORT_DAYS];
    let offset = REPORT_DAYS - recent.len();
    for (slot, day) in calories[offset..].iter_mut().zip(recent) {
        *slot = day.total_calories_in;
    }

    let sum: f64 = calories.iter().sum();
    let streak_days = calories.iter().rev().take_while(|&&kcal| kcal > 0.0).count() as u32;

    WeeklyReport {
        calories,
        average_calories: (sum / REPORT_DAYS as f64).round().max(0.0) as u32,
        streak_days,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Lose,
    Gain,
}

impl fmt::Display for GoalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalDirection::Lose => write!(f, "losing"),
            GoalDirection::Gain => write!(f, "gaining"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub current_kg: f64,
    pub target_kg: f64,
    pub remaining_kg: f64,
    /// `Gain` when already at the target.
    pub direction: GoalDirection,
    /// Within [`GOAL_REACHED_TOLERANCE_KG`] of the target.
    pub reached: bool,
}

pub fn goal_progress(current_weight_kg: f64, target_weight_kg: f64) -> Result<GoalProgress> {
    let current =
        positive(current_weight_kg, "current weight").map_err(EngineError::InvalidMetrics)?;
    let target = positive(target_weight_kg, "target weight").map_err(EngineError::InvalidTarget)?;
    let remaining_kg = (current - target).abs();

    Ok(GoalProgress {
        current_kg: current,
        target_kg: target,
        remaining_kg,
        direction: if current > target {
            GoalDirection::Lose
        } else {
            GoalDirection::Gain
        },
        reached: remaining_kg <= GOAL_REACHED_TOLERANCE_KG,
    })
}
