use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, Result, positive};
use crate::metrics::Sex;

/// Energy equivalent of one kilogram of body mass, in kcal.
pub const KCAL_PER_KG: f64 = 7700.0;

/// Weekly rates of change offered to the user, slowest first.
pub const PLAN_SPEEDS_KG_PER_WEEK: [f64; 3] = [0.25, 0.5, 1.0];

/// Name of a plan, tied to its position in a [`PlanSet`].
#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum PlanLabel {
    Gentle,
    #[default]
    Recommended,
    Fast,
}

impl PlanLabel {
    pub const ALL: [PlanLabel; 3] = [PlanLabel::Gentle, PlanLabel::Recommended, PlanLabel::Fast];

    pub fn index(self) -> usize {
        match self {
            PlanLabel::Gentle => 0,
            PlanLabel::Recommended => 1,
            PlanLabel::Fast => 2,
        }
    }
}

impl fmt::Display for PlanLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanLabel::Gentle => "Gentle",
            PlanLabel::Recommended => "Recommended",
            PlanLabel::Fast => "Fast",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanLabel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gentle" => Ok(PlanLabel::Gentle),
            "recommended" => Ok(PlanLabel::Recommended),
            "fast" => Ok(PlanLabel::Fast),
            _ => Err(EngineError::UnrecognizedEnum {
                kind: "plan",
                value: s.to_string(),
            }),
        }
    }
}

/// Advisory attached to a plan that was adjusted for safety.
///
/// A plan carrying a warning is still a valid result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlanWarning {
    /// The calorie target was raised to the sex-specific minimum.
    CalorieFloorApplied { floor: u32 },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::CalorieFloorApplied { floor } => {
                write!(f, "raised to the {floor} kcal minimum")
            }
        }
    }
}

/// One candidate calorie plan toward a target weight.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub label: PlanLabel,
    pub speed_kg_per_week: f64,
    pub target_calories: u32,
    pub estimated_weeks: u32,
    pub warning: Option<PlanWarning>,
}

/// The three plans, always ordered Gentle, Recommended, Fast.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanSet([Plan; 3]);

impl PlanSet {
    pub fn iter(&self) -> impl Iterator<Item = &Plan> {
        self.0.iter()
    }

    pub fn get(&self, label: PlanLabel) -> &Plan {
        &self.0[label.index()]
    }

    pub fn recommended(&self) -> &Plan {
        self.get(PlanLabel::Recommended)
    }

    /// The chosen plan, or Recommended when nothing was chosen.
    pub fn select(&self, label: Option<PlanLabel>) -> &Plan {
        self.get(label.unwrap_or_default())
    }
}

/// Generate the Gentle / Recommended / Fast plans for moving from
/// `current_weight_kg` to `target_weight_kg`.
///
/// Only losing plans are clamped to the calorie floor of `sex`; gaining
/// plans are returned unclamped.
pub fn generate(
    current_weight_kg: f64,
    target_weight_kg: f64,
    tdee: u32,
    sex: Sex,
) -> Result<PlanSet> {
    let current =
        positive(current_weight_kg, "current weight").map_err(EngineError::InvalidPlanInput)?;
    let target =
        positive(target_weight_kg, "target weight").map_err(EngineError::InvalidPlanInput)?;
    if tdee == 0 {
        return Err(EngineError::InvalidPlanInput(
            "TDEE must be greater than zero".into(),
        ));
    }

    let diff_kg = target - current;
    let is_losing = diff_kg < 0.0;
    let total_calorie_delta = diff_kg.abs() * KCAL_PER_KG;
    let tdee = tdee as i64;
    let floor = sex.calorie_floor() as i64;

    let plans = PlanLabel::ALL.map(|label| {
        let speed = PLAN_SPEEDS_KG_PER_WEEK[label.index()];
        let daily_change = (speed * KCAL_PER_KG / 7.0).round() as i64;

        let unclamped = if is_losing {
            tdee - daily_change
        } else {
            tdee + daily_change
        };
        let (target_calories, warning) = if is_losing && unclamped < floor {
            (floor, Some(PlanWarning::CalorieFloorApplied { floor: floor as u32 }))
        } else {
            (unclamped, None)
        };

        let actual_daily_change = (target_calories - tdee).abs();
        let estimated_weeks = if actual_daily_change > 0 {
            let days = (total_calorie_delta / actual_daily_change as f64).round();
            (days / 7.0).round() as u32
        } else {
            0
        };

        Plan {
            label,
            speed_kg_per_week: speed,
            target_calories: target_calories as u32,
            estimated_weeks,
            warning,
        }
    });

    Ok(PlanSet(plans))
}

/* ===========================
Unit tests
=========================== */
