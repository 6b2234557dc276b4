use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result, positive};
use crate::plan::Plan;

/// Chart captions for the four trajectory points.
pub const TRAJECTORY_LABELS: [&str; 4] = ["Start", "Month 1", "Month 2", "Target"];

/// Week offsets of the two intermediate points.
const CHECKPOINT_WEEKS: [f64; 2] = [4.0, 8.0];

/// Projected body weight at start, +4 weeks, +8 weeks and at the target.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory([f64; 4]);

impl Trajectory {
    pub fn points(&self) -> &[f64; 4] {
        &self.0
    }

    pub fn start_kg(&self) -> f64 {
        self.0[0]
    }

    pub fn target_kg(&self) -> f64 {
        self.0[3]
    }

    /// Points paired with their chart captions.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        TRAJECTORY_LABELS.iter().copied().zip(self.0.iter().copied())
    }
}

/// Project weight over time for `plan`, never crossing past the target.
pub fn project(current_weight_kg: f64, target_weight_kg: f64, plan: &Plan) -> Result<Trajectory> {
    let current =
        positive(current_weight_kg, "current weight").map_err(EngineError::InvalidPlanInput)?;
    let target =
        positive(target_weight_kg, "target weight").map_err(EngineError::InvalidPlanInput)?;

    let losing = current > target;
    let signed_speed = if losing {
        -plan.speed_kg_per_week
    } else {
        plan.speed_kg_per_week
    };

    let [month1, month2] = CHECKPOINT_WEEKS.map(|weeks| {
        let w = current + signed_speed * weeks;
        if losing { w.max(target) } else { w.min(target) }
    });

    Ok(Trajectory([current, month1, month2, target]))
}
