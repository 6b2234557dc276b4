use crate::daily::ExerciseEntry;
use crate::error::{EngineError, Result, positive};

/// Calories burnt by an activity of intensity `met`:
/// `MET x body weight (kg) x hours`, truncated to whole kcal.
pub fn exercise_calories(met: f64, weight_kg: f64, duration_minutes: u32) -> Result<u32> {
    if !met.is_finite() || met < 0.0 {
        return Err(EngineError::InvalidMetrics(format!(
            "MET must be a non-negative number, got {met}"
        )));
    }
    let kg = positive(weight_kg, "weight").map_err(EngineError::InvalidMetrics)?;
    Ok((met * kg * duration_minutes as f64 / 60.0) as u32)
}

impl ExerciseEntry {
    pub fn from_met(
        name: impl Into<String>,
        met: f64,
        weight_kg: f64,
        duration_minutes: u32,
    ) -> Result<Self> {
        Ok(ExerciseEntry {
            name: name.into(),
            duration_minutes,
            calories_burnt: exercise_calories(met, weight_kg, duration_minutes)? as f64,
        })
    }
}
