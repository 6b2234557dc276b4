use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result, positive};
use crate::percent::display_percent;

/// Size of one logged glass of water.
pub const GLASS_ML: u32 = 200;

/// Litres of water per kilogram of body weight per day.
pub const LITERS_PER_KG: f64 = 0.033;

/// Daily water target in litres, rounded to one decimal.
pub fn water_target_liters(weight_kg: f64) -> Result<f64> {
    let kg = positive(weight_kg, "weight").map_err(EngineError::InvalidMetrics)?;
    Ok((kg * LITERS_PER_KG * 10.0).round() / 10.0)
}

/// Daily water target in millilitres.
pub fn water_target_ml(weight_kg: f64) -> Result<u32> {
    Ok(liters_to_ml(water_target_liters(weight_kg)?))
}

pub fn liters_to_ml(liters: f64) -> u32 {
    (liters * 1000.0).round() as u32
}

/// Water intake against the daily target, in ml and in glasses.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hydration {
    pub water_ml: u32,
    pub target_ml: u32,
    /// Whole glasses drunk; a partial glass is not counted.
    pub drunk_glasses: u32,
    /// Glasses needed to reach the target, rounded up.
    pub total_glasses: u32,
    pub percent: f64,
}

pub fn hydration(water_ml: u32, target_ml: u32) -> Hydration {
    Hydration {
        water_ml,
        target_ml,
        drunk_glasses: water_ml / GLASS_ML,
        total_glasses: target_ml.div_ceil(GLASS_ML),
        percent: display_percent(water_ml as f64, target_ml as f64),
    }
}
