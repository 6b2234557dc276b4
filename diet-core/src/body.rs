use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result, positive};

pub const HEALTHY_BMI_MIN: f64 = 18.5;
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Healthy body-weight band for a given height.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

fn height_m_squared(height_cm: f64) -> Result<f64> {
    let cm = positive(height_cm, "height").map_err(EngineError::InvalidMetrics)?;
    let m = cm / 100.0;
    Ok(m * m)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    let kg = positive(weight_kg, "weight").map_err(EngineError::InvalidMetrics)?;
    Ok(kg / height_m_squared(height_cm)?)
}

/// Weights between BMI 18.5 and 24.9, rounded to 0.1 kg.
pub fn healthy_weight_range(height_cm: f64) -> Result<WeightRange> {
    let m2 = height_m_squared(height_cm)?;
    Ok(WeightRange {
        min_kg: round1(HEALTHY_BMI_MIN * m2),
        max_kg: round1(HEALTHY_BMI_MAX * m2),
    })
}

/// Reject target weights that would put the user below a healthy BMI.
///
/// Returns the target's BMI when it is acceptable.
pub fn check_target_weight(target_weight_kg: f64, height_cm: f64) -> Result<f64> {
    let target_bmi = bmi(target_weight_kg, height_cm)?;
    if target_bmi < HEALTHY_BMI_MIN {
        return Err(EngineError::UnsafeTargetWeight {
            bmi: target_bmi,
            min_kg: healthy_weight_range(height_cm)?.min_kg,
        });
    }
    Ok(target_bmi)
}
