use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::metrics::{ActivityLevel, BodyMetrics};

/// Resting and total daily energy expenditure.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyTargets {
    /// Basal metabolic rate in kcal/day, unrounded.
    pub bmr: f64,
    /// Total daily energy expenditure in kcal/day.
    pub tdee: u32,
}

/// Mifflin-St Jeor BMR: `10*kg + 6.25*cm - 5*age + (5 | -161)`.
pub fn compute_bmr(metrics: &BodyMetrics) -> f64 {
    10.0 * metrics.weight_kg() + 6.25 * metrics.height_cm() - 5.0 * metrics.age_years() as f64
        + metrics.sex().bmr_offset()
}

/// TDEE = BMR scaled by the activity factor, rounded to whole kcal.
///
/// A BMR that is not a positive number (possible for extreme ages at tiny
/// body sizes) cannot yield a meaningful target and is rejected.
pub fn compute_tdee(bmr: f64, activity_level: ActivityLevel) -> Result<u32> {
    if !bmr.is_finite() || bmr <= 0.0 {
        return Err(EngineError::InvalidMetrics(format!(
            "metrics yield a non-positive BMR ({bmr:.1} kcal)"
        )));
    }
    Ok((bmr * activity_level.factor()).round() as u32)
}

/// BMR and TDEE for a body profile at its own activity level.
pub fn energy_targets(metrics: &BodyMetrics) -> Result<EnergyTargets> {
    let bmr = compute_bmr(metrics);
    let tdee = compute_tdee(bmr, metrics.activity_level())?;
    Ok(EnergyTargets { bmr, tdee })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Sex;
    use approx::assert_relative_eq;

    fn reference_male() -> BodyMetrics {
        BodyMetrics::new(Sex::Male, 25, 180.0, 80.0, ActivityLevel::Moderate).unwrap()
    }

    #[test]
    fn test_reference_male() {
        let e = energy_targets(&reference_male()).unwrap();
        assert_relative_eq!(e.bmr, 1805.0, epsilon = 1e-9);
        assert_eq!(e.tdee, 2482);
    }

    #[test]
    fn test_female_offset() {
        let m = BodyMetrics::new(Sex::Female, 30, 165.0, 60.0, ActivityLevel::Low).unwrap();
        // 600 + 1031.25 - 150 - 161
        assert_relative_eq!(compute_bmr(&m), 1320.25, epsilon = 1e-9);
        assert_eq!(compute_tdee(1320.25, ActivityLevel::Low).unwrap(), 1584);
    }

    #[test]
    fn test_tdee_grows_with_activity() {
        let bmr = compute_bmr(&reference_male());
        let tdees: Vec<u32> = ActivityLevel::ALL
            .iter()
            .map(|&a| compute_tdee(bmr, a).unwrap())
            .collect();
        assert!(tdees.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_non_positive_bmr_rejected() {
        let m = BodyMetrics::new(Sex::Female, 110, 40.0, 3.0, ActivityLevel::Low).unwrap();
        assert!(compute_bmr(&m) < 0.0);
        assert!(matches!(
            energy_targets(&m),
            Err(EngineError::InvalidMetrics(_))
        ));
        assert!(compute_tdee(f64::NAN, ActivityLevel::High).is_err());
    }
}
