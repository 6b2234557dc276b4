//! Stored user profile and the flows that update it.
//!
//! The engine never persists a profile: every flow takes the current record
//! and returns a new one for the caller to store.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::body::check_target_weight;
use crate::daily::DailyTargets;
use crate::energy::{EnergyTargets, energy_targets};
use crate::error::{EngineError, Result, positive};
use crate::hydration::{liters_to_ml, water_target_liters};
use crate::macros::{MacroTargets, allocate};
use crate::metrics::{ActivityLevel, BodyMetrics};
use crate::plan::{Plan, PlanLabel, PlanSet, generate};
use crate::report::{GoalProgress, goal_progress};
use crate::trajectory::{Trajectory, project};

/// Body weights accepted when the user logs a new weight.
pub const WEIGHT_UPDATE_RANGE_KG: RangeInclusive<f64> = 30.0..=300.0;

/// Stored profile record.
///
/// Deserialization rejects a stored record whose targets could not have come
/// out of onboarding: non-positive weights, water or calorie targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawUserProfile")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub metrics: BodyMetrics,
    pub target_weight_kg: f64,
    pub daily_calorie_target: u32,
    pub water_target_liters: f64,
    #[serde(default)]
    pub macro_targets: Option<MacroTargets>,
    /// Plan the user picked; Recommended when absent.
    #[serde(default)]
    pub plan: Option<PlanLabel>,
}

#[derive(Deserialize)]
struct RawUserProfile {
    #[serde(default)]
    name: Option<String>,
    metrics: BodyMetrics,
    target_weight_kg: f64,
    daily_calorie_target: u32,
    water_target_liters: f64,
    #[serde(default)]
    macro_targets: Option<MacroTargets>,
    #[serde(default)]
    plan: Option<PlanLabel>,
}

impl TryFrom<RawUserProfile> for UserProfile {
    type Error = EngineError;

    fn try_from(raw: RawUserProfile) -> Result<Self> {
        positive(raw.target_weight_kg, "target weight").map_err(EngineError::InvalidTarget)?;
        if raw.daily_calorie_target == 0 {
            return Err(EngineError::InvalidTargets(
                "daily calorie target must be greater than zero".into(),
            ));
        }
        positive(raw.water_target_liters, "water target").map_err(EngineError::InvalidTargets)?;
        Ok(UserProfile {
            name: raw.name,
            metrics: raw.metrics,
            target_weight_kg: raw.target_weight_kg,
            daily_calorie_target: raw.daily_calorie_target,
            water_target_liters: raw.water_target_liters,
            macro_targets: raw.macro_targets,
            plan: raw.plan,
        })
    }
}

impl UserProfile {
    /// Build the first profile from the onboarding answers.
    pub fn onboard(
        name: Option<String>,
        metrics: BodyMetrics,
        target_weight_kg: f64,
        selection: Option<PlanLabel>,
    ) -> Result<Self> {
        check_target_weight(target_weight_kg, metrics.height_cm())?;
        let label = selection.unwrap_or_default();
        let mut profile = UserProfile {
            name,
            metrics,
            target_weight_kg,
            daily_calorie_target: 0,
            water_target_liters: 0.0,
            macro_targets: None,
            plan: Some(label),
        };
        profile.recompute()?;
        Ok(profile)
    }

    pub fn energy(&self) -> Result<EnergyTargets> {
        energy_targets(&self.metrics)
    }

    pub fn plans(&self) -> Result<PlanSet> {
        let energy = self.energy()?;
        generate(
            self.metrics.weight_kg(),
            self.target_weight_kg,
            energy.tdee,
            self.metrics.sex(),
        )
    }

    pub fn selected_plan(&self) -> Result<Plan> {
        Ok(*self.plans()?.select(self.plan))
    }

    pub fn trajectory(&self) -> Result<Trajectory> {
        project(
            self.metrics.weight_kg(),
            self.target_weight_kg,
            &self.selected_plan()?,
        )
    }

    /// Targets for the daily dashboard.
    ///
    /// Stored macro targets win; they are only derived from the calorie
    /// target when the record has none.
    pub fn daily_targets(&self) -> Result<DailyTargets> {
        let water_liters = positive(self.water_target_liters, "water target")
            .map_err(EngineError::InvalidTargets)?;
        let macros = match self.macro_targets {
            Some(stored) => stored,
            None => allocate(self.daily_calorie_target)?,
        };
        Ok(DailyTargets {
            calories: self.daily_calorie_target,
            macros,
            water_ml: liters_to_ml(water_liters),
        })
    }

    /// Whether the current weight is exactly the target.
    ///
    /// This switches the calorie target to maintenance. The looser
    /// "goal reached" flag shown to the user is [`GoalProgress::reached`].
    pub fn at_target_weight(&self) -> bool {
        (self.metrics.weight_kg() - self.target_weight_kg).abs() < 1e-9
    }

    pub fn goal_progress(&self) -> Result<GoalProgress> {
        goal_progress(self.metrics.weight_kg(), self.target_weight_kg)
    }

    /// Record a new body weight and recompute every derived target.
    pub fn update_weight(&self, weight_kg: f64) -> Result<Self> {
        if !WEIGHT_UPDATE_RANGE_KG.contains(&weight_kg) {
            return Err(EngineError::InvalidMetrics(format!(
                "weight must be between {} and {} kg, got {weight_kg}",
                WEIGHT_UPDATE_RANGE_KG.start(),
                WEIGHT_UPDATE_RANGE_KG.end()
            )));
        }
        let mut next = self.clone();
        next.metrics = self.metrics.with_weight(weight_kg)?;
        next.recompute()?;
        Ok(next)
    }

    pub fn update_activity_level(&self, activity_level: ActivityLevel) -> Result<Self> {
        let mut next = self.clone();
        next.metrics = self.metrics.with_activity_level(activity_level);
        next.recompute()?;
        Ok(next)
    }

    pub fn update_target_weight(&self, target_weight_kg: f64) -> Result<Self> {
        positive(target_weight_kg, "target weight").map_err(EngineError::InvalidPlanInput)?;
        check_target_weight(target_weight_kg, self.metrics.height_cm())?;
        let mut next = self.clone();
        next.target_weight_kg = target_weight_kg;
        next.recompute()?;
        Ok(next)
    }

    pub fn select_plan(&self, label: PlanLabel) -> Result<Self> {
        let mut next = self.clone();
        next.plan = Some(label);
        next.recompute()?;
        Ok(next)
    }

    /// Maintenance calories at the target weight, otherwise the selected
    /// plan's target regenerated from the current metrics.
    fn recompute(&mut self) -> Result<()> {
        let calories = if self.at_target_weight() {
            self.energy()?.tdee
        } else {
            self.selected_plan()?.target_calories
        };
        self.daily_calorie_target = calories;
        self.macro_targets = Some(allocate(calories)?);
        self.water_target_liters = water_target_liters(self.metrics.weight_kg())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Sex;
    use approx::assert_relative_eq;

    fn metrics() -> BodyMetrics {
        BodyMetrics::new(Sex::Male, 25, 180.0, 80.0, ActivityLevel::Moderate).unwrap()
    }

    #[test]
    fn test_onboard_defaults_to_recommended() {
        let p = UserProfile::onboard(Some("Deniz".into()), metrics(), 70.0, None).unwrap();
        assert_eq!(p.plan, Some(PlanLabel::Recommended));
        assert_eq!(p.daily_calorie_target, 1932);
        assert_relative_eq!(p.water_target_liters, 2.6);
        assert_eq!(p.macro_targets, Some(allocate(1932).unwrap()));

        let t = p.daily_targets().unwrap();
        assert_eq!(t.calories, 1932);
        assert_eq!(t.water_ml, 2600);
    }

    #[test]
    fn test_onboard_rejects_unsafe_target() {
        let err = UserProfile::onboard(None, metrics(), 50.0, None).unwrap_err();
        assert!(matches!(err, EngineError::UnsafeTargetWeight { .. }));
    }

    #[test]
    fn test_update_weight_keeps_plan_choice() {
        let p = UserProfile::onboard(None, metrics(), 70.0, Some(PlanLabel::Gentle)).unwrap();
        let q = p.update_weight(78.0).unwrap();

        // bmr 1785 -> tdee round(2454.375) = 2454, gentle = 2454 - 275
        assert_eq!(q.daily_calorie_target, 2179);
        assert_eq!(q.plan, Some(PlanLabel::Gentle));
        assert_relative_eq!(q.water_target_liters, 2.6);
        assert_eq!(q.metrics.weight_kg(), 78.0);
        assert_eq!(p.metrics.weight_kg(), 80.0);
    }

    #[test]
    fn test_update_weight_range() {
        let p = UserProfile::onboard(None, metrics(), 70.0, None).unwrap();
        assert!(matches!(
            p.update_weight(29.9),
            Err(EngineError::InvalidMetrics(_))
        ));
        assert!(p.update_weight(301.0).is_err());
        assert!(p.update_weight(f64::NAN).is_err());
    }

    #[test]
    fn test_reaching_target_switches_to_maintenance() {
        let p = UserProfile::onboard(None, metrics(), 70.0, None).unwrap();
        let q = p.update_weight(70.0).unwrap();
        // bmr 1705 * 1.375 = 2344.375
        assert_eq!(q.daily_calorie_target, 2344);
    }

    #[test]
    fn test_activity_and_plan_updates() {
        let p = UserProfile::onboard(None, metrics(), 70.0, None).unwrap();
        let active = p.update_activity_level(ActivityLevel::High).unwrap();
        // round(1805 * 1.55) = 2798, recommended = 2798 - 550
        assert_eq!(active.daily_calorie_target, 2248);

        let fast = p.select_plan(PlanLabel::Fast).unwrap();
        assert_eq!(fast.daily_calorie_target, 1500);
        assert!(fast.selected_plan().unwrap().warning.is_some());
    }

    #[test]
    fn test_profile_json_defaults_activity() {
        let p: UserProfile = serde_json::from_str(
            r#"{
                "metrics": {"sex": "female", "age_years": 28, "height_cm": 168, "weight_kg": 64},
                "target_weight_kg": 60,
                "daily_calorie_target": 1700,
                "water_target_liters": 2.1
            }"#,
        )
        .unwrap();
        assert_eq!(p.metrics.activity_level(), ActivityLevel::Moderate);
        assert_eq!(p.plan, None);
        assert_eq!(p.selected_plan().unwrap().label, PlanLabel::Recommended);
        assert_eq!(p.daily_targets().unwrap().water_ml, 2100);
    }

    #[test]
    fn test_stored_macro_targets_win() {
        let mut p = UserProfile::onboard(None, metrics(), 70.0, None).unwrap();
        let custom = MacroTargets {
            protein_g: 200,
            carb_g: 100,
            fat_g: 50,
        };
        p.macro_targets = Some(custom);
        assert_eq!(p.daily_targets().unwrap().macros, custom);

        p.macro_targets = None;
        assert_eq!(p.daily_targets().unwrap().macros, allocate(1932).unwrap());
    }

    #[test]
    fn test_stored_macro_targets_read_from_json() {
        let p: UserProfile = serde_json::from_str(
            r#"{
                "metrics": {"sex": "male", "age_years": 25, "height_cm": 180, "weight_kg": 80},
                "target_weight_kg": 70,
                "daily_calorie_target": 1932,
                "water_target_liters": 2.6,
                "macro_targets": {"protein_g": 200, "carb_g": 100, "fat_g": 50}
            }"#,
        )
        .unwrap();
        let t = p.daily_targets().unwrap();
        assert_eq!((t.macros.protein_g, t.macros.carb_g, t.macros.fat_g), (200, 100, 50));
    }

    #[test]
    fn test_invalid_stored_targets_rejected() {
        let record = |target: &str, calories: &str, water: &str| {
            format!(
                r#"{{
                    "metrics": {{"sex": "male", "age_years": 25, "height_cm": 180, "weight_kg": 80}},
                    "target_weight_kg": {target},
                    "daily_calorie_target": {calories},
                    "water_target_liters": {water}
                }}"#
            )
        };
        assert!(serde_json::from_str::<UserProfile>(&record("70", "1932", "2.6")).is_ok());
        for bad in [
            record("70", "1932", "-1.0"),
            record("70", "1932", "0"),
            record("-5", "1932", "2.6"),
            record("0", "1932", "2.6"),
            record("70", "0", "2.6"),
        ] {
            assert!(serde_json::from_str::<UserProfile>(&bad).is_err(), "{bad}");
        }

        let mut p = UserProfile::onboard(None, metrics(), 70.0, None).unwrap();
        p.water_target_liters = f64::NAN;
        assert!(matches!(
            p.daily_targets(),
            Err(EngineError::InvalidTargets(_))
        ));
    }

    #[test]
    fn test_goal_progress_uses_current_weight() {
        let p = UserProfile::onboard(None, metrics(), 70.0, None).unwrap();
        let g = p.goal_progress().unwrap();
        assert_relative_eq!(g.remaining_kg, 10.0);
        assert!(!g.reached);

        // within the display tolerance, but not exactly at target
        let near = p.update_weight(70.4).unwrap();
        assert!(near.goal_progress().unwrap().reached);
        assert!(!near.at_target_weight());
    }

    #[test]
    fn test_trajectory_for_selected_plan() {
        let p = UserProfile::onboard(None, metrics(), 70.0, Some(PlanLabel::Fast)).unwrap();
        assert_eq!(p.trajectory().unwrap().points(), &[80.0, 76.0, 72.0, 70.0]);
    }
}
