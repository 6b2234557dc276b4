use diet_core::{
    ActivityLevel, BodyMetrics, DailyTargets, DayLog, ExerciseEntry, FoodEntry, LogEntry,
    PlanLabel, Sex, allocate, compute_bmr, compute_tdee, generate, project, summarize,
};
use proptest::prelude::*;

fn any_sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

proptest! {
    #[test]
    fn tdee_non_decreasing_in_activity(
        sex in any_sex(),
        age in 18u32..90,
        height in 140.0f64..210.0,
        weight in 40.0f64..200.0,
    ) {
        let m = BodyMetrics::new(sex, age, height, weight, ActivityLevel::Low).unwrap();
        let bmr = compute_bmr(&m);
        prop_assume!(bmr > 0.0);
        let tdees: Vec<u32> = ActivityLevel::ALL
            .iter()
            .map(|&a| compute_tdee(bmr, a).unwrap())
            .collect();
        prop_assert!(tdees.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn macro_calories_stay_within_rounding(c in 100u32..6000) {
        let m = allocate(c).unwrap();
        let kcal = 4.0 * m.protein_g as f64 + 4.0 * m.carb_g as f64 + 9.0 * m.fat_g as f64;
        // each gram count is off by at most half a gram
        prop_assert!((kcal - c as f64).abs() <= 0.5 * (4.0 + 4.0 + 9.0));
    }

    #[test]
    fn plans_are_ordered_and_respect_floor(
        sex in any_sex(),
        current in 40.0f64..200.0,
        target in 40.0f64..200.0,
        tdee in 800u32..4500,
    ) {
        let set = generate(current, target, tdee, sex).unwrap();
        let labels: Vec<PlanLabel> = set.iter().map(|p| p.label).collect();
        prop_assert_eq!(labels, PlanLabel::ALL.to_vec());
        if target < current {
            for p in set.iter() {
                prop_assert!(p.target_calories >= sex.calorie_floor());
            }
        } else {
            prop_assert!(set.iter().all(|p| p.warning.is_none()));
        }
    }

    #[test]
    fn trajectory_never_crosses_target(
        current in 40.0f64..200.0,
        target in 40.0f64..200.0,
        label in prop_oneof![
            Just(PlanLabel::Gentle),
            Just(PlanLabel::Recommended),
            Just(PlanLabel::Fast),
        ],
    ) {
        let set = generate(current, target, 2500, Sex::Female).unwrap();
        let t = project(current, target, set.get(label)).unwrap();
        let pts = t.points();
        prop_assert_eq!(pts[0], current);
        prop_assert_eq!(pts[3], target);
        if current > target {
            prop_assert!(pts.iter().all(|&w| w >= target));
            prop_assert!(pts.windows(2).all(|w| w[0] >= w[1]));
        } else {
            prop_assert!(pts.iter().all(|&w| w <= target));
            prop_assert!(pts.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn summary_net_is_exact_and_progress_bounded(
        foods in prop::collection::vec(0u32..2000, 0..8),
        burns in prop::collection::vec(0u32..1500, 0..4),
        target in 1u32..5000,
    ) {
        let mut entries: Vec<LogEntry> = foods
            .iter()
            .map(|&kcal| LogEntry::Food(FoodEntry {
                name: "item".into(),
                calories: kcal as f64,
                protein_g: 0.0,
                carb_g: 0.0,
                fat_g: 0.0,
                meal_slot: None,
                portion: None,
            }))
            .collect();
        entries.extend(burns.iter().map(|&kcal| LogEntry::Exercise(ExerciseEntry {
            name: "move".into(),
            duration_minutes: 10,
            calories_burnt: kcal as f64,
        })));

        let targets = DailyTargets {
            calories: target,
            macros: allocate(target).unwrap(),
            water_ml: 2000,
        };
        let s = summarize(&DayLog { entries, water_ml: 0 }, &targets).unwrap();
        prop_assert_eq!(s.net_calories, s.total_calories_in - s.total_calories_burnt);
        prop_assert_eq!(s.remaining_calories, target as f64 - s.net_calories);
        prop_assert!((0.0..=100.0).contains(&s.progress_percent));
    }
}
