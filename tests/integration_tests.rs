use fitplan::{
    DataStore, Equipment, Gender, Goal, MacroEngine, PlanCatalog, Profile, ProfileNormalizer,
    ProgressEntry, UnitSystem, WorkoutLogEntry,
};
use fitplan::normalizer::{cm_to_in, kg_to_lb};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Integration tests that exercise complete profile → targets → plan → log workflows

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn reference_profile() -> Profile {
        Profile {
            unit_system: UnitSystem::Metric,
            weight: dec!(70),
            height: dec!(175),
            age: 30,
            gender: Gender::Male,
            goal: Goal::FatLoss,
            equipment: Equipment::CommercialGym,
        }
    }

    /// 70 kg, 175 cm, 30 year old male cutting in a commercial gym
    #[test]
    fn test_reference_macro_scenario() {
        let profile = reference_profile();
        let normalized = ProfileNormalizer::normalize(&profile).unwrap();
        let engine = MacroEngine::default();

        assert_eq!(engine.bmr(&normalized), dec!(1648.75));
        assert_eq!(engine.tdee(&normalized), dec!(2555.5625));

        let targets = engine.compute_macros(&normalized, profile.goal);
        assert_eq!(targets.calories, 2056);
        assert_eq!(targets.protein_grams, 154);
        assert_eq!(targets.fat_grams, 63);
        assert_eq!(targets.carb_grams, 218);
    }

    /// 154 lb / 69 in describes roughly the same person as the metric scenario
    #[test]
    fn test_imperial_scenario_matches_metric() {
        let imperial = Profile {
            unit_system: UnitSystem::Imperial,
            weight: dec!(154),
            height: dec!(69),
            ..reference_profile()
        };
        let normalized = ProfileNormalizer::normalize(&imperial).unwrap();

        let weight_kg = normalized.weight_kg().to_f64().unwrap();
        let height_cm = normalized.height_cm().to_f64().unwrap();
        assert!((weight_kg - 69.853).abs() < 1e-3);
        assert!((height_cm - 175.26).abs() < 1e-9);

        let engine = MacroEngine::default();
        let metric_targets = engine.compute_macros(
            &ProfileNormalizer::normalize(&reference_profile()).unwrap(),
            Goal::FatLoss,
        );
        let imperial_targets = engine.compute_macros(&normalized, Goal::FatLoss);

        assert!((metric_targets.calories - imperial_targets.calories).abs() <= 2);
        assert!((metric_targets.protein_grams - imperial_targets.protein_grams).abs() <= 1);
    }

    #[test]
    fn test_unit_round_trip_within_tolerance() {
        for (pounds, inches) in [(dec!(95.5), dec!(58.25)), (dec!(154), dec!(69)), (dec!(310.7), dec!(80.1))] {
            let profile = Profile {
                unit_system: UnitSystem::Imperial,
                weight: pounds,
                height: inches,
                ..reference_profile()
            };
            let normalized = ProfileNormalizer::normalize(&profile).unwrap();

            let back_lb = kg_to_lb(normalized.weight_kg()).and_then(|lb| lb.to_f64()).unwrap();
            let back_in = cm_to_in(normalized.height_cm()).and_then(|i| i.to_f64()).unwrap();
            let pounds = pounds.to_f64().unwrap();
            let inches = inches.to_f64().unwrap();

            assert!(((back_lb - pounds) / pounds).abs() < 1e-6);
            assert!(((back_in - inches) / inches).abs() < 1e-6);
        }
    }

    #[test]
    fn test_macro_energy_balance_for_every_goal_and_gender() {
        let engine = MacroEngine::default();
        for gender in [Gender::Male, Gender::Female, Gender::Unspecified] {
            for goal in Goal::ALL {
                let profile = Profile {
                    gender,
                    goal,
                    ..reference_profile()
                };
                let normalized = ProfileNormalizer::normalize(&profile).unwrap();
                let targets = engine.compute_macros(&normalized, goal);

                assert!(
                    (targets.energy_from_macros() - targets.calories).abs() <= 2,
                    "{:?}/{:?}: {:?}",
                    gender,
                    goal,
                    targets
                );
            }
        }
    }

    /// Every equipment × goal combination yields five ordered strength days plus cardio
    #[test]
    fn test_all_plan_combinations() {
        let catalog = PlanCatalog::builtin().unwrap();
        let canonical = ["Push Day", "Pull Day", "Legs Day", "Whole Body Day", "Upper Body Day"];

        for equipment in Equipment::ALL {
            for goal in Goal::ALL {
                let plan = catalog.build_weekly_plan(equipment, goal).unwrap();

                let strength: Vec<&str> = plan.strength_days().map(|d| d.label.as_str()).collect();
                assert_eq!(strength, canonical);

                let cardio: Vec<&str> = plan.cardio_days().map(|d| d.label.as_str()).collect();
                assert_eq!(cardio.len(), goal.cardio_sessions() as usize);
                for (index, label) in cardio.iter().enumerate() {
                    assert_eq!(*label, format!("Cardio Day {}", index + 1));
                }

                // Strength days always precede cardio days
                let first_cardio = plan.days.iter().position(|d| d.is_cardio()).unwrap();
                assert_eq!(first_cardio, 5);

                for day in plan.strength_days() {
                    assert!((3..=5).contains(&day.exercises.len()));
                    assert!(day.exercises.iter().all(|e| e.sets > 0));
                }
            }
        }
    }

    #[test]
    fn test_bodyweight_muscle_gain_plan() {
        let catalog = PlanCatalog::builtin().unwrap();
        let plan = catalog
            .build_weekly_plan(Equipment::Bodyweight, Goal::MuscleGain)
            .unwrap();

        assert_eq!(plan.strength_days().count(), 5);
        assert_eq!(plan.cardio_days().count(), 1);

        for day in plan.strength_days() {
            for exercise in &day.exercises {
                let name = exercise.name.to_lowercase();
                assert!(
                    !name.contains("barbell") && !name.contains("dumbbell"),
                    "{} is not a bodyweight exercise",
                    exercise.name
                );
            }
        }
    }

    #[test]
    fn test_log_plan_day_and_progress() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(temp_dir.path()).unwrap();
        let profile = reference_profile();
        store.save_profile(&profile).unwrap();

        let loaded = store.require_profile().unwrap();
        let catalog = PlanCatalog::builtin().unwrap();
        let plan = catalog
            .build_weekly_plan(loaded.equipment, loaded.goal)
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let push = plan.get("Push Day").unwrap();
        store
            .append_workout(WorkoutLogEntry::from_plan_day(date, push))
            .unwrap();
        store
            .append_workout(WorkoutLogEntry::from_plan_day(date.succ_opt().unwrap(), plan.get("Cardio Day 1").unwrap()))
            .unwrap();
        store
            .append_progress(ProgressEntry::new(date, dec!(69.4), Some(dec!(82)), Some("Felt strong".to_string())))
            .unwrap();

        let workouts = store.workouts().unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].split_label, "Push Day");
        assert_eq!(workouts[0].exercises.len(), push.exercises.len());
        assert_eq!(workouts[1].split_label, "Cardio Day 1");

        let progress = store.progress().unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].waist, Some(dec!(82)));

        // The logged snapshot is independent of later plans
        let regenerated = catalog
            .build_weekly_plan(Equipment::Bodyweight, Goal::MuscleGain)
            .unwrap();
        assert_ne!(regenerated.get("Push Day").unwrap().exercises[0].name, workouts[0].exercises[0].name);
    }

    #[test]
    fn test_invalid_profile_never_reaches_engine() {
        let profile = Profile {
            age: 101,
            ..reference_profile()
        };
        let err = ProfileNormalizer::normalize(&profile).unwrap_err();
        assert_eq!(err.severity(), fitplan::error::ErrorSeverity::Warning);
    }
}
