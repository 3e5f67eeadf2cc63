//! Integration tests for error reporting across module boundaries
//!
//! Covers how bad profiles, catalogs, configs and data files surface to callers.

use fitplan::error::{ConfigurationError, ErrorSeverity, FitPlanError, StorageError, ValidationError};
use fitplan::{AppConfig, DataStore, Equipment, Gender, Goal, PlanCatalog, Profile, ProfileNormalizer, UnitSystem};
use rust_decimal_macros::dec;
use std::fs;
use tempfile::tempdir;

fn profile() -> Profile {
    Profile {
        unit_system: UnitSystem::Metric,
        weight: dec!(82),
        height: dec!(181),
        age: 44,
        gender: Gender::Female,
        goal: Goal::Maintenance,
        equipment: Equipment::HomeDumbbellsBands,
    }
}

#[test]
fn test_validation_errors_are_warnings_with_guidance() {
    let bad = Profile {
        height: dec!(0),
        ..profile()
    };

    let err = ProfileNormalizer::normalize(&bad).unwrap_err();
    assert!(matches!(
        err,
        FitPlanError::Validation(ValidationError::NonPositive { ref field, .. }) if field == "height"
    ));
    assert_eq!(err.severity(), ErrorSeverity::Warning);
    assert!(err.user_message().starts_with("Please check your profile"));
    assert!(!err.is_retryable());
}

#[test]
fn test_incomplete_catalog_file_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("catalog.toml");

    // Drop the commercial gym tier from the built-in catalog
    let builtin = fitplan::catalog::BUILTIN_CATALOG;
    let cut = builtin.find("[tiers.commercial_gym]").unwrap();
    fs::write(&path, &builtin[..cut]).unwrap();

    let err = PlanCatalog::from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        FitPlanError::Configuration(ConfigurationError::MissingCatalogEntry { .. })
    ));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}

#[test]
fn test_catalog_override_is_used() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("catalog.toml");
    let custom = fitplan::catalog::BUILTIN_CATALOG
        .replace("version = \"2024.2\"", "version = \"custom-7\"")
        .replace("Goblet Squat", "Heel-elevated Goblet Squat");
    fs::write(&path, custom).unwrap();

    let catalog = PlanCatalog::load(Some(&path)).unwrap();
    let plan = catalog
        .build_weekly_plan(Equipment::HomeDumbbellsBands, Goal::FatLoss)
        .unwrap();

    assert_eq!(plan.catalog_version, "custom-7");
    assert!(plan
        .get("Legs Day")
        .unwrap()
        .exercises
        .iter()
        .any(|e| e.name == "Heel-elevated Goblet Squat"));
}

#[test]
fn test_missing_catalog_file_is_parse_error() {
    let temp_dir = tempdir().unwrap();
    let err = PlanCatalog::from_file(temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(
        err,
        FitPlanError::Configuration(ConfigurationError::Parse { .. })
    ));
}

#[test]
fn test_corrupted_profile_file() {
    let temp_dir = tempdir().unwrap();
    let store = DataStore::open(temp_dir.path()).unwrap();
    fs::write(temp_dir.path().join(fitplan::store::PROFILE_FILE), "{\"weight\": ").unwrap();

    let err = store.load_profile().unwrap_err();
    assert!(matches!(err, FitPlanError::Storage(StorageError::Corrupted { .. })));
    assert!(err.user_message().contains("fitplan reset"));
}

#[test]
fn test_invalid_config_file_surfaces_context() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "this is not = = toml").unwrap();

    let err = AppConfig::load_or_default(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse TOML configuration"));
}
