//! TOML parsing and validation for exercise catalogs
//!
//! Catalogs are plain data so a new exercise selection is a file change.
//! Loading checks that the closed (equipment, split) domain is fully
//! covered; a catalog that passes loading can always build a plan.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use super::{CardioTemplate, PlanCatalog, RestGuidance};
use crate::error::{ConfigurationError, Result};
use crate::models::{Equipment, Exercise, Reps, Split};

pub const MIN_EXERCISES_PER_SPLIT: usize = 3;
pub const MAX_EXERCISES_PER_SPLIT: usize = 5;

/// Serializable catalog format for TOML files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlCatalog {
    /// Catalog data version, copied into every plan built from it
    pub version: String,

    pub rest: RestGuidance,

    pub cardio: CardioTemplate,

    /// Equipment tier key -> split key -> exercises
    pub tiers: BTreeMap<String, BTreeMap<String, Vec<Exercise>>>,
}

/// Catalog key used in TOML tables for an equipment tier
pub fn equipment_key(equipment: Equipment) -> &'static str {
    match equipment {
        Equipment::Bodyweight => "bodyweight",
        Equipment::HomeDumbbellsBands => "home_dumbbells_bands",
        Equipment::HomeBarbell => "home_barbell",
        Equipment::CommercialGym => "commercial_gym",
    }
}

/// Catalog key used in TOML tables for a split
pub fn split_key(split: Split) -> &'static str {
    match split {
        Split::Push => "push",
        Split::Pull => "pull",
        Split::Legs => "legs",
        Split::WholeBody => "whole_body",
        Split::UpperBody => "upper_body",
    }
}

/// Catalog loader for TOML files
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<PlanCatalog> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigurationError::Parse {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::load_from_string(&content, &path.display().to_string())
    }

    /// Load a catalog from a TOML string
    pub fn load_from_string(content: &str, source_name: &str) -> Result<PlanCatalog> {
        let toml_catalog: TomlCatalog =
            toml::from_str(content).map_err(|e| ConfigurationError::Parse {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;

        let catalog = Self::build_catalog(toml_catalog).map_err(|e| {
            error!(source = source_name, error = %e, "Rejected exercise catalog");
            e
        })?;

        debug!(
            source = source_name,
            version = catalog.version(),
            "Exercise catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a PlanCatalog from parsed TOML, enforcing full coverage
    fn build_catalog(toml_catalog: TomlCatalog) -> Result<PlanCatalog> {
        if toml_catalog.version.trim().is_empty() {
            return Err(invalid("version must not be empty"));
        }
        Self::validate_cardio(&toml_catalog.cardio)?;

        let mut tables = HashMap::new();
        for (tier_key, splits) in &toml_catalog.tiers {
            let equipment = Self::parse_equipment(tier_key)?;

            for (split_name, exercises) in splits {
                let split = Self::parse_split(tier_key, split_name)?;
                Self::validate_exercises(tier_key, split_name, exercises)?;
                tables.insert((equipment, split), exercises.clone());
            }
        }

        for equipment in Equipment::ALL {
            for split in Split::CANONICAL_ORDER {
                if !tables.contains_key(&(equipment, split)) {
                    return Err(ConfigurationError::MissingCatalogEntry {
                        equipment: equipment_key(equipment).to_string(),
                        split: split_key(split).to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(PlanCatalog::from_parts(
            toml_catalog.version,
            toml_catalog.rest,
            toml_catalog.cardio,
            tables,
        ))
    }

    fn parse_equipment(key: &str) -> Result<Equipment> {
        Equipment::ALL
            .into_iter()
            .find(|e| equipment_key(*e) == key)
            .ok_or_else(|| {
                invalid(&format!(
                    "unknown equipment tier '{}'. Must be one of: bodyweight, home_dumbbells_bands, home_barbell, commercial_gym",
                    key
                ))
            })
    }

    fn parse_split(tier_key: &str, key: &str) -> Result<Split> {
        Split::CANONICAL_ORDER
            .into_iter()
            .find(|s| split_key(*s) == key)
            .ok_or_else(|| {
                invalid(&format!(
                    "unknown split '{}' in tier '{}'. Must be one of: push, pull, legs, whole_body, upper_body",
                    key, tier_key
                ))
            })
    }

    fn validate_exercises(tier_key: &str, split_key: &str, exercises: &[Exercise]) -> Result<()> {
        if !(MIN_EXERCISES_PER_SPLIT..=MAX_EXERCISES_PER_SPLIT).contains(&exercises.len()) {
            return Err(invalid(&format!(
                "{}.{} has {} exercises, expected {}-{}",
                tier_key,
                split_key,
                exercises.len(),
                MIN_EXERCISES_PER_SPLIT,
                MAX_EXERCISES_PER_SPLIT
            )));
        }

        for exercise in exercises {
            if exercise.name.trim().is_empty() {
                return Err(invalid(&format!("{}.{} has an unnamed exercise", tier_key, split_key)));
            }
            if exercise.sets == 0 {
                return Err(invalid(&format!(
                    "{}.{}: '{}' must have at least one set",
                    tier_key, split_key, exercise.name
                )));
            }
            match &exercise.reps {
                Reps::Count(0) => {
                    return Err(invalid(&format!(
                        "{}.{}: '{}' must have at least one rep",
                        tier_key, split_key, exercise.name
                    )));
                }
                Reps::Duration(label) if label.trim().is_empty() => {
                    return Err(invalid(&format!(
                        "{}.{}: '{}' has an empty duration",
                        tier_key, split_key, exercise.name
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn validate_cardio(cardio: &CardioTemplate) -> Result<()> {
        if cardio.name.trim().is_empty() || cardio.duration.trim().is_empty() {
            return Err(invalid("cardio name and duration must not be empty"));
        }
        if cardio.sets == 0 {
            return Err(invalid("cardio must have at least one set"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> crate::error::FitPlanError {
    ConfigurationError::InvalidCatalog {
        reason: reason.to_string(),
    }
    .into()
}
