//! Equipment-aware weekly plan generation
//!
//! A [`PlanCatalog`] holds one exercise list per (equipment, split) pair
//! plus the rest and cardio templates. Building a plan is a table lookup
//! for the five strength splits in canonical order followed by the
//! goal-dependent number of cardio sessions.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitplan::catalog::PlanCatalog;
//! use fitplan::models::{Equipment, Goal};
//!
//! let catalog = PlanCatalog::builtin()?;
//! let plan = catalog.build_weekly_plan(Equipment::Bodyweight, Goal::FatLoss)?;
//! assert_eq!(plan.days.len(), 8);
//! ```

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error};

use crate::error::{ConfigurationError, Result};
use crate::models::{
    DayKind, Equipment, Exercise, Goal, Guidance, PlanDay, Reps, Split, WeeklyPlan,
};

pub use loader::{equipment_key, split_key, CatalogLoader, TomlCatalog};

/// Catalog shipped with the binary
pub const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// Rest-between-sets wording for strength days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestGuidance {
    /// Longer rest, used for muscle gain
    pub long: String,
    /// Shorter rest, used for every other goal
    pub standard: String,
}

impl RestGuidance {
    pub fn for_goal(&self, goal: Goal) -> &str {
        if goal.uses_long_rest() {
            &self.long
        } else {
            &self.standard
        }
    }
}

/// Template for a single cardio session day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardioTemplate {
    pub name: String,
    pub sets: u32,
    pub duration: String,
    pub heart_rate_guidance: String,
}

/// Versioned exercise table indexed by (equipment, split)
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    version: String,
    rest: RestGuidance,
    cardio: CardioTemplate,
    tables: HashMap<(Equipment, Split), Vec<Exercise>>,
}

impl PlanCatalog {
    /// Parse the embedded catalog
    pub fn builtin() -> Result<Self> {
        CatalogLoader::load_from_string(BUILTIN_CATALOG, "built-in catalog")
    }

    /// Load a replacement catalog from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        CatalogLoader::load_from_file(path)
    }

    /// Load the catalog at `path` if given, otherwise the built-in one
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub(crate) fn from_parts(
        version: String,
        rest: RestGuidance,
        cardio: CardioTemplate,
        tables: HashMap<(Equipment, Split), Vec<Exercise>>,
    ) -> Self {
        Self {
            version,
            rest,
            cardio,
            tables,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Exercises for one equipment tier and split
    pub fn exercises(&self, equipment: Equipment, split: Split) -> Result<&[Exercise]> {
        self.tables
            .get(&(equipment, split))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                error!(?equipment, ?split, version = %self.version, "Catalog entry missing");
                ConfigurationError::MissingCatalogEntry {
                    equipment: equipment_key(equipment).to_string(),
                    split: split_key(split).to_string(),
                }
                .into()
            })
    }

    /// Assemble the weekly plan for an equipment tier and goal
    ///
    /// Strength days come first in [`Split::CANONICAL_ORDER`], each with
    /// goal-dependent rest guidance, followed by `goal.cardio_sessions()`
    /// cardio days labelled "Cardio Day 1", "Cardio Day 2", ...
    pub fn build_weekly_plan(&self, equipment: Equipment, goal: Goal) -> Result<WeeklyPlan> {
        let rest = self.rest.for_goal(goal);
        let cardio_sessions = goal.cardio_sessions();
        let mut days = Vec::with_capacity(Split::CANONICAL_ORDER.len() + cardio_sessions as usize);

        for split in Split::CANONICAL_ORDER {
            days.push(PlanDay {
                label: split.label().to_string(),
                kind: DayKind::Strength(split),
                exercises: self.exercises(equipment, split)?.to_vec(),
                guidance: Guidance::Rest(rest.to_string()),
            });
        }

        for session in 1..=cardio_sessions {
            days.push(self.cardio_day(session));
        }

        debug!(
            ?equipment,
            ?goal,
            days = days.len(),
            version = %self.version,
            "Weekly plan built"
        );

        Ok(WeeklyPlan {
            catalog_version: self.version.clone(),
            equipment,
            goal,
            days,
        })
    }

    fn cardio_day(&self, session: u8) -> PlanDay {
        PlanDay {
            label: format!("Cardio Day {}", session),
            kind: DayKind::Cardio { session },
            exercises: vec![Exercise {
                name: self.cardio.name.clone(),
                sets: self.cardio.sets,
                reps: Reps::Duration(self.cardio.duration.clone()),
            }],
            guidance: Guidance::HeartRate(self.cardio.heart_rate_guidance.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_order_and_counts() {
        let catalog = PlanCatalog::builtin().unwrap();
        let plan = catalog
            .build_weekly_plan(Equipment::CommercialGym, Goal::FatLoss)
            .unwrap();

        assert_eq!(
            plan.labels(),
            vec![
                "Push Day",
                "Pull Day",
                "Legs Day",
                "Whole Body Day",
                "Upper Body Day",
                "Cardio Day 1",
                "Cardio Day 2",
                "Cardio Day 3",
            ]
        );
        assert_eq!(plan.catalog_version, catalog.version());
    }

    #[test]
    fn test_rest_guidance_depends_on_goal() {
        let catalog = PlanCatalog::builtin().unwrap();

        let gain = catalog
            .build_weekly_plan(Equipment::HomeBarbell, Goal::MuscleGain)
            .unwrap();
        let maintain = catalog
            .build_weekly_plan(Equipment::HomeBarbell, Goal::Maintenance)
            .unwrap();

        let gain_push = gain.get("Push Day").unwrap();
        let maintain_push = maintain.get("Push Day").unwrap();
        assert_eq!(gain_push.guidance, Guidance::Rest("60–90s between sets".to_string()));
        assert_eq!(
            maintain_push.guidance,
            Guidance::Rest("30–60s between sets".to_string())
        );
        assert_eq!(gain_push.exercises, maintain_push.exercises);
    }

    #[test]
    fn test_cardio_day_shape() {
        let catalog = PlanCatalog::builtin().unwrap();
        let plan = catalog
            .build_weekly_plan(Equipment::Bodyweight, Goal::Maintenance)
            .unwrap();

        let cardio: Vec<&PlanDay> = plan.cardio_days().collect();
        assert_eq!(cardio.len(), 2);
        for (index, day) in cardio.iter().enumerate() {
            assert_eq!(day.kind, DayKind::Cardio { session: index as u8 + 1 });
            assert_eq!(day.exercises.len(), 1);
            assert_eq!(day.exercises[0].sets, 1);
            assert_eq!(day.exercises[0].reps, Reps::Duration("20-30 min".to_string()));
            assert!(matches!(day.guidance, Guidance::HeartRate(_)));
        }
    }

    #[test]
    fn test_missing_entry_reports_configuration_error() {
        let catalog = PlanCatalog::from_parts(
            "partial".to_string(),
            RestGuidance {
                long: "90s".to_string(),
                standard: "45s".to_string(),
            },
            CardioTemplate {
                name: "Bike".to_string(),
                sets: 1,
                duration: "20 min".to_string(),
                heart_rate_guidance: "Zone 2".to_string(),
            },
            HashMap::new(),
        );

        let err = catalog
            .build_weekly_plan(Equipment::Bodyweight, Goal::FatLoss)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::FitPlanError::Configuration(ConfigurationError::MissingCatalogEntry { .. })
        ));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let catalog = PlanCatalog::builtin().unwrap();
        let first = catalog
            .build_weekly_plan(Equipment::HomeDumbbellsBands, Goal::MuscleGain)
            .unwrap();
        let second = catalog
            .build_weekly_plan(Equipment::HomeDumbbellsBands, Goal::MuscleGain)
            .unwrap();
        assert_eq!(first, second);
    }
}
