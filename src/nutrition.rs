//! Calorie and macronutrient targets
//!
//! Mifflin-St Jeor BMR scaled by a single activity factor, shifted by a
//! goal adjustment, then split into protein, fat and carbohydrate grams.
//! All constants live in [`MacroConfig`]; there is exactly one active
//! constant set per engine.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigurationError, Result};
use crate::models::{Gender, Goal, MacroTargets};
use crate::normalizer::NormalizedProfile;

const KCAL_PER_GRAM_PROTEIN: Decimal = dec!(4);
const KCAL_PER_GRAM_CARB: Decimal = dec!(4);
const KCAL_PER_GRAM_FAT: Decimal = dec!(9);

/// How the daily fat target is derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FatMethod {
    /// Grams per kilogram of body weight
    BodyWeight { grams_per_kg: Decimal },
    /// Share of the calorie target, converted at 9 kcal/g
    CalorieShare { share: Decimal },
}

/// Mifflin-St Jeor coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmrCoefficients {
    pub weight: Decimal,
    pub height: Decimal,
    pub age: Decimal,
    pub male_offset: Decimal,
    pub female_offset: Decimal,
    /// Offset for "other" / undisclosed
    pub unspecified_offset: Decimal,
}

impl Default for BmrCoefficients {
    fn default() -> Self {
        Self {
            weight: dec!(10),
            height: dec!(6.25),
            age: dec!(-5),
            male_offset: dec!(5),
            female_offset: dec!(-161),
            unspecified_offset: dec!(0),
        }
    }
}

/// Daily kcal added to TDEE for each goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalAdjustments {
    pub fat_loss: Decimal,
    pub muscle_gain: Decimal,
    pub maintenance: Decimal,
}

impl Default for GoalAdjustments {
    fn default() -> Self {
        Self {
            fat_loss: dec!(-500),
            muscle_gain: dec!(250),
            maintenance: dec!(0),
        }
    }
}

impl GoalAdjustments {
    pub fn for_goal(&self, goal: Goal) -> Decimal {
        match goal {
            Goal::FatLoss => self.fat_loss,
            Goal::MuscleGain => self.muscle_gain,
            Goal::Maintenance => self.maintenance,
        }
    }
}

/// Canonical constant set for macro calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    /// TDEE multiplier applied to BMR
    pub activity_factor: Decimal,

    /// Protein grams per kilogram of body weight
    pub protein_grams_per_kg: Decimal,

    pub bmr: BmrCoefficients,

    pub goal_adjustments: GoalAdjustments,

    pub fat: FatMethod,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            activity_factor: dec!(1.55),
            protein_grams_per_kg: dec!(2.2),
            bmr: BmrCoefficients::default(),
            goal_adjustments: GoalAdjustments::default(),
            fat: FatMethod::BodyWeight {
                grams_per_kg: dec!(0.9),
            },
        }
    }
}

impl MacroConfig {
    const MAX_ADJUSTMENT_KCAL: Decimal = dec!(1500);
    const MAX_GRAMS_PER_KG: Decimal = dec!(5);

    /// Check every constant is inside its sensible range
    pub fn validate(&self) -> Result<()> {
        if self.activity_factor < dec!(1.0) || self.activity_factor > dec!(2.5) {
            return Err(invalid(
                "nutrition.activity_factor",
                format!("must be between 1.0 and 2.5, got {}", self.activity_factor),
            ));
        }

        let adjustments = [
            ("nutrition.goal_adjustments.fat_loss", self.goal_adjustments.fat_loss),
            ("nutrition.goal_adjustments.muscle_gain", self.goal_adjustments.muscle_gain),
            ("nutrition.goal_adjustments.maintenance", self.goal_adjustments.maintenance),
        ];
        for (setting, value) in adjustments {
            if value.abs() > Self::MAX_ADJUSTMENT_KCAL {
                return Err(invalid(
                    setting,
                    format!("must be within ±{} kcal, got {}", Self::MAX_ADJUSTMENT_KCAL, value),
                ));
            }
        }

        Self::validate_grams_per_kg("nutrition.protein_grams_per_kg", self.protein_grams_per_kg)?;

        match &self.fat {
            FatMethod::BodyWeight { grams_per_kg } => {
                Self::validate_grams_per_kg("nutrition.fat.grams_per_kg", *grams_per_kg)?;
            }
            FatMethod::CalorieShare { share } => {
                if *share <= Decimal::ZERO || *share >= Decimal::ONE {
                    return Err(invalid(
                        "nutrition.fat.share",
                        format!("must be between 0 and 1 (exclusive), got {}", share),
                    ));
                }
            }
        }

        let coefficients = [
            ("nutrition.bmr.weight", self.bmr.weight),
            ("nutrition.bmr.height", self.bmr.height),
            ("nutrition.bmr.age", self.bmr.age),
            ("nutrition.bmr.male_offset", self.bmr.male_offset),
            ("nutrition.bmr.female_offset", self.bmr.female_offset),
            ("nutrition.bmr.unspecified_offset", self.bmr.unspecified_offset),
        ];
        for (setting, value) in coefficients {
            if value.abs() > dec!(1000) {
                return Err(invalid(setting, format!("magnitude must not exceed 1000, got {}", value)));
            }
        }

        Ok(())
    }

    fn validate_grams_per_kg(setting: &str, value: Decimal) -> Result<()> {
        if value <= Decimal::ZERO || value > Self::MAX_GRAMS_PER_KG {
            return Err(invalid(
                setting,
                format!("must be in (0, {}] g/kg, got {}", Self::MAX_GRAMS_PER_KG, value),
            ));
        }
        Ok(())
    }
}

fn invalid(setting: &str, reason: String) -> crate::error::FitPlanError {
    ConfigurationError::InvalidSetting {
        setting: setting.to_string(),
        reason,
    }
    .into()
}

/// Round half away from zero to a whole number, saturating at the i32 range
fn whole(value: Decimal) -> i32 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i32().unwrap_or(if rounded.is_sign_negative() {
        i32::MIN
    } else {
        i32::MAX
    })
}

/// Macro target calculator bound to one validated constant set
#[derive(Debug, Clone)]
pub struct MacroEngine {
    config: MacroConfig,
}

impl Default for MacroEngine {
    fn default() -> Self {
        Self {
            config: MacroConfig::default(),
        }
    }
}

impl MacroEngine {
    pub fn new(config: MacroConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MacroConfig {
        &self.config
    }

    /// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
    ///
    /// BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + offset, with
    /// offset +5 for men, -161 for women and 0 when unspecified.
    pub fn bmr(&self, profile: &NormalizedProfile) -> Decimal {
        let c = &self.config.bmr;
        let offset = match profile.gender() {
            Gender::Male => c.male_offset,
            Gender::Female => c.female_offset,
            Gender::Unspecified => c.unspecified_offset,
        };

        c.weight * profile.weight_kg() + c.height * profile.height_cm()
            + c.age * Decimal::from(profile.age())
            + offset
    }

    /// Total daily energy expenditure in kcal/day
    pub fn tdee(&self, profile: &NormalizedProfile) -> Decimal {
        self.bmr(profile) * self.config.activity_factor
    }

    /// Unrounded calorie target for a goal
    pub fn calorie_target(&self, profile: &NormalizedProfile, goal: Goal) -> Decimal {
        self.tdee(profile) + self.config.goal_adjustments.for_goal(goal)
    }

    /// Daily calorie and macro targets
    ///
    /// Carbohydrates fill whatever energy protein and fat leave over and
    /// are reported signed; a negative value is returned as-is.
    pub fn compute_macros(&self, profile: &NormalizedProfile, goal: Goal) -> MacroTargets {
        let target = self.calorie_target(profile, goal);
        let calories = whole(target);

        let protein_grams = whole(profile.weight_kg() * self.config.protein_grams_per_kg);
        let fat_grams = match &self.config.fat {
            FatMethod::BodyWeight { grams_per_kg } => whole(profile.weight_kg() * *grams_per_kg),
            FatMethod::CalorieShare { share } => whole(*share * target / KCAL_PER_GRAM_FAT),
        };

        let committed = Decimal::from(protein_grams) * KCAL_PER_GRAM_PROTEIN
            + Decimal::from(fat_grams) * KCAL_PER_GRAM_FAT;
        let carb_grams = whole((Decimal::from(calories) - committed) / KCAL_PER_GRAM_CARB);

        let targets = MacroTargets {
            calories,
            protein_grams,
            carb_grams,
            fat_grams,
        };

        debug!(?goal, ?targets, "Macro targets computed");
        if targets.has_negative_carbs() {
            warn!(
                calories,
                protein_grams, fat_grams, carb_grams, "Protein and fat exceed the calorie target"
            );
        }

        targets
    }
}
