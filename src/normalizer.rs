//! Profile validation and unit normalization
//!
//! Every downstream calculation works in kilograms and centimeters. The
//! conversion constants are exact decimals so imperial and metric inputs
//! describing the same person produce identical targets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::models::{Equipment, Gender, Goal, Profile, UnitSystem};

/// Kilograms per pound
pub const KG_PER_LB: Decimal = dec!(0.453592);

/// Centimeters per inch
pub const CM_PER_IN: Decimal = dec!(2.54);

pub const MIN_AGE: u32 = 10;
pub const MAX_AGE: u32 = 100;

/// Plausibility ceiling for body weight after conversion
pub const MAX_WEIGHT_KG: Decimal = dec!(500);

/// Plausibility ceiling for height after conversion
pub const MAX_HEIGHT_CM: Decimal = dec!(300);

// Conversions return `None` when the result leaves the `Decimal` range.

pub fn lb_to_kg(pounds: Decimal) -> Option<Decimal> {
    pounds.checked_mul(KG_PER_LB)
}

pub fn kg_to_lb(kilograms: Decimal) -> Option<Decimal> {
    kilograms.checked_div(KG_PER_LB)
}

pub fn in_to_cm(inches: Decimal) -> Option<Decimal> {
    inches.checked_mul(CM_PER_IN)
}

pub fn cm_to_in(centimeters: Decimal) -> Option<Decimal> {
    centimeters.checked_div(CM_PER_IN)
}

/// Validated profile in canonical metric units
///
/// Only [`ProfileNormalizer::normalize`] constructs one, so holding a
/// `NormalizedProfile` means the profile invariants hold.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    weight_kg: Decimal,
    height_cm: Decimal,
    age: u32,
    gender: Gender,
    goal: Goal,
    equipment: Equipment,
}

impl NormalizedProfile {
    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    pub fn height_cm(&self) -> Decimal {
        self.height_cm
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn equipment(&self) -> Equipment {
        self.equipment
    }

    /// Re-express as a metric profile
    pub fn to_profile(&self) -> Profile {
        Profile {
            unit_system: UnitSystem::Metric,
            weight: self.weight_kg,
            height: self.height_cm,
            age: self.age,
            gender: self.gender,
            goal: self.goal,
            equipment: self.equipment,
        }
    }
}

/// Profile validation and unit conversion
pub struct ProfileNormalizer;

impl ProfileNormalizer {
    /// Validate a raw profile and convert it to kilograms and centimeters
    pub fn normalize(profile: &Profile) -> Result<NormalizedProfile> {
        Self::validate_positive("weight", profile.weight)?;
        Self::validate_positive("height", profile.height)?;
        Self::validate_age(profile.age)?;

        let (weight_kg, height_cm) = match profile.unit_system {
            UnitSystem::Imperial => (
                Self::convert("weight (kg)", profile.weight, lb_to_kg, MAX_WEIGHT_KG)?,
                Self::convert("height (cm)", profile.height, in_to_cm, MAX_HEIGHT_CM)?,
            ),
            UnitSystem::Metric => (profile.weight, profile.height),
        };

        Self::validate_ceiling("weight (kg)", weight_kg, MAX_WEIGHT_KG)?;
        Self::validate_ceiling("height (cm)", height_cm, MAX_HEIGHT_CM)?;

        debug!(
            unit_system = ?profile.unit_system,
            %weight_kg,
            %height_cm,
            "Profile normalized"
        );

        Ok(NormalizedProfile {
            weight_kg,
            height_cm,
            age: profile.age,
            gender: profile.gender,
            goal: profile.goal,
            equipment: profile.equipment,
        })
    }

    fn validate_positive(field: &str, value: Decimal) -> Result<()> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositive {
                field: field.to_string(),
                value: value.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn validate_age(age: u32) -> Result<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::OutOfRange {
                field: "age".to_string(),
                value: age.to_string(),
                min: MIN_AGE.to_string(),
                max: MAX_AGE.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn convert(
        field: &str,
        value: Decimal,
        to_metric: fn(Decimal) -> Option<Decimal>,
        max: Decimal,
    ) -> Result<Decimal> {
        to_metric(value).ok_or_else(|| {
            ValidationError::OutOfRange {
                field: field.to_string(),
                value: value.normalize().to_string(),
                min: "0".to_string(),
                max: max.to_string(),
            }
            .into()
        })
    }

    fn validate_ceiling(field: &str, value: Decimal, max: Decimal) -> Result<()> {
        if value > max {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value: value.normalize().to_string(),
                min: "0".to_string(),
                max: max.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
