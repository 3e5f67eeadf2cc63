use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Unit system the profile's weight and height are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and centimeters
    Metric,
    /// Pounds and inches
    Imperial,
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Metric
    }
}

/// Gender, used only to select the BMR offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    /// Other or prefer not to disclose
    Unspecified,
}

/// Primary training goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Maintenance,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::FatLoss, Goal::MuscleGain, Goal::Maintenance];

    /// Number of cardio sessions appended to the weekly plan
    pub fn cardio_sessions(&self) -> u8 {
        match self {
            Goal::FatLoss => 3,
            Goal::MuscleGain => 1,
            Goal::Maintenance => 2,
        }
    }

    /// Hypertrophy work gets the longer rest interval between sets
    pub fn uses_long_rest(&self) -> bool {
        matches!(self, Goal::MuscleGain)
    }
}

/// Available training equipment, from least to most
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// None, bodyweight only
    Bodyweight,
    /// Home setup with dumbbells and resistance bands
    HomeDumbbellsBands,
    /// Home setup with barbell, bench and squat rack
    HomeBarbell,
    /// Full commercial gym
    CommercialGym,
}

impl Equipment {
    pub const ALL: [Equipment; 4] = [
        Equipment::Bodyweight,
        Equipment::HomeDumbbellsBands,
        Equipment::HomeBarbell,
        Equipment::CommercialGym,
    ];
}

/// Strength split, declared in canonical plan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Push,
    Pull,
    Legs,
    WholeBody,
    UpperBody,
}

impl Split {
    /// Canonical order of strength days within a weekly plan
    pub const CANONICAL_ORDER: [Split; 5] = [
        Split::Push,
        Split::Pull,
        Split::Legs,
        Split::WholeBody,
        Split::UpperBody,
    ];

    /// Day label shown to the user and used as the plan key
    pub fn label(&self) -> &'static str {
        match self {
            Split::Push => "Push Day",
            Split::Pull => "Pull Day",
            Split::Legs => "Legs Day",
            Split::WholeBody => "Whole Body Day",
            Split::UpperBody => "Upper Body Day",
        }
    }
}

/// User profile as supplied by the intake form or profile store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub unit_system: UnitSystem,

    /// Body weight in kg (metric) or lb (imperial)
    pub weight: Decimal,

    /// Height in cm (metric) or inches (imperial)
    pub height: Decimal,

    /// Age in years
    pub age: u32,

    pub gender: Gender,

    pub goal: Goal,

    pub equipment: Equipment,
}

/// Daily calorie and macronutrient targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// kcal per day
    pub calories: i32,
    pub protein_grams: i32,
    /// May be negative for very low calorie targets; never clamped
    pub carb_grams: i32,
    pub fat_grams: i32,
}

impl MacroTargets {
    /// Energy implied by the macro grams (4/4/9 kcal per gram)
    pub fn energy_from_macros(&self) -> i32 {
        self.protein_grams * 4 + self.carb_grams * 4 + self.fat_grams * 9
    }

    /// Whether protein and fat already exceed the calorie target
    pub fn has_negative_carbs(&self) -> bool {
        self.carb_grams < 0
    }
}

/// Repetition prescription: a rep count or a timed hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Duration(String),
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(count) => write!(f, "{}", count),
            Reps::Duration(label) => write!(f, "{}", label),
        }
    }
}

/// Single prescribed exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: Reps,
}

/// Kind of day within a weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Strength(Split),
    Cardio { session: u8 },
}

/// Guidance attached to a plan day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guidance {
    /// Rest between sets for strength days
    Rest(String),
    /// Heart rate zone for cardio days
    HeartRate(String),
}

impl Guidance {
    pub fn text(&self) -> &str {
        match self {
            Guidance::Rest(text) | Guidance::HeartRate(text) => text,
        }
    }
}

/// One labelled day of a weekly plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub label: String,
    pub kind: DayKind,
    pub exercises: Vec<Exercise>,
    pub guidance: Guidance,
}

impl PlanDay {
    pub fn is_cardio(&self) -> bool {
        matches!(self.kind, DayKind::Cardio { .. })
    }
}

/// Ordered weekly plan: strength days in canonical order, then cardio days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    /// Version of the exercise catalog the plan was built from
    pub catalog_version: String,
    pub equipment: Equipment,
    pub goal: Goal,
    pub days: Vec<PlanDay>,
}

impl WeeklyPlan {
    /// Look up a day by its label
    pub fn get(&self, label: &str) -> Option<&PlanDay> {
        self.days.iter().find(|day| day.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.days.iter().map(|day| day.label.as_str()).collect()
    }

    pub fn strength_days(&self) -> impl Iterator<Item = &PlanDay> {
        self.days.iter().filter(|day| !day.is_cardio())
    }

    pub fn cardio_days(&self) -> impl Iterator<Item = &PlanDay> {
        self.days.iter().filter(|day| day.is_cardio())
    }
}

/// Lowercase and unify separators so "Fat Loss", "fat_loss" and "fat-loss" match
fn normalize_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

fn unknown(field: &str, value: &str) -> ValidationError {
    ValidationError::UnknownVariant {
        field: field.to_string(),
        value: value.to_string(),
    }
}

impl FromStr for UnitSystem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "metric" | "kg" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "lb" | "lbs" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(unknown("unit system", s)),
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "unspecified" | "prefer-not-to-disclose" | "undisclosed" => {
                Ok(Gender::Unspecified)
            }
            _ => Err(unknown("gender", s)),
        }
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "fat-loss" | "cut" | "weight-loss" => Ok(Goal::FatLoss),
            "muscle-gain" | "bulk" => Ok(Goal::MuscleGain),
            "maintenance" | "maintain" | "general-fitness" => Ok(Goal::Maintenance),
            _ => Err(unknown("goal", s)),
        }
    }
}

impl FromStr for Equipment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "bodyweight" | "none" => Ok(Equipment::Bodyweight),
            "home-dumbbells-bands" | "dumbbells" | "bands" => Ok(Equipment::HomeDumbbellsBands),
            "home-barbell" | "barbell" => Ok(Equipment::HomeBarbell),
            "commercial-gym" | "gym" => Ok(Equipment::CommercialGym),
            _ => Err(unknown("equipment", s)),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "Metric (kg, cm)"),
            UnitSystem::Imperial => write!(f, "Imperial (lb, in)"),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Unspecified => write!(f, "Unspecified"),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::FatLoss => write!(f, "Fat Loss"),
            Goal::MuscleGain => write!(f, "Muscle Gain"),
            Goal::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equipment::Bodyweight => write!(f, "Bodyweight Only"),
            Equipment::HomeDumbbellsBands => write!(f, "Home - Dumbbells and Bands"),
            Equipment::HomeBarbell => write!(f, "Home - Barbell, Bench, Squat Rack"),
            Equipment::CommercialGym => write!(f, "Full Commercial Gym"),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
