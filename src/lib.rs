// Library interface for fitplan modules
// This allows integration tests and benches to access the core functionality

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalizer;
pub mod nutrition;
pub mod store;

// Re-export commonly used types for convenience
pub use models::*;
pub use catalog::{CatalogLoader, PlanCatalog};
pub use normalizer::{NormalizedProfile, ProfileNormalizer};
pub use nutrition::{FatMethod, MacroConfig, MacroEngine};
pub use store::{DataStore, LoggedExercise, ProgressEntry, WorkoutLogEntry};
pub use config::AppConfig;
pub use error::{FitPlanError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
