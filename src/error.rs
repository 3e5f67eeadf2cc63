//! Unified error hierarchy for fitplan
//!
//! Provides a layered error type system with structured error information
//! and integration with the tracing system.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all fitplan operations
#[derive(Debug, Error)]
pub enum FitPlanError {
    /// Malformed profile input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Missing or malformed configuration / catalog data
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Profile store and log file errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Profile validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: String },

    /// Value outside its accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// Text that does not name a known enum variant
    #[error("Unknown {field}: '{value}'")]
    UnknownVariant { field: String, value: String },
}

/// Configuration and catalog errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Catalog has no exercises for an equipment/split combination
    #[error("Catalog has no entry for {equipment} / {split}")]
    MissingCatalogEntry { equipment: String, split: String },

    /// Catalog content violates its structural rules
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// A configuration value is outside its accepted range
    #[error("Invalid setting {setting}: {reason}")]
    InvalidSetting { setting: String, reason: String },

    /// TOML could not be read or parsed
    #[error("Failed to parse {source_name}: {reason}")]
    Parse { source_name: String, reason: String },
}

/// Data store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// File could not be read
    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// File could not be written
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// File exists but does not hold the expected JSON
    #[error("Corrupted data file {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// No profile has been saved yet
    #[error("No saved profile in {dir}")]
    ProfileMissing { dir: PathBuf },
}

/// Result type alias for fitplan operations
pub type Result<T> = std::result::Result<T, FitPlanError>;

impl FitPlanError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, FitPlanError::Io(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FitPlanError::Validation(_) => ErrorSeverity::Warning,
            FitPlanError::Storage(StorageError::ProfileMissing { .. }) => ErrorSeverity::Warning,
            // A hole in the closed equipment/split domain is a programming defect
            FitPlanError::Configuration(ConfigurationError::MissingCatalogEntry { .. }) => {
                ErrorSeverity::Critical
            }
            FitPlanError::Configuration(_) => ErrorSeverity::Error,
            FitPlanError::Storage(_) => ErrorSeverity::Error,
            FitPlanError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FitPlanError::Validation(err) => {
                format!("Please check your profile: {}", err)
            }
            FitPlanError::Storage(StorageError::ProfileMissing { .. }) => {
                "No profile found. Run `fitplan profile set` first.".to_string()
            }
            FitPlanError::Storage(StorageError::Corrupted { path, .. }) => {
                format!(
                    "Data file {} is unreadable. Run `fitplan reset` to start over.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Programming defect requiring a fix
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
