//! JSON-file data store for the profile, workout log and progress log
//!
//! Single-user and unsynchronized. Each write replaces the whole file via a
//! temporary sibling and a rename, so readers never see a half-written file.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{PlanDay, Profile, Reps};

pub const PROFILE_FILE: &str = "user_profile.json";
pub const WORKOUT_LOG_FILE: &str = "workout_log.json";
pub const PROGRESS_LOG_FILE: &str = "progress_log.json";

const DATA_FILES: [&str; 3] = [PROFILE_FILE, WORKOUT_LOG_FILE, PROGRESS_LOG_FILE];

fn tmp_name(name: &str) -> String {
    format!("{}.tmp", name)
}

/// One exercise as actually performed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: Reps,
    /// Load used, zero for bodyweight
    pub weight: Decimal,
}

/// A logged workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub split_label: String,
    pub exercises: Vec<LoggedExercise>,
    pub logged_at: DateTime<Utc>,
}

impl WorkoutLogEntry {
    pub fn new(date: NaiveDate, split_label: impl Into<String>, exercises: Vec<LoggedExercise>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            split_label: split_label.into(),
            exercises,
            logged_at: Utc::now(),
        }
    }

    /// Snapshot a plan day as performed with no added load
    pub fn from_plan_day(date: NaiveDate, day: &PlanDay) -> Self {
        let exercises = day
            .exercises
            .iter()
            .map(|exercise| LoggedExercise {
                name: exercise.name.clone(),
                sets: exercise.sets,
                reps: exercise.reps.clone(),
                weight: Decimal::ZERO,
            })
            .collect();

        Self::new(date, day.label.clone(), exercises)
    }
}

/// A body progress measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Body weight in the profile's unit system
    pub weight: Decimal,
    pub waist: Option<Decimal>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl ProgressEntry {
    pub fn new(date: NaiveDate, weight: Decimal, waist: Option<Decimal>, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            weight,
            waist,
            notes,
            logged_at: Utc::now(),
        }
    }
}

/// Directory-backed store for one user
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StorageError::WriteFailed {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.write_json(PROFILE_FILE, profile)?;
        info!(goal = ?profile.goal, equipment = ?profile.equipment, "Profile saved");
        Ok(())
    }

    /// Saved profile, if any
    pub fn load_profile(&self) -> Result<Option<Profile>> {
        self.read_json(PROFILE_FILE)
    }

    /// Saved profile, or `ProfileMissing` when none exists
    pub fn require_profile(&self) -> Result<Profile> {
        self.load_profile()?.ok_or_else(|| {
            StorageError::ProfileMissing {
                dir: self.dir.clone(),
            }
            .into()
        })
    }

    pub fn append_workout(&self, entry: WorkoutLogEntry) -> Result<()> {
        let mut entries = self.workouts()?;
        debug!(split = %entry.split_label, date = %entry.date, "Appending workout");
        entries.push(entry);
        self.write_json(WORKOUT_LOG_FILE, &entries)
    }

    /// Logged workouts in logging order
    pub fn workouts(&self) -> Result<Vec<WorkoutLogEntry>> {
        Ok(self.read_json(WORKOUT_LOG_FILE)?.unwrap_or_default())
    }

    pub fn append_progress(&self, entry: ProgressEntry) -> Result<()> {
        let mut entries = self.progress()?;
        debug!(date = %entry.date, weight = %entry.weight, "Appending progress");
        entries.push(entry);
        self.write_json(PROGRESS_LOG_FILE, &entries)
    }

    /// Logged progress measurements in logging order
    pub fn progress(&self) -> Result<Vec<ProgressEntry>> {
        Ok(self.read_json(PROGRESS_LOG_FILE)?.unwrap_or_default())
    }

    /// Delete the profile, both logs and any interrupted writes
    pub fn reset(&self) -> Result<()> {
        let names = DATA_FILES
            .iter()
            .flat_map(|name| [name.to_string(), tmp_name(name)]);

        for name in names {
            let path = self.dir.join(name);
            if path.is_file() {
                fs::remove_file(&path).map_err(|e| StorageError::WriteFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            }
        }
        info!(dir = %self.dir.display(), "Data store reset");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| StorageError::ReadFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let value = serde_json::from_str(&content).map_err(|e| StorageError::Corrupted {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let tmp_path = self.dir.join(tmp_name(name));

        let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if let Err(e) = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, &path)) {
            if tmp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp_path) {
                    warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temporary file");
                }
            }
            return Err(StorageError::WriteFailed {
                path,
                reason: e.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
