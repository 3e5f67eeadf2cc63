use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use fitplan::config::AppConfig;
use fitplan::error::{ErrorSeverity, FitPlanError};
use fitplan::logging::init_logging;
use fitplan::{
    DataStore, Equipment, Gender, Goal, LoggedExercise, MacroEngine, PlanCatalog, Profile,
    ProfileNormalizer, ProgressEntry, Reps, UnitSystem, WeeklyPlan, WorkoutLogEntry,
};

/// fitplan - personal training companion
///
/// Stores an intake profile, computes daily calorie and macro targets, builds
/// an equipment-aware weekly plan and keeps workout and progress logs.
#[derive(Parser)]
#[command(name = "fitplan")]
#[command(version)]
#[command(about = "Macro targets and weekly workout plans", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the data directory from the config
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save or display the intake profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Show daily calorie and macro targets for the saved profile
    Macros {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the weekly workout plan for the saved profile
    Plan {
        /// Use this equipment instead of the profile's
        #[arg(short, long)]
        equipment: Option<Equipment>,

        /// Use this goal instead of the profile's
        #[arg(short, long)]
        goal: Option<Goal>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Log a completed workout
    LogWorkout {
        /// Split label, e.g. "Push Day"
        #[arg(short, long)]
        split: String,

        /// Workout date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Exercise as NAME:SETS:REPS[:WEIGHT], repeatable
        #[arg(short, long = "exercise", value_parser = parse_logged_exercise)]
        exercises: Vec<LoggedExercise>,

        /// Copy the exercises of the matching plan day
        #[arg(long, conflicts_with = "exercises")]
        from_plan: bool,
    },

    /// Log a body progress measurement
    LogProgress {
        /// Body weight in your profile's units
        #[arg(short, long)]
        weight: Decimal,

        /// Waist circumference
        #[arg(long)]
        waist: Option<Decimal>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Measurement date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show logged workouts or progress
    History {
        /// Show progress measurements instead of workouts
        #[arg(short, long)]
        progress: bool,

        /// Number of most recent entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete the saved profile and all logs
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Inspect or create the configuration file
    Config {
        /// List all configuration values
        #[arg(short, long)]
        list: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Save the intake profile
    Set {
        /// Unit system (metric, imperial); defaults to the configured units
        #[arg(short, long)]
        units: Option<UnitSystem>,

        /// Body weight (kg or lb)
        #[arg(short, long)]
        weight: Decimal,

        /// Height (cm or in)
        #[arg(long)]
        height: Decimal,

        /// Age in years (10-100)
        #[arg(short, long)]
        age: u32,

        /// Gender (male, female, other)
        #[arg(long, default_value = "other")]
        gender: Gender,

        /// Goal (fat-loss, muscle-gain, maintenance)
        #[arg(short, long)]
        goal: Goal,

        /// Equipment (bodyweight, home-dumbbells-bands, home-barbell, commercial-gym)
        #[arg(short, long)]
        equipment: Equipment,
    },

    /// Display the saved profile
    Show,
}

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "Exercise")]
    name: String,
    #[tabled(rename = "Sets")]
    sets: u32,
    #[tabled(rename = "Reps")]
    reps: String,
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Split")]
    split: String,
    #[tabled(rename = "Exercises")]
    exercises: String,
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Waist")]
    waist: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Body measurements must be positive when given
fn check_measurement(name: &str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) if v <= Decimal::ZERO => bail!("{} must be positive, got {}", name, v),
        _ => Ok(()),
    }
}

/// Parse NAME:SETS:REPS[:WEIGHT]; non-numeric reps are kept as a label
fn parse_logged_exercise(s: &str) -> std::result::Result<LoggedExercise, String> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 || parts[0].is_empty() {
        return Err(format!("expected NAME:SETS:REPS[:WEIGHT], got '{}'", s));
    }

    let sets = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid set count '{}'", parts[1]))?;
    let reps = match parts[2].parse::<u32>() {
        Ok(count) => Reps::Count(count),
        Err(_) => Reps::Duration(parts[2].to_string()),
    };
    let weight = match parts.get(3) {
        Some(w) => w
            .parse::<Decimal>()
            .map_err(|_| format!("invalid weight '{}'", w))?,
        None => Decimal::ZERO,
    };

    Ok(LoggedExercise {
        name: parts[0].to_string(),
        sets,
        reps,
        weight,
    })
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<FitPlanError>() {
            Some(app_err) => {
                match app_err.severity() {
                    ErrorSeverity::Critical | ErrorSeverity::Error => {
                        tracing::error!(error = %app_err, "Command failed")
                    }
                    ErrorSeverity::Warning => tracing::warn!(error = %app_err, "Command failed"),
                    ErrorSeverity::Info => tracing::info!(error = %app_err, "Command failed"),
                }
                eprintln!("{} {}", "✗".red().bold(), app_err.user_message());
            }
            None => eprintln!("{} {:#}", "✗".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging.clone().with_verbosity(cli.verbose))?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.settings.data_dir.clone());
    let store = DataStore::open(&data_dir)?;

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileCommands::Set {
                units,
                weight,
                height,
                age,
                gender,
                goal,
                equipment,
            } => {
                let profile = Profile {
                    unit_system: units.unwrap_or(config.settings.default_units),
                    weight,
                    height,
                    age,
                    gender,
                    goal,
                    equipment,
                };
                // Reject bad input before it reaches the store
                ProfileNormalizer::normalize(&profile)?;
                store.save_profile(&profile)?;
                println!("{}", "✓ Profile saved".green());
                print_profile(&profile);
            }
            ProfileCommands::Show => {
                let profile = store.require_profile()?;
                print_profile(&profile);
            }
        },

        Commands::Macros { json } => {
            let profile = store.require_profile()?;
            let engine = MacroEngine::new(config.nutrition.clone())?;
            let normalized = ProfileNormalizer::normalize(&profile)?;
            let targets = engine.compute_macros(&normalized, profile.goal);

            if json {
                println!("{}", serde_json::to_string_pretty(&targets)?);
            } else {
                println!("{}", format!("Daily targets ({})", profile.goal).blue().bold());
                println!(
                    "  BMR:       {} kcal",
                    engine.bmr(&normalized).round_dp(0)
                );
                println!(
                    "  TDEE:      {} kcal",
                    engine.tdee(&normalized).round_dp(0)
                );
                println!("  Calories:  {} kcal", targets.calories.to_string().bold());
                println!("  Protein:   {} g", targets.protein_grams);
                println!("  Carbs:     {} g", targets.carb_grams);
                println!("  Fat:       {} g", targets.fat_grams);
                if targets.has_negative_carbs() {
                    println!(
                        "{}",
                        "⚠ Protein and fat exceed the calorie target; carbohydrate target is negative."
                            .yellow()
                    );
                }
            }
        }

        Commands::Plan {
            equipment,
            goal,
            json,
        } => {
            let plan = build_plan(&config, &store, equipment, goal)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }

        Commands::LogWorkout {
            split,
            date,
            exercises,
            from_plan,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let entry = if from_plan {
                let plan = build_plan(&config, &store, None, None)?;
                let day = plan
                    .get(&split)
                    .with_context(|| format!("No day labelled '{}' in the current plan", split))?;
                WorkoutLogEntry::from_plan_day(date, day)
            } else {
                if exercises.is_empty() {
                    bail!("Provide at least one --exercise or use --from-plan");
                }
                WorkoutLogEntry::new(date, split, exercises)
            };

            let count = entry.exercises.len();
            store.append_workout(entry)?;
            println!(
                "{}",
                format!("✓ Workout logged ({} exercises)", count).green()
            );
        }

        Commands::LogProgress {
            weight,
            waist,
            notes,
            date,
        } => {
            check_measurement("Weight", Some(weight))?;
            check_measurement("Waist", waist)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            store.append_progress(ProgressEntry::new(date, weight, waist, notes))?;
            println!("{}", "✓ Progress logged".green());
        }

        Commands::History { progress, limit } => {
            if progress {
                let entries = store.progress()?;
                if entries.is_empty() {
                    println!("No progress logged yet.");
                    return Ok(());
                }
                let skip = entries.len().saturating_sub(limit);
                let rows: Vec<ProgressRow> = entries
                    .into_iter()
                    .skip(skip)
                    .map(|e| ProgressRow {
                        date: e.date,
                        weight: e.weight.normalize().to_string(),
                        waist: e
                            .waist
                            .map(|w| w.normalize().to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        notes: e.notes.unwrap_or_default(),
                    })
                    .collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            } else {
                let entries = store.workouts()?;
                if entries.is_empty() {
                    println!("No workouts logged yet.");
                    return Ok(());
                }
                let skip = entries.len().saturating_sub(limit);
                let rows: Vec<WorkoutRow> = entries
                    .into_iter()
                    .skip(skip)
                    .map(|e| WorkoutRow {
                        date: e.date,
                        split: e.split_label,
                        exercises: e
                            .exercises
                            .iter()
                            .map(format_logged_exercise)
                            .collect::<Vec<_>>()
                            .join("\n"),
                    })
                    .collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }

        Commands::Reset { yes } => {
            if !yes {
                println!(
                    "{}",
                    "This deletes your profile and all logs. Re-run with --yes to confirm.".yellow()
                );
                return Ok(());
            }
            store.reset()?;
            println!("{}", "✓ All data deleted".green());
        }

        Commands::Config { list, init } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);
            if init {
                if path.exists() {
                    bail!("Config file already exists: {}", path.display());
                }
                AppConfig::default().save_to_file(&path)?;
                println!("{}", format!("✓ Wrote {}", path.display()).green());
            }
            if list || !init {
                println!("{}", format!("Configuration ({})", path.display()).bold());
                for (key, value) in config.list_settings()? {
                    println!("  {} = {}", key.cyan(), value);
                }
            }
        }
    }

    Ok(())
}

fn build_plan(
    config: &AppConfig,
    store: &DataStore,
    equipment: Option<Equipment>,
    goal: Option<Goal>,
) -> Result<WeeklyPlan> {
    let (equipment, goal) = match (equipment, goal) {
        (Some(equipment), Some(goal)) => (equipment, goal),
        (equipment, goal) => {
            let profile = store.require_profile()?;
            (
                equipment.unwrap_or(profile.equipment),
                goal.unwrap_or(profile.goal),
            )
        }
    };

    let catalog = PlanCatalog::load(config.catalog.path.as_deref())?;
    Ok(catalog.build_weekly_plan(equipment, goal)?)
}

fn print_profile(profile: &Profile) {
    let (weight_unit, height_unit) = match profile.unit_system {
        UnitSystem::Metric => ("kg", "cm"),
        UnitSystem::Imperial => ("lb", "in"),
    };
    println!("{}", "Profile".bold());
    println!("  Units:     {}", profile.unit_system);
    println!("  Weight:    {} {}", profile.weight.normalize(), weight_unit);
    println!("  Height:    {} {}", profile.height.normalize(), height_unit);
    println!("  Age:       {}", profile.age);
    println!("  Gender:    {}", profile.gender);
    println!("  Goal:      {}", profile.goal);
    println!("  Equipment: {}", profile.equipment);
}

fn print_plan(plan: &WeeklyPlan) {
    println!(
        "{}",
        format!("Weekly plan: {} / {}", plan.goal, plan.equipment)
            .cyan()
            .bold()
    );
    for day in &plan.days {
        println!();
        println!("{}", day.label.bold());
        let rows: Vec<ExerciseRow> = day
            .exercises
            .iter()
            .map(|e| ExerciseRow {
                name: e.name.clone(),
                sets: e.sets,
                reps: e.reps.to_string(),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
        println!("  {}", day.guidance.text().dimmed());
    }
    println!();
    println!("{}", format!("catalog {}", plan.catalog_version).dimmed());
}

fn format_logged_exercise(exercise: &LoggedExercise) -> String {
    if exercise.weight.is_zero() {
        format!("{} {}x{}", exercise.name, exercise.sets, exercise.reps)
    } else {
        format!(
            "{} {}x{} @ {}",
            exercise.name,
            exercise.sets,
            exercise.reps,
            exercise.weight.normalize()
        )
    }
}
