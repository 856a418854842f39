#![forbid(unsafe_code)]

//! Core domain model and business logic for the dietrack diet tracker.
//!
//! This crate provides:
//! - Domain types (profile, metrics, foods, journal entries)
//! - Metrics engine (BMI, BMR, TDEE, daily calorie limit)
//! - Exercise calorie estimation
//! - Food catalog
//! - Persistence (profile, journal) and CSV export

pub mod types;
pub mod error;
pub mod metrics;
pub mod exercise;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod profile;
pub mod journal;
pub mod summary;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use metrics::{
    classify_bmi, compute_bmi, compute_bmr, compute_daily_calorie_limit, compute_metrics,
    compute_tdee,
};
pub use exercise::estimate_exercise_calories;
pub use catalog::{get_default_catalog, FoodCatalog};
pub use config::Config;
pub use journal::{JournalSink, JsonlJournal};
pub use summary::{summarize_days, DailySummary};
pub use export::export_summaries_csv;
