//! Core domain types for the diet tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Body profile and activity presets
//! - Derived health metrics and BMI bands
//! - Food catalog items
//! - Journal entries for food intake and exercise

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender used by the Mifflin-St Jeor equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Named activity presets mapping to the standard TDEE multipliers
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or training twice a day
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// TDEE multiplier for this preset
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Parse a preset name (`sedentary`, `light`, `moderate`, ...)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Some(ActivityLevel::LightlyActive),
            "moderate" | "moderately_active" => Some(ActivityLevel::ModeratelyActive),
            "very" | "very_active" => Some(ActivityLevel::VeryActive),
            "extreme" | "extremely_active" => Some(ActivityLevel::ExtremelyActive),
            _ => None,
        }
    }
}

/// A user's body profile, the sole input to the metrics engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub gender: Gender,
    /// Years
    pub age: u32,
    /// Centimeters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    /// TDEE multiplier; any positive real is accepted
    pub activity_level: f64,
    /// Target daily energy deficit in kcal
    pub calorie_deficit: f64,
}

// ============================================================================
// Derived Metrics
// ============================================================================

/// BMI band, lower bound of each band inclusive
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics derived from a [`UserProfile`]
///
/// Never persisted; recomputed from the profile whenever it is needed.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct CalculatedMetrics {
    /// kg/m²
    pub bmi: f64,
    /// kcal/day
    pub bmr: f64,
    /// kcal/day
    pub tdee: f64,
    /// kcal/day, may be negative when the deficit exceeds TDEE
    pub daily_calorie_limit: f64,
    pub bmi_category: BmiCategory,
}

// ============================================================================
// Food Catalog Types
// ============================================================================

/// A food with its energy density
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    pub name: String,
    pub kcal_per_100g: f64,
}

impl FoodItem {
    /// Calories contained in `grams` of this food
    pub fn calories_for(&self, grams: f64) -> f64 {
        self.kcal_per_100g * grams / 100.0
    }
}

// ============================================================================
// Journal Types
// ============================================================================

/// What a journal entry records
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    Food {
        name: String,
        grams: f64,
        calories: f64,
    },
    Exercise {
        name: String,
        duration_minutes: f64,
        calories_burned: f64,
    },
}

/// A single line in the intake journal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    /// Calendar day the entry counts towards
    pub day: NaiveDate,
    pub kind: EntryKind,
}

impl JournalEntry {
    /// Record `grams` of a catalog food eaten on `day`
    pub fn food(item: &FoodItem, grams: f64, day: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            day,
            kind: EntryKind::Food {
                name: item.name.clone(),
                grams,
                calories: item.calories_for(grams),
            },
        }
    }

    /// Record an exercise, estimating the burn from body weight
    pub fn exercise(name: &str, duration_minutes: f64, weight_kg: f64, day: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            day,
            kind: EntryKind::Exercise {
                name: name.to_string(),
                duration_minutes,
                calories_burned: crate::exercise::estimate_exercise_calories(
                    name,
                    duration_minutes,
                    weight_kg,
                ),
            },
        }
    }

    /// Display name of the food or exercise
    pub fn name(&self) -> &str {
        match &self.kind {
            EntryKind::Food { name, .. } | EntryKind::Exercise { name, .. } => name,
        }
    }

    /// Calories eaten (food) or zero
    pub fn consumed(&self) -> f64 {
        match self.kind {
            EntryKind::Food { calories, .. } => calories,
            EntryKind::Exercise { .. } => 0.0,
        }
    }

    /// Calories burned (exercise) or zero
    pub fn burned(&self) -> f64 {
        match self.kind {
            EntryKind::Exercise { calories_burned, .. } => calories_burned,
            EntryKind::Food { .. } => 0.0,
        }
    }
}
