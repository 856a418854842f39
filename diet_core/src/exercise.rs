//! Exercise calorie estimation.
//!
//! A two-tier approximation: brisk walking burns 0.05 kcal per kg per
//! minute, everything else 0.08.

/// Name fragments that mark an exercise as brisk walking (matched lowercase)
pub const BRISK_WALK_TERMS: &[&str] = &["快走", "brisk walk"];

const BRISK_WALK_RATE: f64 = 0.05;
const DEFAULT_RATE: f64 = 0.08;

/// Whether `name` contains any brisk-walk term, ignoring case
pub fn is_brisk_walk(name: &str) -> bool {
    let name = name.to_lowercase();
    BRISK_WALK_TERMS.iter().any(|term| name.contains(term))
}

/// Estimate calories burned for an exercise entry
pub fn estimate_exercise_calories(name: &str, duration_minutes: f64, weight_kg: f64) -> f64 {
    let rate = if is_brisk_walk(name) {
        BRISK_WALK_RATE
    } else {
        DEFAULT_RATE
    };
    rate * weight_kg * duration_minutes
}
