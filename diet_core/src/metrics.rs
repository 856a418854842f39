//! Metrics engine: body profile to derived health metrics.
//!
//! All functions are pure arithmetic. They perform no validation; malformed
//! input flows through to malformed output (e.g. a zero height gives an
//! infinite BMI). Use [`UserProfile::validate`](crate::UserProfile::validate)
//! at the input boundary if stricter behavior is wanted.

use crate::{BmiCategory, CalculatedMetrics, Gender, UserProfile};

/// Body Mass Index: weight (kg) over height (m) squared
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    let height_m = height / 100.0;
    weight / (height_m * height_m)
}

/// Classify a BMI into its band
///
/// Bands are half-open with an inclusive lower bound:
/// `< 18.5` underweight, `< 24` normal, `< 28` overweight, otherwise obese.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.0 {
        BmiCategory::Normal
    } else if bmi < 28.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Formula: `10 * weight + 6.25 * height - 5 * age + offset`
/// - Male: +5
/// - Female: -161
pub fn compute_bmr(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by the activity multiplier
pub fn compute_tdee(bmr: f64, activity_level: f64) -> f64 {
    bmr * activity_level
}

/// Recommended daily intake. Not clamped; goes negative if the deficit exceeds TDEE.
pub fn compute_daily_calorie_limit(tdee: f64, calorie_deficit: f64) -> f64 {
    tdee - calorie_deficit
}

/// Compute every derived metric for a profile
pub fn compute_metrics(profile: &UserProfile) -> CalculatedMetrics {
    let bmi = compute_bmi(profile.weight, profile.height);
    let bmr = compute_bmr(profile);
    let tdee = compute_tdee(bmr, profile.activity_level);
    let daily_calorie_limit = compute_daily_calorie_limit(tdee, profile.calorie_deficit);

    tracing::trace!(bmi, bmr, tdee, daily_calorie_limit, "Computed metrics");

    CalculatedMetrics {
        bmi,
        bmr,
        tdee,
        daily_calorie_limit,
        bmi_category: classify_bmi(bmi),
    }
}
