//! Daily calorie summaries.
//!
//! Combines the journal with the profile's computed daily limit.

use crate::{CalculatedMetrics, JournalEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Calorie balance for a single day
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DailySummary {
    pub day: NaiveDate,
    /// Calories eaten
    pub consumed: f64,
    /// Calories burned through logged exercise
    pub burned: f64,
    /// consumed - burned
    pub net: f64,
    /// The profile's daily calorie limit
    pub limit: f64,
    /// limit - net; negative once over budget
    pub remaining: f64,
    pub food_entries: usize,
    pub exercise_entries: usize,
}

impl DailySummary {
    /// Summarize `entries` for `day`; entries for other days are ignored
    pub fn build(day: NaiveDate, entries: &[JournalEntry], metrics: &CalculatedMetrics) -> Self {
        let mut consumed = 0.0;
        let mut burned = 0.0;
        let mut food_entries = 0;
        let mut exercise_entries = 0;

        for entry in entries.iter().filter(|e| e.day == day) {
            match entry.kind {
                crate::EntryKind::Food { calories, .. } => {
                    consumed += calories;
                    food_entries += 1;
                }
                crate::EntryKind::Exercise {
                    calories_burned, ..
                } => {
                    burned += calories_burned;
                    exercise_entries += 1;
                }
            }
        }

        let net = consumed - burned;
        let limit = metrics.daily_calorie_limit;

        Self {
            day,
            consumed,
            burned,
            net,
            limit,
            remaining: limit - net,
            food_entries,
            exercise_entries,
        }
    }

    pub fn over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

/// One summary per day that has entries, oldest first
pub fn summarize_days(entries: &[JournalEntry], metrics: &CalculatedMetrics) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, Vec<JournalEntry>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(entry.day).or_default().push(entry.clone());
    }

    let summaries: Vec<_> = by_day
        .into_iter()
        .map(|(day, day_entries)| DailySummary::build(day, &day_entries, metrics))
        .collect();

    tracing::debug!("Summarized {} days", summaries.len());
    summaries
}
