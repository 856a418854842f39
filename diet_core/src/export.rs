//! CSV export of daily summaries.

use crate::{DailySummary, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct CsvRow {
    day: String,
    consumed_kcal: f64,
    burned_kcal: f64,
    net_kcal: f64,
    limit_kcal: f64,
    remaining_kcal: f64,
    food_entries: usize,
    exercise_entries: usize,
}

impl From<&DailySummary> for CsvRow {
    fn from(summary: &DailySummary) -> Self {
        CsvRow {
            day: summary.day.format("%Y-%m-%d").to_string(),
            consumed_kcal: round1(summary.consumed),
            burned_kcal: round1(summary.burned),
            net_kcal: round1(summary.net),
            limit_kcal: round1(summary.limit),
            remaining_kcal: round1(summary.remaining),
            food_entries: summary.food_entries,
            exercise_entries: summary.exercise_entries,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Write summaries to `csv_path`, replacing any existing file
///
/// The file is synced to disk before returning. Returns the number of rows.
pub fn export_summaries_csv(summaries: &[DailySummary], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;

    for summary in summaries {
        writer.serialize(CsvRow::from(summary))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} daily summaries to {:?}", summaries.len(), csv_path);
    Ok(summaries.len())
}
