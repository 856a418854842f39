//! Error types for the diet_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for diet_core operations
///
/// The metrics engine itself never returns errors; these cover the
/// persistence, catalog and validation layers around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile failed range checks
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// No stored profile where one is required
    #[error("No profile found; run `dietrack profile set` first")]
    MissingProfile,

    /// Food name not present in the catalog
    #[error("Unknown food: {0}")]
    UnknownFood(String),

    /// Journal read/write error
    #[error("Journal error: {0}")]
    Journal(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
