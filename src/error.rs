//! Error types for configuration, runtime selection, and persistence.

use thiserror::Error;

/// A configuration the stepper refuses to start with.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min ({min}) must be less than max ({max})")]
    InvalidBounds { min: i64, max: i64 },
    #[error("step must be positive, got {0}")]
    NonPositiveStep(i64),
    #[error("{name} threshold must be positive, got {value}")]
    NonPositiveThreshold { name: &'static str, value: f64 },
    #[error("effort table has no levels")]
    EmptyEffortTable,
    #[error("intensity factor {factor} for effort {level} at {reps} reps is outside (0, 1]")]
    InvalidIntensity { level: u8, reps: u8, factor: f64 },
    #[error("effort level {0} is not in the effort table")]
    UnknownEffort(u8),
    #[error("effort level {level} has no entry for {reps} reps")]
    MissingRepCount { level: u8, reps: u8 },
    #[error("invalid stepper config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors from runtime operations on a constructed stepper.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepperError {
    #[error("effort level {0} is not in the effort table")]
    UnknownEffort(u8),
    #[error("stepper has no effort selector")]
    NoEffortSelector,
}

/// Errors from a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
