//! Error types for the SparkVibe domain model

use thiserror::Error;

/// Errors raised while interpreting stored or submitted domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown message category: {0}")]
    UnknownCategory(String),

    #[error("Unknown message mood: {0}")]
    UnknownMood(String),

    #[error("Unknown message length: {0}")]
    UnknownLength(String),

    #[error("Unknown achievement: {0}")]
    UnknownAchievement(String),

    #[error("Invalid wake time '{0}', expected HH:MM")]
    InvalidWakeTime(String),
}
