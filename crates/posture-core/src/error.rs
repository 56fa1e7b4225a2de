//! Error types for the posture scoring engine.
//!
//! Frame analysis itself is total and never returns these. They surface only
//! at construction and configuration boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Landmark count mismatch: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
