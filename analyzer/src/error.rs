//! Analyzer error types

use shared::{ModelFailure, RecordError};
use thiserror::Error;

/// Result type for analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Analyzer error types.
///
/// Only `Context` and `Config` ever cross the crate boundary.
/// `ModelUnavailable` and `Schema` are absorbed by the engine into valid,
/// degraded results; they appear in signatures so every failure path is
/// visible, not inferred from caught exception types.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("invalid opportunity record: {0}")]
    Context(#[from] RecordError),

    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: ModelFailure },

    #[error("model response violated the output contract: {message}")]
    Schema { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl AnalyzerError {
    pub fn schema(message: impl Into<String>) -> Self {
        AnalyzerError::Schema {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AnalyzerError::Config {
            message: message.into(),
        }
    }
}
