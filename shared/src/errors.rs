//! Shared error types for the opportunity analysis system

use thiserror::Error;

/// Contract violations in records supplied by external collaborators.
///
/// These indicate a bug upstream of the engine (the record store handed
/// over an unusable record). They surface to the caller unchanged and
/// never engage the degraded-mode fallback path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is missing required field: {field}")]
    MissingField { field: String },
}

pub type RecordResult<T> = Result<T, RecordError>;
