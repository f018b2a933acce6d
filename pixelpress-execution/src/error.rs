//! Error types for batch submission

use thiserror::Error;

pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Batch-level errors. Per-image failures are reported in
/// [`crate::BatchOutcome::failures`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Batch of {submitted} images exceeds the limit of {max}")]
    Capacity { submitted: usize, max: usize },

    #[error("Processing pool unavailable: {0}")]
    Unavailable(String),

    #[error("Worker error: {0}")]
    WorkerError(String),
}
