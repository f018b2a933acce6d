//! Error types for the filter engine

use thiserror::Error;

pub type ImagingResult<T> = Result<T, ImagingError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImagingError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Unknown filter '{0}'. Valid filters: grayscale, blur, sharpen, sepia")]
    UnknownFilter(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}
