//! REST API specific error types and conversions

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pixelpress_execution::ProcessingError;
use pixelpress_imaging::ImagingError;
use pixelpress_loadtest::LoadTestError;
use pixelpress_web::WebError;
use thiserror::Error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Web error")]
    Web(#[from] WebError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        RestError::Validation {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        RestError::InternalError(message.into())
    }

    /// Convert to the shared web error envelope
    pub fn into_web_error(self) -> WebError {
        match self {
            RestError::BadRequest(msg) => WebError::bad_request(msg),
            RestError::Validation { message } => WebError::validation(message),
            RestError::Conflict(msg) => WebError::conflict(msg),
            RestError::PayloadTooLarge(msg) => WebError::payload_too_large(msg),
            RestError::ServiceUnavailable(msg) => WebError::service_unavailable(msg),
            RestError::InternalError(msg) => WebError::internal(msg),
            RestError::Web(web_err) => web_err,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.into_web_error().into_response()
    }
}

impl From<ProcessingError> for RestError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Validation(message) => RestError::Validation { message },
            ProcessingError::Capacity { .. } => RestError::PayloadTooLarge(err.to_string()),
            ProcessingError::Unavailable(msg) => RestError::ServiceUnavailable(msg),
            ProcessingError::WorkerError(msg) => RestError::InternalError(msg),
        }
    }
}

impl From<LoadTestError> for RestError {
    fn from(err: LoadTestError) -> Self {
        match err {
            LoadTestError::Validation(message) => RestError::Validation { message },
            LoadTestError::AlreadyRunning(_) => RestError::Conflict(err.to_string()),
            LoadTestError::WorkerSpawn(msg) => RestError::InternalError(msg),
        }
    }
}

impl From<ImagingError> for RestError {
    fn from(err: ImagingError) -> Self {
        match err {
            ImagingError::UnknownFilter(_) => RestError::Validation {
                message: err.to_string(),
            },
            other => RestError::InternalError(other.to_string()),
        }
    }
}

impl From<MultipartError> for RestError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RestError::PayloadTooLarge(err.body_text())
        } else {
            RestError::BadRequest(err.body_text())
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => RestError::Validation {
                message: rejection.body_text(),
            },
            _ if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                RestError::PayloadTooLarge(rejection.body_text())
            }
            _ => RestError::BadRequest(rejection.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_mapping() {
        let err: RestError = ProcessingError::Capacity { submitted: 40, max: 32 }.into();
        assert_eq!(err.into_web_error().status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let err: RestError = ProcessingError::Validation("No images provided".into()).into();
        assert_eq!(err.into_web_error().error_code(), "VALIDATION_ERROR");

        let err: RestError = ProcessingError::Unavailable("closed".into()).into();
        assert_eq!(err.into_web_error().status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_load_test_error_mapping() {
        let err: RestError = LoadTestError::AlreadyRunning(uuid::Uuid::nil()).into();
        assert_eq!(err.into_web_error().status_code(), StatusCode::CONFLICT);

        let err: RestError = LoadTestError::Validation("threads".into()).into();
        assert_eq!(err.into_web_error().status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_filter_is_validation() {
        let err: RestError = ImagingError::UnknownFilter("emboss".into()).into();
        let web = err.into_web_error();
        assert_eq!(web.error_code(), "VALIDATION_ERROR");
        assert!(web.message().contains("emboss"));
    }
}
