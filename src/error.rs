//! Error types for the visitor notification pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::FormErrors;
use thiserror::Error;

/// Errors that can occur when talking to the email delivery endpoint.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Endpoint returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to encode or parse JSON
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Transport-level timeout
    #[error("Request timeout")]
    Timeout,

    /// The attempt was aborted through its cancellation token
    #[error("Delivery cancelled")]
    Cancelled,

    /// Generic delivery error with context
    #[error("Delivery error: {0}")]
    Other(String),
}

impl DeliveryError {
    /// Whether another attempt may succeed. Cancellation is never retried.
    pub fn is_retriable(&self) -> bool {
        !matches!(self, DeliveryError::Cancelled)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to read or parse the company configuration file
    #[error("Failed to load company configuration from {path}: {reason}")]
    FileError { path: String, reason: String },
}

/// Errors that end a submission attempt.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// One or more form fields failed validation
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FormErrors),

    /// The selected host is not in the directory
    #[error("Host not found: {0}")]
    HostNotFound(String),

    /// The visitor confirmation email could not be delivered
    #[error("Visitor confirmation failed: {0}")]
    VisitorDelivery(DeliveryError),

    /// The attempt timed out or was aborted
    #[error("Submission cancelled")]
    Cancelled,
}

/// Convenience type alias for Results with DeliveryError
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SubmissionError
pub type SubmissionResult<T> = Result<T, SubmissionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormField, ValidationError};

    #[test]
    fn test_error_display() {
        let err = DeliveryError::Cancelled;
        assert_eq!(err.to_string(), "Delivery cancelled");

        let err = ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT".to_string(),
            reason: "Timeouts must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for REQUEST_TIMEOUT: Timeouts must be greater than zero"
        );

        let err = SubmissionError::HostNotFound("nobody".to_string());
        assert_eq!(err.to_string(), "Host not found: nobody");
    }

    #[test]
    fn test_api_error_variants() {
        let err = DeliveryError::ApiError {
            status: 500,
            message: "Failed to send email".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Failed to send email"));
    }

    #[test]
    fn test_retriable() {
        assert!(DeliveryError::Timeout.is_retriable());
        assert!(DeliveryError::HttpError("reset".to_string()).is_retriable());
        assert!(!DeliveryError::Cancelled.is_retriable());
    }

    #[test]
    fn test_validation_error_counts_fields() {
        let mut errors = FormErrors::default();
        errors.insert(ValidationError::Required(FormField::VisitorName));
        errors.insert(ValidationError::Required(FormField::Host));

        let err = SubmissionError::Validation(errors);
        assert_eq!(err.to_string(), "Validation failed for 2 field(s)");
    }
}
