//! # Payment Error Types
//!
//! Typed error handling for the intent-relay gateway.
//! Gateway operations return `Result<T, PaymentError>`; processor
//! implementations report failures as `ProcessorError`.

use thiserror::Error;

/// Error category used for transport-level failures talking to a processor.
pub const API_CONNECTION_ERROR: &str = "api_connection_error";

/// Structured failure reported by a payment processor.
///
/// Fields are relayed verbatim to the caller for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProcessorError {
    /// Human-readable message from the processor
    pub message: String,
    /// Processor error category (e.g. `invalid_request_error`)
    pub error_type: Option<String>,
    /// Processor error code (e.g. `amount_too_small`)
    pub code: Option<String>,
}

impl ProcessorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            code: None,
        }
    }

    /// Network/HTTP failure before the processor produced a response
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(message).with_type(API_CONNECTION_ERROR)
    }

    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Core error type for gateway operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Amount missing, zero, negative or not a number
    #[error("Invalid amount provided")]
    InvalidAmount,

    /// Malformed request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors (bad bind address, unusable settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The processor rejected or could not complete the request
    #[error("Payment intent creation failed: {}", .0.message)]
    PaymentIntentCreationFailed(ProcessorError),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidAmount => 400,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::Configuration(_) => 500,
            PaymentError::PaymentIntentCreationFailed(_) => 500,
        }
    }

    /// Machine-readable error kind, where the HTTP contract exposes one
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            PaymentError::PaymentIntentCreationFailed(_) => Some("payment_intent_creation_failed"),
            _ => None,
        }
    }
}

impl From<ProcessorError> for PaymentError {
    fn from(err: ProcessorError) -> Self {
        PaymentError::PaymentIntentCreationFailed(err)
    }
}

/// Result type alias for gateway operations
pub type PaymentResult<T> = Result<T, PaymentError>;
