//! # intent-core
//!
//! Core types and traits for the intent-relay payment gateway.
//!
//! This crate provides:
//! - `PaymentRequest` and `PaymentIntentResult` for the request/response flow
//! - `PaymentIntentProcessor` trait for implementing payment processors
//! - `PaymentIntentGateway`, which validates requests and delegates to a processor
//! - `PaymentError` and `ProcessorError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use intent_core::{PaymentIntentGateway, PaymentRequest};
//!
//! // Delegate to a processor (or use `PaymentIntentGateway::mock()`)
//! let gateway = PaymentIntentGateway::new(processor);
//!
//! let result = gateway
//!     .create_payment_intent(PaymentRequest::new(19.99).with_currency("eur"))
//!     .await?;
//!
//! // Hand result.client_secret to the browser
//! ```

pub mod error;
pub mod gateway;
pub mod processor;
pub mod request;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult, ProcessorError, API_CONNECTION_ERROR};
pub use gateway::PaymentIntentGateway;
pub use processor::{
    BoxedPaymentIntentProcessor, CreateIntentParams, PaymentIntentProcessor, ProcessorIntent,
};
pub use request::{
    to_minor_units, PaymentIntentResult, PaymentRequest, DEFAULT_CURRENCY, MOCK_CLIENT_SECRET,
    MOCK_MESSAGE,
};
