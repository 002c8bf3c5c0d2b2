//! # intent-stripe
//!
//! Stripe payment intent processor for intent-relay.
//!
//! **StripePaymentIntents** implements `PaymentIntentProcessor` over the
//! Payment Intents API with automatic payment methods enabled. The returned
//! client secret is confirmed by the browser with Stripe.js.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intent_core::{PaymentIntentGateway, PaymentRequest};
//! use intent_stripe::StripePaymentIntents;
//! use std::sync::Arc;
//!
//! // `None` when STRIPE_SECRET_KEY is not set
//! let processor = StripePaymentIntents::from_env()?;
//! let gateway = PaymentIntentGateway::from_processor(
//!     processor.map(|p| Arc::new(p) as _),
//! );
//!
//! let result = gateway.create_payment_intent(PaymentRequest::new(19.99)).await?;
//! ```

pub mod config;
pub mod payment_intents;

// Re-exports
pub use config::{StripeConfig, StripeKeyMode};
pub use payment_intents::StripePaymentIntents;
