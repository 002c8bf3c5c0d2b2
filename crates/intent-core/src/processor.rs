//! # Payment Intent Processor Trait
//!
//! The capability seam between the gateway and an external payment processor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              PaymentIntentProcessor (trait)                 │
//! │  ├── create_payment_intent()                                │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                ┌───────────┴───────────┐
//!                │                       │
//!       ┌────────┴────────┐     ┌────────┴────────┐
//!       │StripePayment-   │     │  test doubles   │
//!       │    Intents      │     │                 │
//!       └─────────────────┘     └─────────────────┘
//! ```

use crate::error::ProcessorError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Parameters for a "create payment intent" call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntentParams {
    /// Amount in the smallest currency unit (cents for EUR/USD)
    pub amount_minor: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Metadata stored on the intent
    pub metadata: HashMap<String, String>,
    /// Let the processor choose eligible payment methods
    pub automatic_payment_methods: bool,
}

impl CreateIntentParams {
    pub fn new(amount_minor: i64, currency: impl Into<String>) -> Self {
        Self {
            amount_minor,
            currency: currency.into(),
            metadata: HashMap::new(),
            automatic_payment_methods: true,
        }
    }

    /// Builder: replace metadata
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A payment intent as created by the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorIntent {
    /// Processor-side identifier (`pi_...`)
    pub id: String,
    /// Secret handed to the browser client
    pub client_secret: String,
}

/// External processor capable of creating payment intents.
#[async_trait]
pub trait PaymentIntentProcessor: Send + Sync {
    /// Create a payment intent.
    ///
    /// Must have no local side effect on failure.
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<ProcessorIntent, ProcessorError>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared processor (dynamic dispatch)
pub type BoxedPaymentIntentProcessor = Arc<dyn PaymentIntentProcessor>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_enable_automatic_methods() {
        let params = CreateIntentParams::new(1999, "eur");

        assert_eq!(params.amount_minor, 1999);
        assert_eq!(params.currency, "eur");
        assert!(params.metadata.is_empty());
        assert!(params.automatic_payment_methods);
    }
}
