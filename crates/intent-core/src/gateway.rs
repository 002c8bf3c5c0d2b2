//! # Payment Intent Gateway
//!
//! Validates a [`PaymentRequest`] and either answers with a mock result (no
//! processor configured) or delegates to a [`PaymentIntentProcessor`].

use crate::error::{PaymentError, PaymentResult};
use crate::processor::{BoxedPaymentIntentProcessor, CreateIntentParams};
use crate::request::{to_minor_units, PaymentIntentResult, PaymentRequest};
use tracing::{error, info, instrument, warn};

/// Gateway between browser payment requests and the processor.
///
/// Holding no processor means mock mode; a configured gateway can never
/// return the mock secret.
#[derive(Clone)]
pub struct PaymentIntentGateway {
    processor: Option<BoxedPaymentIntentProcessor>,
}

impl PaymentIntentGateway {
    /// Create a gateway that delegates to `processor`
    pub fn new(processor: BoxedPaymentIntentProcessor) -> Self {
        Self {
            processor: Some(processor),
        }
    }

    /// Create a gateway in mock mode
    pub fn mock() -> Self {
        Self { processor: None }
    }

    /// Create a gateway from an optional processor (`None` = mock mode)
    pub fn from_processor(processor: Option<BoxedPaymentIntentProcessor>) -> Self {
        Self { processor }
    }

    /// Whether a real processor is configured
    pub fn is_configured(&self) -> bool {
        self.processor.is_some()
    }

    /// Name of the configured processor, if any
    pub fn provider_name(&self) -> Option<&'static str> {
        self.processor.as_ref().map(|p| p.provider_name())
    }

    /// Create a payment intent for `request`.
    #[instrument(skip(self, request), fields(currency = %request.currency))]
    pub async fn create_payment_intent(
        &self,
        request: PaymentRequest,
    ) -> PaymentResult<PaymentIntentResult> {
        let amount = request.valid_amount().ok_or_else(|| {
            warn!("Rejected payment request: amount={:?}", request.amount);
            PaymentError::InvalidAmount
        })?;

        let Some(processor) = &self.processor else {
            info!("Processor not configured, returning mock client secret");
            return Ok(PaymentIntentResult::mock());
        };

        let params = CreateIntentParams::new(to_minor_units(amount), request.currency)
            .with_metadata(request.metadata);

        info!(
            "Creating payment intent: provider={}, amount_minor={}, currency={}",
            processor.provider_name(),
            params.amount_minor,
            params.currency
        );

        let intent = processor.create_payment_intent(&params).await.map_err(|e| {
            error!(
                "Error creating payment intent: {} (type={:?}, code={:?})",
                e.message, e.error_type, e.code
            );
            PaymentError::from(e)
        })?;

        info!("Created payment intent: {}", intent.id);

        Ok(PaymentIntentResult::new(intent.client_secret))
    }
}

impl std::fmt::Debug for PaymentIntentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentIntentGateway")
            .field("provider", &self.provider_name())
            .finish()
    }
}
