//! # Stripe Payment Intents
//!
//! Implementation of the Stripe Payment Intents API.
//! The browser confirms the intent with the returned client secret.

use crate::config::StripeConfig;
use async_trait::async_trait;
use intent_core::{
    CreateIntentParams, PaymentError, PaymentIntentProcessor, PaymentResult, ProcessorError,
    ProcessorIntent,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Stripe Payment Intents processor
pub struct StripePaymentIntents {
    config: StripeConfig,
    client: Client,
}

impl StripePaymentIntents {
    /// Create a new Payment Intents processor
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables; `None` when no key is configured
    pub fn from_env() -> PaymentResult<Option<Self>> {
        StripeConfig::from_env().map(Self::new).transpose()
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Build form data for the Stripe API
    fn form_params(params: &CreateIntentParams) -> Vec<(String, String)> {
        let mut form_params = vec![
            ("amount".to_string(), params.amount_minor.to_string()),
            ("currency".to_string(), params.currency.clone()),
        ];

        if params.automatic_payment_methods {
            form_params.push((
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ));
        }

        let mut metadata: Vec<_> = params.metadata.iter().collect();
        metadata.sort();
        for (key, value) in metadata {
            form_params.push((format!("metadata[{}]", key), value.clone()));
        }

        form_params
    }
}

#[async_trait]
impl PaymentIntentProcessor for StripePaymentIntents {
    #[instrument(skip(self, params), fields(amount = params.amount_minor, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<ProcessorIntent, ProcessorError> {
        let form_params = Self::form_params(params);
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        debug!(
            "Creating Stripe payment intent: {} metadata entries",
            params.metadata.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ProcessorError::connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProcessorError::connection(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(parse_error_body(status, &body));
        }

        let intent: StripePaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            ProcessorError::new(format!("Failed to parse Stripe response: {}", e))
                .with_type("api_error")
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            ProcessorError::new(format!("Payment intent {} has no client_secret", intent.id))
                .with_type("api_error")
        })?;

        info!("Created Stripe payment intent: id={}", intent.id);

        Ok(ProcessorIntent {
            id: intent.id,
            client_secret,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

/// Turn a non-2xx Stripe response into a processor error
fn parse_error_body(status: reqwest::StatusCode, body: &str) -> ProcessorError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(StripeErrorResponse { error }) => ProcessorError {
            message: error
                .message
                .unwrap_or_else(|| format!("HTTP {}", status)),
            error_type: error.error_type,
            code: error.code,
        },
        Err(_) => ProcessorError::new(format!("HTTP {}: {}", status, body)).with_type("api_error"),
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}
