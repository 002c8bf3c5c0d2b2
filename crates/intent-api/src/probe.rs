//! # Stripe Probe
//!
//! Startup diagnostics for the Stripe integration, used by the
//! `stripe-debug` binary. Never logs the key itself.

use intent_core::{
    CreateIntentParams, PaymentIntentProcessor, ProcessorError, ProcessorIntent,
    DEFAULT_CURRENCY,
};
use std::collections::HashMap;
use tracing::{error, info};

/// Amount used for the probe intent (1.00 in major units)
pub const PROBE_AMOUNT_MINOR: i64 = 100;

/// What the environment says about the Stripe credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReport {
    pub port: Option<String>,
    pub key_present: bool,
    pub key_is_live: bool,
    pub key_length: usize,
}

impl KeyReport {
    /// Inspect the environment through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup("STRIPE_SECRET_KEY");
        Self {
            port: lookup("PORT"),
            key_present: key.as_deref().is_some_and(|k| !k.is_empty()),
            key_is_live: key.as_deref().is_some_and(|k| k.starts_with("sk_live_")),
            key_length: key.as_deref().map_or(0, str::len),
        }
    }

    pub fn log(&self) {
        info!("PORT: {}", self.port.as_deref().unwrap_or("not set"));
        info!("STRIPE_SECRET_KEY exists: {}", self.key_present);
        info!("STRIPE_SECRET_KEY starts with sk_live: {}", self.key_is_live);
        info!("STRIPE_SECRET_KEY length: {}", self.key_length);
    }
}

/// Parameters of the probe intent
pub fn probe_params() -> CreateIntentParams {
    let mut metadata = HashMap::new();
    metadata.insert("test".to_string(), "true".to_string());
    CreateIntentParams::new(PROBE_AMOUNT_MINOR, DEFAULT_CURRENCY).with_metadata(metadata)
}

/// Create a small test payment intent and report the outcome
pub async fn probe_payment_intent(
    processor: &dyn PaymentIntentProcessor,
) -> Result<ProcessorIntent, ProcessorError> {
    info!("🧪 Testing payment intent creation...");

    match processor.create_payment_intent(&probe_params()).await {
        Ok(intent) => {
            info!("✅ Test payment intent created: {}", intent.id);
            info!("✅ Client secret generated: {}", !intent.client_secret.is_empty());
            Ok(intent)
        }
        Err(e) => {
            error!("❌ Stripe test failed: {}", e.message);
            error!("Error type: {}", e.error_type.as_deref().unwrap_or("unknown"));
            error!("Error code: {}", e.code.as_deref().unwrap_or("none"));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedProcessor {
        seen: Mutex<Option<CreateIntentParams>>,
        outcome: Result<ProcessorIntent, ProcessorError>,
    }

    #[async_trait]
    impl PaymentIntentProcessor for FixedProcessor {
        async fn create_payment_intent(
            &self,
            params: &CreateIntentParams,
        ) -> Result<ProcessorIntent, ProcessorError> {
            *self.seen.lock().unwrap() = Some(params.clone());
            self.outcome.clone()
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_key_report() {
        let report = KeyReport::from_lookup(|key| match key {
            "STRIPE_SECRET_KEY" => Some("sk_live_0123456789".to_string()),
            _ => None,
        });

        assert_eq!(report.port, None);
        assert!(report.key_present);
        assert!(report.key_is_live);
        assert_eq!(report.key_length, 18);
    }

    #[test]
    fn test_key_report_without_key() {
        let report = KeyReport::from_lookup(|key| match key {
            "PORT" => Some("3001".to_string()),
            _ => None,
        });

        assert_eq!(report.port.as_deref(), Some("3001"));
        assert!(!report.key_present);
        assert!(!report.key_is_live);
        assert_eq!(report.key_length, 0);
    }

    #[test]
    fn test_probe_params() {
        let params = probe_params();
        assert_eq!(params.amount_minor, 100);
        assert_eq!(params.currency, "eur");
        assert_eq!(params.metadata.get("test").map(String::as_str), Some("true"));
        assert!(params.automatic_payment_methods);
    }

    #[tokio::test]
    async fn test_probe_success() {
        let processor = FixedProcessor {
            seen: Mutex::new(None),
            outcome: Ok(ProcessorIntent {
                id: "pi_probe".to_string(),
                client_secret: "pi_probe_secret".to_string(),
            }),
        };

        let intent = probe_payment_intent(&processor).await.unwrap();

        assert_eq!(intent.id, "pi_probe");
        assert_eq!(processor.seen.lock().unwrap().clone(), Some(probe_params()));
    }

    #[tokio::test]
    async fn test_probe_failure() {
        let processor = FixedProcessor {
            seen: Mutex::new(None),
            outcome: Err(ProcessorError::new("Invalid API Key provided")
                .with_type("invalid_request_error")),
        };

        let err = probe_payment_intent(&processor).await.unwrap_err();
        assert_eq!(err.message, "Invalid API Key provided");
    }
}
