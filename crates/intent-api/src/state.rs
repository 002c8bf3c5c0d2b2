//! # Application State
//!
//! Shared state for the Axum application.
//! Configuration is read once at startup and injected from here.

use crate::cors::OriginPolicy;
use intent_core::{BoxedPaymentIntentProcessor, PaymentIntentGateway, PaymentResult};
use intent_stripe::{StripeConfig, StripeKeyMode, StripePaymentIntents};
use std::env;
use std::sync::Arc;
use tracing::{error, info, warn};

const DEFAULT_PORT: u16 = 3001;

const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
    "http://localhost:5176",
];

const DEFAULT_TRUSTED_ORIGIN_SUFFIXES: [&str; 1] = [".vercel.app"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Exact origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,
    /// Host suffixes whose subdomains are trusted (e.g. `.vercel.app`)
    pub trusted_origin_suffixes: Vec<String>,
    /// Stripe configuration; `None` runs the gateway in mock mode
    pub stripe: Option<StripeConfig>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()),
            trusted_origin_suffixes: lookup("TRUSTED_ORIGIN_SUFFIXES")
                .map(|s| split_list(&s))
                .unwrap_or_else(|| {
                    DEFAULT_TRUSTED_ORIGIN_SUFFIXES
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
            stripe: StripeConfig::from_lookup(&lookup),
        }
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Kind of processor key configured
    pub fn processor_key_mode(&self) -> StripeKeyMode {
        StripeKeyMode::of(self.stripe.as_ref())
    }

    /// Cross-origin policy derived from this configuration
    pub fn origin_policy(&self) -> OriginPolicy {
        OriginPolicy::new(&self.allowed_origins, &self.trusted_origin_suffixes)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment intent gateway (mock mode when Stripe is not configured)
    pub gateway: PaymentIntentGateway,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create the state, wiring Stripe in when a key is configured
    pub fn new(config: AppConfig) -> PaymentResult<Self> {
        let processor = config
            .stripe
            .clone()
            .map(StripePaymentIntents::new)
            .transpose()?
            .map(|p| Arc::new(p) as BoxedPaymentIntentProcessor);

        match &processor {
            Some(_) => info!(
                "Stripe configured ({} key)",
                config.processor_key_mode()
            ),
            None if config.is_production() => error!(
                "STRIPE_SECRET_KEY is not set in production; all payment intents will be mocked"
            ),
            None => warn!("STRIPE_SECRET_KEY is not set; payment intents will be mocked"),
        }

        Ok(Self::with_gateway(
            config,
            PaymentIntentGateway::from_processor(processor),
        ))
    }

    /// Create the state around an existing gateway
    pub fn with_gateway(config: AppConfig, gateway: PaymentIntentGateway) -> Self {
        Self {
            gateway,
            config: Arc::new(config),
        }
    }
}
