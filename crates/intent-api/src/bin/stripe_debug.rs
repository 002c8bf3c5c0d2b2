//! # Stripe Debug
//!
//! Checks the Stripe configuration and creates a €1.00 test payment intent.
//!
//! ```bash
//! STRIPE_SECRET_KEY=sk_test_... stripe-debug
//! ```

use intent_api::logging::init_tracing;
use intent_api::probe::{probe_payment_intent, KeyReport};
use intent_stripe::{StripeConfig, StripePaymentIntents};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("🔍 Debugging Stripe configuration");
    KeyReport::from_lookup(|key| env::var(key).ok()).log();

    let Some(config) = StripeConfig::from_env() else {
        anyhow::bail!("STRIPE_SECRET_KEY is not set; nothing to test");
    };
    info!("Key mode: {}", config.key_mode());

    let processor = StripePaymentIntents::new(config)?;
    info!("✅ Stripe client initialized");

    probe_payment_intent(&processor).await?;

    Ok(())
}
