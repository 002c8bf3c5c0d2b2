//! # Intent Relay
//!
//! Payment intent relay between the browser and Stripe.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (omit the key to run in mock mode)
//! export STRIPE_SECRET_KEY=sk_test_...
//! export ALLOWED_ORIGINS=https://shop.example.com
//!
//! # Run the server
//! intent-relay
//! ```

use intent_api::{logging::init_tracing, routes, state::AppConfig, state::AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    print_banner();

    // Configuration is read once here and injected everywhere else
    let config = AppConfig::from_env();
    let state = AppState::new(config)?;

    let addr = state.config.bind_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Processor key: {}", state.config.processor_key_mode());
    info!("Allowed origins: {:?}", state.config.allowed_origins);
    info!(
        "Trusted origin suffixes: {:?}",
        state.config.trusted_origin_suffixes
    );

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Intent relay running on http://{}", addr);

    if !is_prod {
        info!("📝 Health check: http://{}/health", addr);
        info!("💳 Payment endpoint: POST http://{}/create-payment-intent", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  ⚡ Intent Relay ⚡
  ━━━━━━━━━━━━━━━━━━━━━━━
  Stripe payment intent relay
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
