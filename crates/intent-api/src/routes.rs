//! # Routes
//!
//! Axum router configuration for the payment intent API.

use crate::cors::{cors_layer, reject_disallowed_origins};
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET  /health - Liveness and processor configuration
/// - POST /create-payment-intent - Create a payment intent, returns its client secret
///
/// Requests from origins outside the allow-list are answered with 403
/// before reaching any handler.
pub fn create_router(state: AppState) -> Router {
    let policy = Arc::new(state.config.origin_policy());

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            policy.clone(),
            reject_disallowed_origins,
        ))
        .layer(cors_layer(policy));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .layer(layers)
        .with_state(state)
}
