//! # intent-api
//!
//! HTTP API layer for intent-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment intent endpoint and a health check
//! - Origin allow-listing and CORS
//! - A Stripe probe for startup diagnostics
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check and processor status |
//! | POST | `/create-payment-intent` | Create payment intent, returns client secret |

pub mod cors;
pub mod handlers;
pub mod logging;
pub mod probe;
pub mod routes;
pub mod state;

pub use cors::OriginPolicy;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
