//! # Request Handlers
//!
//! Axum request handlers for the payment intent API.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use intent_core::{PaymentError, PaymentIntentResult, PaymentRequest};
use intent_stripe::StripeKeyMode;
use serde::Serialize;
use tracing::{error, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Processor error category, relayed verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_error_type: Option<String>,
    /// Processor error code, relayed verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_type: None,
            processor_error_type: None,
            code: None,
        }
    }

    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }
}

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub processor_configured: bool,
    pub processor_key_type: StripeKeyMode,
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let response = match &err {
        PaymentError::InvalidRequest(_) => ErrorResponse::new("Invalid request body"),
        PaymentError::PaymentIntentCreationFailed(processor_err) => ErrorResponse {
            error: processor_err.message.clone(),
            error_type: None,
            processor_error_type: processor_err.error_type.clone(),
            code: processor_err.code.clone(),
        },
        _ => ErrorResponse::new(err.to_string()),
    };

    let response = match err.kind() {
        Some(kind) => response.with_type(kind),
        None => response,
    };

    (status, Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: state.config.environment.clone(),
        processor_configured: state.gateway.is_configured(),
        processor_key_type: state.config.processor_key_mode(),
    })
}

/// Create a payment intent and return its client secret
#[instrument(skip(state, payload))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntentResult>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Malformed payment request: {}", rejection.body_text());
        payment_error_to_response(PaymentError::InvalidRequest(rejection.body_text()))
    })?;

    let result = state
        .gateway
        .create_payment_intent(request)
        .await
        .map_err(|e| {
            if e.status_code() >= 500 {
                error!("Failed to create payment intent: {}", e);
            }
            payment_error_to_response(e)
        })?;

    Ok(Json(result))
}
