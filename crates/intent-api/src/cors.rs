//! # Cross-Origin Policy
//!
//! Browser origins are allowed when they are on the configured allow-list or
//! their host sits under a trusted hosting suffix. Requests without an
//! `Origin` header (curl, server-to-server, mobile apps) are always allowed.

use crate::handlers::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::{header, request::Parts, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Body of the rejection sent to disallowed origins
pub const CORS_REJECTED_MESSAGE: &str = "Not allowed by CORS";

/// Allow-list of browser origins
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed_origins: Vec<String>,
    trusted_suffixes: Vec<String>,
}

impl OriginPolicy {
    pub fn new(allowed_origins: &[String], trusted_suffixes: &[String]) -> Self {
        let allowed_origins = allowed_origins
            .iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        // ".vercel.app" and "vercel.app" both mean "any subdomain of vercel.app"
        let trusted_suffixes = trusted_suffixes
            .iter()
            .map(|s| s.trim().trim_start_matches("*.").trim_start_matches('.'))
            .filter(|s| !s.is_empty())
            .map(|s| format!(".{}", s.to_ascii_lowercase()))
            .collect();

        Self {
            allowed_origins,
            trusted_suffixes,
        }
    }

    /// Check an `Origin` header value; `None` means the header was absent
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };

        if self
            .allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
        {
            return true;
        }

        origin_host(origin).is_some_and(|host| {
            self.trusted_suffixes
                .iter()
                .any(|suffix| host.ends_with(suffix.as_str()))
        })
    }
}

fn origin_host(origin: &str) -> Option<String> {
    let uri: Uri = origin.parse().ok()?;
    match uri.scheme_str() {
        Some("http") | Some("https") => uri.host().map(|h| h.to_ascii_lowercase()),
        _ => None,
    }
}

/// Build the CORS layer that mirrors allowed origins back to the browser
pub fn cors_layer(policy: Arc<OriginPolicy>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| policy.is_allowed(Some(o)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Middleware: reject requests from disallowed origins before they reach a handler
pub async fn reject_disallowed_origins(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|v| v.to_str().unwrap_or_default());

    if !policy.is_allowed(origin) {
        warn!("Rejected request from origin {:?}", origin);
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(CORS_REJECTED_MESSAGE)),
        )
            .into_response();
    }

    next.run(request).await
}
