//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! The secret key is loaded from the environment; its absence is not an
//! error, it puts the gateway into mock mode.

use serde::Serialize;
use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Request timeout for Stripe calls
    pub timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `STRIPE_SECRET_KEY` is unset or blank.
    /// `STRIPE_API_BASE_URL` optionally overrides the API host.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())?;

        if !secret_key.starts_with("sk_") && !secret_key.starts_with("rk_") {
            warn!("STRIPE_SECRET_KEY does not look like a Stripe secret key (expected sk_ or rk_ prefix)");
        }

        let mut config = Self::new(secret_key);
        if let Some(url) = lookup("STRIPE_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config = config.with_api_base_url(url.trim());
        }

        Some(config)
    }

    /// Create config with an explicit key
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Which kind of key is configured
    pub fn key_mode(&self) -> StripeKeyMode {
        if self.is_live_mode() {
            StripeKeyMode::Live
        } else {
            StripeKeyMode::Test
        }
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_") || self.secret_key.starts_with("rk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The secret key never reaches logs.
impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("key_mode", &self.key_mode())
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Kind of Stripe credential configured, as reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeKeyMode {
    Live,
    Test,
    Missing,
}

impl StripeKeyMode {
    /// Key mode of an optional configuration
    pub fn of(config: Option<&StripeConfig>) -> Self {
        config.map_or(StripeKeyMode::Missing, StripeConfig::key_mode)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StripeKeyMode::Live => "live",
            StripeKeyMode::Test => "test",
            StripeKeyMode::Missing => "missing",
        }
    }
}

impl std::fmt::Display for StripeKeyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_key_modes() {
        assert_eq!(StripeConfig::new("sk_test_abc123").key_mode(), StripeKeyMode::Test);
        assert_eq!(StripeConfig::new("sk_live_abc123").key_mode(), StripeKeyMode::Live);
        assert_eq!(StripeConfig::new("rk_live_abc123").key_mode(), StripeKeyMode::Live);
        assert_eq!(StripeKeyMode::of(None), StripeKeyMode::Missing);
    }

    #[test]
    fn test_key_mode_serialization() {
        assert_eq!(serde_json::to_value(StripeKeyMode::Live).unwrap(), "live");
        assert_eq!(serde_json::to_value(StripeKeyMode::Missing).unwrap(), "missing");
        assert_eq!(StripeKeyMode::Test.to_string(), "test");
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_from_lookup_missing_key() {
        assert!(StripeConfig::from_lookup(lookup(&[])).is_none());
        assert!(StripeConfig::from_lookup(lookup(&[("STRIPE_SECRET_KEY", "  ")])).is_none());
    }

    #[test]
    fn test_from_lookup_with_overrides() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc123"),
            ("STRIPE_API_BASE_URL", "http://127.0.0.1:12111/"),
        ]))
        .unwrap();

        assert_eq!(config.secret_key, "sk_test_abc123");
        assert_eq!(config.api_base_url, "http://127.0.0.1:12111");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", StripeConfig::new("sk_live_supersecret"));
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("Live"));
    }
}
