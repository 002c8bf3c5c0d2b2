//! # Request Types
//!
//! Request-scoped payment types for intent-relay. Nothing here is persisted.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Currency used when the caller does not supply one (ISO 4217, lowercase)
pub const DEFAULT_CURRENCY: &str = "eur";

/// Placeholder client secret returned while no processor is configured
pub const MOCK_CLIENT_SECRET: &str = "pi_mock1234567890_secret_abcdefghijklmnop";

/// Explanation attached to mock results
pub const MOCK_MESSAGE: &str =
    "Payment processor not configured; returning a mock client secret for testing";

/// Convert a major-unit amount to the processor's smallest currency unit.
///
/// Rounds half away from zero, so `19.99` becomes `1999` even though the
/// floating point product is `1998.9999999999998`.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// A payment request as sent by the browser client
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRequest {
    /// Amount in major currency units. `None` when missing or not a number.
    #[serde(default, deserialize_with = "amount_value")]
    pub amount: Option<f64>,

    /// ISO 4217 currency code, passed through unchanged
    #[serde(default = "default_currency", deserialize_with = "currency_value")]
    pub currency: String,

    /// Custom metadata forwarded to the processor
    #[serde(default, deserialize_with = "metadata_values")]
    pub metadata: HashMap<String, String>,
}

impl PaymentRequest {
    /// Create a request for `amount` with default currency and no metadata
    pub fn new(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            currency: DEFAULT_CURRENCY.to_string(),
            metadata: HashMap::new(),
        }
    }

    /// Builder: set currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Builder: add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The amount, if it is present and strictly positive
    pub fn valid_amount(&self) -> Option<f64> {
        self.amount.filter(|a| *a > 0.0)
    }
}

/// Result of a successful payment intent creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResult {
    /// Opaque token the browser uses to confirm the payment
    pub client_secret: String,

    /// Only present for mock results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PaymentIntentResult {
    pub fn new(client_secret: impl Into<String>) -> Self {
        Self {
            client_secret: client_secret.into(),
            message: None,
        }
    }

    /// The fixed result returned in mock mode
    pub fn mock() -> Self {
        Self {
            client_secret: MOCK_CLIENT_SECRET.to_string(),
            message: Some(MOCK_MESSAGE.to_string()),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.message.is_some() && self.client_secret == MOCK_CLIENT_SECRET
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn amount_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn currency_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let currency = Option::<String>::deserialize(deserializer)?;
    Ok(currency.unwrap_or_else(default_currency))
}

/// Processor metadata is string-valued: scalars are stringified, nulls dropped.
fn metadata_values<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Map<String, Value>>::deserialize(deserializer)?;
    let mut metadata = HashMap::new();

    for (key, value) in raw.unwrap_or_default() {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(de::Error::custom(format!(
                    "metadata value for '{}' must be a string, number or boolean",
                    key
                )));
            }
        };
        metadata.insert(key, value);
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<PaymentRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn test_defaults_applied() {
        let request = parse(json!({ "amount": 19.99 })).unwrap();

        assert_eq!(request.amount, Some(19.99));
        assert_eq!(request.currency, "eur");
        assert!(request.metadata.is_empty());
    }

    #[test]
    fn test_currency_passed_through_unchanged() {
        let request = parse(json!({ "amount": 5, "currency": "USD" })).unwrap();
        assert_eq!(request.currency, "USD");

        let request = parse(json!({ "amount": 5, "currency": null })).unwrap();
        assert_eq!(request.currency, "eur");
    }

    #[test]
    fn test_missing_or_non_numeric_amount() {
        assert_eq!(parse(json!({})).unwrap().amount, None);
        assert_eq!(parse(json!({ "amount": null })).unwrap().amount, None);
        assert_eq!(parse(json!({ "amount": "12.50" })).unwrap().amount, None);
    }

    #[test]
    fn test_valid_amount() {
        assert_eq!(PaymentRequest::new(1.5).valid_amount(), Some(1.5));
        assert_eq!(PaymentRequest::new(0.0).valid_amount(), None);
        assert_eq!(PaymentRequest::new(-5.0).valid_amount(), None);
        assert_eq!(PaymentRequest::new(f64::NAN).valid_amount(), None);
    }

    #[test]
    fn test_metadata_scalars_stringified() {
        let request = parse(json!({
            "amount": 10,
            "metadata": {
                "order_id": "A-17",
                "quantity": 3,
                "gift": true,
                "note": null
            }
        }))
        .unwrap();

        assert_eq!(request.metadata.get("order_id").map(String::as_str), Some("A-17"));
        assert_eq!(request.metadata.get("quantity").map(String::as_str), Some("3"));
        assert_eq!(request.metadata.get("gift").map(String::as_str), Some("true"));
        assert!(!request.metadata.contains_key("note"));
    }

    #[test]
    fn test_nested_metadata_rejected() {
        let result = parse(json!({ "amount": 10, "metadata": { "cart": { "items": 2 } } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(19.99), 1999);
        assert_eq!(to_minor_units(1.0), 100);
        assert_eq!(to_minor_units(0.29), 29);
        assert_eq!(to_minor_units(1234.56), 123456);
        // half away from zero
        assert_eq!(to_minor_units(0.125), 13);
    }

    #[test]
    fn test_mock_result_serialization() {
        let value = serde_json::to_value(PaymentIntentResult::mock()).unwrap();
        assert_eq!(value["clientSecret"], MOCK_CLIENT_SECRET);
        assert!(value["message"].is_string());

        let value = serde_json::to_value(PaymentIntentResult::new("pi_1_secret_2")).unwrap();
        assert_eq!(value, json!({ "clientSecret": "pi_1_secret_2" }));
    }
}
