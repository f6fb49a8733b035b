use axum::http::{HeaderName, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directive::{DirectiveValue, DirectiveWriter};
use crate::error::{ConfigurationError, Result};
use crate::handler::HeaderHandler;

/// Public-Key-Pins configuration
///
/// Supplying a non-empty `report_url` switches the header to
/// `Public-Key-Pins-Report-Only`; there is no separate report flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPinning {
    /// Base64 SPKI SHA-256 fingerprints, at least one
    pub keys: Vec<String>,

    /// Pin lifetime in seconds, must be non-zero
    pub max_age: u64,

    /// Emit `includeSubdomains`
    #[serde(default)]
    pub subdomains: bool,

    /// Violation report endpoint
    #[serde(default)]
    pub report_url: Option<String>,
}

impl KeyPinning {
    /// Create a new KeyPinning builder
    pub fn builder() -> KeyPinningBuilder {
        KeyPinningBuilder::new()
    }

    /// Read pinning settings from free-form configuration.
    ///
    /// Expects an object with `keys`, `maxAge`, and optionally `subdomains`
    /// and `reportUrl`. `maxAge` may be a number or a numeric string.
    pub fn from_value(value: &Value) -> Result<Self> {
        let options = match value {
            Value::Null => return Err(ConfigurationError::Missing("options")),
            Value::Object(options) => options,
            _ => return Err(ConfigurationError::invalid_type("options", "an object")),
        };

        let keys = match options.get("keys") {
            None | Some(Value::Null) => return Err(ConfigurationError::Missing("keys")),
            Some(Value::Array(keys)) => keys
                .iter()
                .map(|key| {
                    key.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ConfigurationError::invalid_type("keys", "an array of strings"))
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(ConfigurationError::invalid_type("keys", "an array")),
        };

        let max_age = match options.get("maxAge") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => 0,
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                        .map(|f| f as u64)
                })
                .ok_or_else(|| ConfigurationError::invalid_type("maxAge", "a positive integer"))?,
            Some(Value::String(s)) if s.trim().is_empty() => 0,
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| ConfigurationError::invalid_type("maxAge", "a positive integer"))?,
            Some(_) => return Err(ConfigurationError::invalid_type("maxAge", "a number")),
        };

        let subdomains = match options.get("subdomains") {
            None | Some(Value::Null) => false,
            Some(value) => DirectiveValue::from_json(value)?.is_truthy(),
        };

        let report_url = match options.get("reportUrl") {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) if url.is_empty() => None,
            Some(Value::String(url)) => Some(url.clone()),
            Some(_) => return Err(ConfigurationError::invalid_type("reportUrl", "a string")),
        };

        Ok(Self {
            keys,
            max_age,
            subdomains,
            report_url,
        })
    }

    /// Report endpoint, with an empty URL counted as absent
    pub fn report_uri(&self) -> Option<&str> {
        self.report_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Header these pins are written to
    pub fn header_name(&self) -> HeaderName {
        if self.report_uri().is_some() {
            header::PUBLIC_KEY_PINS_REPORT_ONLY
        } else {
            header::PUBLIC_KEY_PINS
        }
    }

    fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(ConfigurationError::Empty("keys"));
        }
        if self.max_age == 0 {
            return Err(ConfigurationError::Missing("maxAge"));
        }

        let quoted = self.keys.iter().map(String::as_str).chain(self.report_uri());
        for value in quoted {
            if value.contains('"') {
                return Err(ConfigurationError::invalid_header_value(
                    self.header_name().as_str(),
                    value,
                ));
            }
        }

        Ok(())
    }

    /// Serialized header value, e.g. `pin-sha256="AAA="; max-age=1000; `
    pub fn header_value(&self) -> Result<String> {
        self.validate()?;

        let mut writer = DirectiveWriter::new();
        for key in &self.keys {
            writer.assign_quoted("pin-sha256", key);
        }
        writer.assign("max-age", self.max_age);
        if self.subdomains {
            writer.flag("includeSubdomains");
        }
        if let Some(url) = self.report_uri() {
            writer.assign_quoted("report-uri", url);
        }

        Ok(writer.finish())
    }
}

/// Builder for KeyPinning
#[must_use = "builder does nothing until you call build()"]
pub struct KeyPinningBuilder {
    config: KeyPinning,
}

impl KeyPinningBuilder {
    pub fn new() -> Self {
        Self {
            config: KeyPinning::default(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.keys.push(key.into());
        self
    }

    pub fn keys(mut self, keys: Vec<String>) -> Self {
        self.config.keys = keys;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.config.max_age = seconds;
        self
    }

    pub fn subdomains(mut self, include: bool) -> Self {
        self.config.subdomains = include;
        self
    }

    pub fn report_url(mut self, url: impl Into<String>) -> Self {
        self.config.report_url = Some(url.into());
        self
    }

    pub fn build(self) -> KeyPinning {
        self.config
    }
}

impl Default for KeyPinningBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the Public-Key-Pins handler.
pub fn key_pinning(pins: &KeyPinning) -> Result<HeaderHandler> {
    let value = pins.header_value()?;
    let name = pins.header_name();
    let handler = HeaderHandler::set_all(std::slice::from_ref(&name), &value)?;
    tracing::debug!(header = %name, pins = pins.keys.len(), "compiled public key pins");
    Ok(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_pin() {
        let pins = KeyPinning::builder().key("AAA=").max_age(1000).build();
        let handler = key_pinning(&pins).unwrap();
        assert_eq!(
            handler.value("public-key-pins"),
            Some("pin-sha256=\"AAA=\"; max-age=1000; ")
        );
    }

    #[test]
    fn test_report_url_switches_to_report_only() {
        let pins = KeyPinning::builder()
            .key("AAA=")
            .key("BBB=")
            .max_age(1000)
            .subdomains(true)
            .report_url("r.com")
            .build();
        let handler = key_pinning(&pins).unwrap();
        assert!(handler.value("public-key-pins").is_none());
        assert_eq!(
            handler.value("public-key-pins-report-only"),
            Some("pin-sha256=\"AAA=\"; pin-sha256=\"BBB=\"; max-age=1000; includeSubdomains; report-uri=\"r.com\"; ")
        );
    }

    #[test]
    fn test_from_value_matches_builder() {
        let pins = KeyPinning::from_value(&json!({
            "keys": ["AAA=", "BBB="],
            "maxAge": 1000,
            "subdomains": true,
            "reportUrl": "r.com"
        }))
        .unwrap();
        let built = KeyPinning::builder()
            .keys(vec!["AAA=".into(), "BBB=".into()])
            .max_age(1000)
            .subdomains(true)
            .report_url("r.com")
            .build();
        assert_eq!(pins, built);
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert_eq!(
            KeyPinning::from_value(&json!({"keys": null, "maxAge": 1000})).unwrap_err(),
            ConfigurationError::Missing("keys")
        );
        assert!(matches!(
            KeyPinning::from_value(&json!({"keys": {}, "maxAge": 1000})).unwrap_err(),
            ConfigurationError::InvalidType { field: "keys", .. }
        ));

        let empty = KeyPinning::from_value(&json!({"keys": [], "maxAge": 1000})).unwrap();
        assert_eq!(key_pinning(&empty).unwrap_err(), ConfigurationError::Empty("keys"));
    }

    #[test]
    fn test_rejects_missing_max_age() {
        let pins = KeyPinning::from_value(&json!({"keys": ["AAA="]})).unwrap();
        assert_eq!(key_pinning(&pins).unwrap_err(), ConfigurationError::Missing("maxAge"));

        let pins = KeyPinning::builder().key("AAA=").build();
        assert!(key_pinning(&pins).is_err());
    }

    #[test]
    fn test_max_age_coercion() {
        let pins = KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": "15768000"})).unwrap();
        assert_eq!(pins.max_age, 15768000);

        assert!(KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": "soon"})).is_err());
        assert!(KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": -5})).is_err());
    }

    #[test]
    fn test_max_age_rejects_out_of_range_float() {
        assert!(matches!(
            KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": 1e30})),
            Err(ConfigurationError::InvalidType { field: "maxAge", .. })
        ));
        assert!(KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": 18446744073709551616.0})).is_err());

        let pins = KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": 600.0})).unwrap();
        assert_eq!(pins.max_age, 600);
    }

    #[test]
    fn test_empty_report_url_is_ignored_by_builder() {
        let pins = KeyPinning::builder().key("AAA=").max_age(10).report_url("").build();
        let handler = key_pinning(&pins).unwrap();
        assert!(handler.value("public-key-pins-report-only").is_none());
        assert_eq!(
            handler.value("public-key-pins"),
            Some("pin-sha256=\"AAA=\"; max-age=10; ")
        );
    }

    #[test]
    fn test_empty_report_url_is_ignored_by_from_value() {
        let pins = KeyPinning::from_value(&json!({"keys": ["AAA="], "maxAge": 10, "reportUrl": ""})).unwrap();
        let built = KeyPinning::builder().key("AAA=").max_age(10).report_url("").build();

        assert_eq!(pins.header_name(), built.header_name());
        assert_eq!(pins.header_value().unwrap(), built.header_value().unwrap());
        assert_eq!(
            key_pinning(&pins).unwrap().value("public-key-pins"),
            Some("pin-sha256=\"AAA=\"; max-age=10; ")
        );
    }

    #[test]
    fn test_rejects_quote_in_key() {
        let pins = KeyPinning::builder().key("AA\"A=").max_age(10).build();
        assert!(matches!(
            key_pinning(&pins),
            Err(ConfigurationError::InvalidHeaderValue { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let pins = KeyPinning::builder().key("AAA=").key("BBB=").max_age(60).build();
        assert_eq!(pins.header_value().unwrap(), pins.header_value().unwrap());
    }
}
