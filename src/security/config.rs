use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::frame::frame_option;
use super::transport::transport_security;
use crate::directive::DirectiveValue;
use crate::error::{ConfigurationError, Result};
use crate::handler::HeaderHandler;
use crate::utils::get_env_with_prefix;

/// Frame options sub-configuration
///
/// Deserializes from either a bare option string (`"deny"`) or an object
/// with `option` and `allowed`. `null` leaves the default `sameorigin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "FrameOptionRepr")]
pub struct FrameOptionConfig {
    /// One of deny, sameorigin, allow-from, allowall (default sameorigin)
    pub option: Option<String>,

    /// Origin allowed to frame the page when option is allow-from
    pub allowed: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameOptionRepr {
    Bare(String),
    Full {
        #[serde(default)]
        option: Option<String>,
        #[serde(default)]
        allowed: Option<String>,
    },
    Unset,
}

impl From<FrameOptionRepr> for FrameOptionConfig {
    fn from(repr: FrameOptionRepr) -> Self {
        match repr {
            FrameOptionRepr::Bare(option) => Self {
                option: Some(option),
                allowed: None,
            },
            FrameOptionRepr::Full { option, allowed } => Self { option, allowed },
            FrameOptionRepr::Unset => Self::default(),
        }
    }
}

impl FrameOptionConfig {
    pub fn handler(&self) -> Result<HeaderHandler> {
        frame_option(self.option.as_deref(), self.allowed.as_deref())
    }
}

/// Strict-Transport-Security sub-configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSecurityConfig {
    /// max-age in seconds; absent or zero means one year
    #[serde(default)]
    pub seconds: Option<u64>,

    /// Append includeSubDomains; absent or null means true, other falsy values false
    #[serde(default, alias = "hasSubdomains", deserialize_with = "loose_flag")]
    pub with_subdomains: Option<bool>,
}

fn loose_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => DirectiveValue::from_json(&value)
            .map(|value| Some(value.is_truthy()))
            .map_err(serde::de::Error::custom),
    }
}

impl TransportSecurityConfig {
    pub fn handler(&self) -> HeaderHandler {
        transport_security(self.seconds, self.with_subdomains)
    }
}

/// Configuration for the default hardening chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardeningConfig {
    #[serde(default)]
    pub frame_option: FrameOptionConfig,

    #[serde(default)]
    pub transport_security: TransportSecurityConfig,
}

impl HardeningConfig {
    /// Create a new HardeningConfig builder
    pub fn builder() -> HardeningConfigBuilder {
        HardeningConfigBuilder::new()
    }

    /// Read the configuration from a free-form value; `null` is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Err(ConfigurationError::Missing("options")),
            Value::Object(_) => serde_json::from_value(value.clone()).map_err(|err| {
                tracing::debug!(error = %err, "rejected hardening configuration");
                ConfigurationError::invalid_type("options", "a hardening configuration object")
            }),
            _ => Err(ConfigurationError::invalid_type("options", "an object")),
        }
    }

    /// Load hardening configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(option) = get_env_with_prefix("FRAME_OPTION") {
            config.frame_option.option = Some(option.trim().to_lowercase());
        }

        if let Some(allowed) = get_env_with_prefix("FRAME_ALLOWED") {
            config.frame_option.allowed = Some(allowed);
        }

        if let Some(seconds) = get_env_with_prefix("HSTS_SECONDS") {
            if let Ok(s) = seconds.parse() {
                config.transport_security.seconds = Some(s);
            }
        }

        if let Some(include) = get_env_with_prefix("HSTS_INCLUDE_SUBDOMAINS") {
            config.transport_security.with_subdomains = include.parse().ok();
        }

        config
    }
}

/// Builder for HardeningConfig
#[must_use = "builder does nothing until you call build()"]
pub struct HardeningConfigBuilder {
    config: HardeningConfig,
}

impl HardeningConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: HardeningConfig::default(),
        }
    }

    pub fn frame_option(mut self, option: impl Into<String>) -> Self {
        self.config.frame_option.option = Some(option.into());
        self
    }

    pub fn deny_framing(self) -> Self {
        self.frame_option("deny")
    }

    pub fn allow_framing_from(mut self, origin: impl Into<String>) -> Self {
        self.config.frame_option.option = Some("allow-from".to_string());
        self.config.frame_option.allowed = Some(origin.into());
        self
    }

    pub fn hsts_seconds(mut self, seconds: u64) -> Self {
        self.config.transport_security.seconds = Some(seconds);
        self
    }

    pub fn hsts_include_subdomains(mut self, include: bool) -> Self {
        self.config.transport_security.with_subdomains = Some(include);
        self
    }

    pub fn build(self) -> HardeningConfig {
        self.config
    }
}

impl Default for HardeningConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
