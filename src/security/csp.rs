use axum::http::{HeaderName, header};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::directive::{DirectiveTable, DirectiveValue};
use crate::error::{ConfigurationError, Result};
use crate::handler::HeaderHandler;

/// Meta-key selecting report-only mode; never emitted as a directive.
const REPORT_KEY: &str = "report";

/// Content-Security-Policy configuration
///
/// Directive names may be given word-joined (`connectSrc`) or dash-cased
/// (`connect-src`); they are normalized when the header is compiled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentSecurityPolicy {
    /// Emit `Content-Security-Policy-Report-Only` instead of enforcing
    #[serde(default)]
    pub report: bool,

    /// Directives in the order they should appear in the header
    #[serde(flatten)]
    pub directives: IndexMap<String, DirectiveValue>,
}

impl ContentSecurityPolicy {
    /// Create a new ContentSecurityPolicy builder
    pub fn builder() -> ContentSecurityPolicyBuilder {
        ContentSecurityPolicyBuilder::new()
    }

    /// Read a policy from free-form configuration.
    ///
    /// The value must be a JSON object. A truthy `report` key selects
    /// report-only mode; every other key is a directive.
    pub fn from_value(value: &Value) -> Result<Self> {
        let options = match value {
            Value::Null => return Err(ConfigurationError::Missing("options")),
            Value::Object(options) => options,
            _ => return Err(ConfigurationError::invalid_type("options", "an object")),
        };

        let mut policy = Self::default();
        for (key, value) in options {
            if key == REPORT_KEY {
                policy.report = !value.is_null() && DirectiveValue::from_json(value)?.is_truthy();
                continue;
            }
            policy
                .directives
                .entry(key.clone())
                .or_insert(DirectiveValue::from_json(value)?);
        }

        Ok(policy)
    }

    /// Header this policy is written to
    pub fn header_name(&self) -> HeaderName {
        if self.report {
            header::CONTENT_SECURITY_POLICY_REPORT_ONLY
        } else {
            header::CONTENT_SECURITY_POLICY
        }
    }

    /// Normalized, ordered directives
    pub fn directive_table(&self) -> DirectiveTable {
        self.directives
            .iter()
            .filter(|(name, _)| name.as_str() != REPORT_KEY)
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect()
    }

    /// Serialized header value, e.g. `connect-src 'self' https:; `
    pub fn header_value(&self) -> String {
        self.directive_table().serialize()
    }
}

/// Builder for ContentSecurityPolicy
#[must_use = "builder does nothing until you call build()"]
pub struct ContentSecurityPolicyBuilder {
    policy: ContentSecurityPolicy,
}

impl ContentSecurityPolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy: ContentSecurityPolicy::default(),
        }
    }

    /// Add a directive. The first value given for a name is kept.
    pub fn directive(mut self, name: impl Into<String>, value: impl Into<DirectiveValue>) -> Self {
        self.policy
            .directives
            .entry(name.into())
            .or_insert_with(|| value.into());
        self
    }

    pub fn report(mut self, report: bool) -> Self {
        self.policy.report = report;
        self
    }

    pub fn build(self) -> ContentSecurityPolicy {
        self.policy
    }
}

impl Default for ContentSecurityPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the Content-Security-Policy handler.
///
/// The header is `Content-Security-Policy-Report-Only` when `policy.report`
/// is set, `Content-Security-Policy` otherwise.
pub fn content_security(policy: &ContentSecurityPolicy) -> Result<HeaderHandler> {
    let name = policy.header_name();
    let value = policy.header_value();
    let handler = HeaderHandler::set_all(std::slice::from_ref(&name), &value)?;
    tracing::debug!(header = %name, value = %value, "compiled content security policy");
    Ok(handler)
}
