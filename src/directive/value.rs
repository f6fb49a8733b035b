use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::borrow::Cow;

use crate::error::{ConfigurationError, Result};

/// Source keywords that must appear single-quoted inside a directive.
pub const QUOTED_KEYWORDS: [&str; 4] = ["none", "self", "unsafe-inline", "unsafe-eval"];

/// Value of a single policy directive as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    Flag(bool),
    Number(Number),
    Text(String),
    List(#[serde(deserialize_with = "list_elements")] Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListElement {
    Text(String),
    Number(Number),
}

/// List elements may be strings or numbers; numbers render as their text.
fn list_elements<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<ListElement>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            ListElement::Text(text) => text,
            ListElement::Number(number) => number.to_string(),
        })
        .collect())
}

impl DirectiveValue {
    /// Convert a free-form JSON value, rejecting shapes that have no header rendering.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(flag) => Ok(Self::Flag(*flag)),
            Value::Number(number) => Ok(Self::Number(number.clone())),
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text.clone()),
                    Value::Number(number) => Ok(number.to_string()),
                    _ => Err(ConfigurationError::invalid_type(
                        "directive list element",
                        "a string or number",
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            Value::Null => Err(ConfigurationError::Missing("directive value")),
            Value::Object(_) => Err(ConfigurationError::invalid_type(
                "directive value",
                "a string, number, boolean or list",
            )),
        }
    }

    /// Whether the value counts as "on" for switch-like directives.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Self::Text(text) => !text.is_empty(),
            Self::List(_) => true,
        }
    }

    /// Render the value fragment that follows the directive name.
    ///
    /// List elements are joined by a single space and reserved keywords are
    /// single-quoted. Scalars render verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Flag(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
            Self::List(items) => items
                .iter()
                .map(|item| quote_keyword(item))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Wrap a reserved source keyword in single quotes, leave anything else alone.
pub fn quote_keyword(source: &str) -> Cow<'_, str> {
    if QUOTED_KEYWORDS.contains(&source) {
        Cow::Owned(format!("'{}'", source))
    } else {
        Cow::Borrowed(source)
    }
}

impl From<bool> for DirectiveValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<u64> for DirectiveValue {
    fn from(number: u64) -> Self {
        Self::Number(number.into())
    }
}

impl From<i64> for DirectiveValue {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

impl From<&str> for DirectiveValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DirectiveValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for DirectiveValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for DirectiveValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DirectiveValue {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.iter().map(|item| item.to_string()).collect())
    }
}
