//! Precompiled response-header handlers.
//!
//! A [`HeaderHandler`] is the output of every builder in this crate. It owns
//! a fixed list of header mutations computed once at setup time and applies
//! them to each outgoing response, either directly through
//! [`HeaderHandler::apply`] or as a tower [`Layer`](tower::Layer).

mod layer;

pub use layer::HeaderHandlerService;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;

use crate::error::{ConfigurationError, Result};

pub const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");
pub const FRAME_OPTIONS: HeaderName = HeaderName::from_static("frame-options");
pub const X_DOWNLOAD_OPTIONS: HeaderName = HeaderName::from_static("x-download-options");

/// A single mutation of the response header map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderAction {
    /// Insert the header, replacing any existing values
    Set(HeaderName, HeaderValue),
    /// Remove every value of the header; absent headers are not an error
    Remove(HeaderName),
}

impl HeaderAction {
    fn apply(&self, headers: &mut HeaderMap) {
        match self {
            Self::Set(name, value) => {
                headers.insert(name.clone(), value.clone());
            }
            Self::Remove(name) => {
                headers.remove(name);
            }
        }
    }
}

/// Reusable handler bound to a fixed set of header mutations.
///
/// Cloning is cheap; all clones share the same compiled actions.
#[derive(Debug, Clone)]
pub struct HeaderHandler {
    actions: Arc<[HeaderAction]>,
}

impl HeaderHandler {
    pub(crate) fn new(actions: Vec<HeaderAction>) -> Self {
        Self {
            actions: actions.into(),
        }
    }

    pub(crate) fn set_static(name: HeaderName, value: &'static str) -> Self {
        Self::new(vec![HeaderAction::Set(name, HeaderValue::from_static(value))])
    }

    pub(crate) fn remove(name: HeaderName) -> Self {
        Self::new(vec![HeaderAction::Remove(name)])
    }

    pub(crate) fn set(name: HeaderName, value: HeaderValue) -> Self {
        Self::new(vec![HeaderAction::Set(name, value)])
    }

    /// Set every header in `names` to the same compiled `value`.
    pub(crate) fn set_all(names: &[HeaderName], value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value).map_err(|_| {
            let header = names.first().map_or("", HeaderName::as_str);
            ConfigurationError::invalid_header_value(header, value)
        })?;
        Ok(Self::new(
            names
                .iter()
                .map(|name| HeaderAction::Set(name.clone(), value.clone()))
                .collect(),
        ))
    }

    pub fn actions(&self) -> &[HeaderAction] {
        &self.actions
    }

    /// The value this handler writes for `name`, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.actions.iter().find_map(|action| match action {
            HeaderAction::Set(header, value) if header.as_str().eq_ignore_ascii_case(name) => {
                value.to_str().ok()
            }
            _ => None,
        })
    }

    /// Apply every action, in order, to a response header map.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for action in self.actions.iter() {
            action.apply(headers);
        }
    }
}
