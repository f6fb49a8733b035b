/// Errors raised while compiling header configuration into a handler.
///
/// Every variant is produced at setup time. A handler that was built
/// successfully never fails while a request is being served.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A required argument was null or absent
    #[error("{0} can not be null")]
    Missing(&'static str),

    /// An argument had the wrong shape
    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("option can only be deny, sameorigin, allow-from or allowall")]
    UnknownOption(String),

    /// An argument that is only required by some other setting was missing
    #[error("{field} must be a string when option is {option}")]
    MissingDependent {
        field: &'static str,
        option: &'static str,
    },

    #[error("{0} must contain at least one element")]
    Empty(&'static str),

    #[error("invalid value for {header}: {value:?}")]
    InvalidHeaderValue { header: String, value: String },
}

impl ConfigurationError {
    pub(crate) fn invalid_type(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidType { field, expected }
    }

    pub(crate) fn invalid_header_value(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHeaderValue {
            header: header.into(),
            value: value.into(),
        }
    }
}

/// Result alias for header builders
pub type Result<T, E = ConfigurationError> = std::result::Result<T, E>;
