use axum::http::header;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigurationError, Result};
use crate::handler::{FRAME_OPTIONS, HeaderHandler};

/// Value of the `X-Frame-Options` / `Frame-Options` headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameOption {
    Deny,
    #[default]
    SameOrigin,
    AllowFrom,
    AllowAll,
}

impl FrameOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deny => "deny",
            Self::SameOrigin => "sameorigin",
            Self::AllowFrom => "allow-from",
            Self::AllowAll => "allowall",
        }
    }
}

impl fmt::Display for FrameOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameOption {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deny" => Ok(Self::Deny),
            "sameorigin" => Ok(Self::SameOrigin),
            "allow-from" => Ok(Self::AllowFrom),
            "allowall" => Ok(Self::AllowAll),
            other => Err(ConfigurationError::UnknownOption(other.to_string())),
        }
    }
}

/// Build a handler that sets both `X-Frame-Options` and `Frame-Options`.
///
/// `option` defaults to `sameorigin` when absent or empty. `allowed` is
/// required, and only read, when the option is `allow-from`.
pub fn frame_option(option: Option<&str>, allowed: Option<&str>) -> Result<HeaderHandler> {
    let option = match option.filter(|o| !o.is_empty()) {
        Some(raw) => raw.parse::<FrameOption>()?,
        None => FrameOption::default(),
    };

    let value = match option {
        FrameOption::AllowFrom => {
            let allowed = allowed.ok_or(ConfigurationError::MissingDependent {
                field: "allowed",
                option: "allow-from",
            })?;
            format!("{} {}", option, allowed)
        }
        _ => option.to_string(),
    };

    let handler = HeaderHandler::set_all(&[header::X_FRAME_OPTIONS, FRAME_OPTIONS], &value)?;
    tracing::debug!(header = "X-Frame-Options", value = %value, "compiled frame options");
    Ok(handler)
}
