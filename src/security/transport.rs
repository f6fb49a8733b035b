use axum::http::{HeaderValue, header};

use crate::handler::HeaderHandler;

/// One year, in seconds
pub const DEFAULT_HSTS_SECONDS: u64 = 31_536_000;

const DEFAULT_HSTS_VALUE: &str = "max-age=31536000; includeSubDomains;";

/// Build the `Strict-Transport-Security` handler.
///
/// `seconds` falls back to one year when absent or zero. `with_subdomains`
/// defaults to `true` and appends `; includeSubDomains;` to the value.
pub fn transport_security(seconds: Option<u64>, with_subdomains: Option<bool>) -> HeaderHandler {
    let value = hsts_value(seconds, with_subdomains);
    tracing::debug!(header = "Strict-Transport-Security", value = %value, "compiled transport security");

    // digits and fixed ASCII literals always form a valid header value
    let value = HeaderValue::from_str(&value)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_HSTS_VALUE));
    HeaderHandler::set(header::STRICT_TRANSPORT_SECURITY, value)
}

fn hsts_value(seconds: Option<u64>, with_subdomains: Option<bool>) -> String {
    let seconds = seconds.filter(|s| *s > 0).unwrap_or(DEFAULT_HSTS_SECONDS);
    let mut value = format!("max-age={}", seconds);
    if with_subdomains.unwrap_or(true) {
        value.push_str("; includeSubDomains;");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let handler = transport_security(None, None);
        assert_eq!(
            handler.value("strict-transport-security"),
            Some("max-age=31536000; includeSubDomains;")
        );
    }

    #[test]
    fn test_default_value_matches_default_inputs() {
        assert_eq!(hsts_value(None, None), DEFAULT_HSTS_VALUE);
    }

    #[test]
    fn test_largest_max_age_still_sets_header() {
        let handler = transport_security(Some(u64::MAX), Some(false));
        assert_eq!(handler.actions().len(), 1);
        assert_eq!(
            handler.value("strict-transport-security"),
            Some("max-age=18446744073709551615")
        );
    }

    #[test]
    fn test_zero_seconds_uses_default() {
        assert_eq!(hsts_value(Some(0), Some(false)), "max-age=31536000");
    }

    #[test]
    fn test_custom_seconds_default_subdomains() {
        assert_eq!(hsts_value(Some(20000), None), "max-age=20000; includeSubDomains;");
    }

    #[test]
    fn test_subdomains_disabled() {
        let handler = transport_security(Some(20000), Some(false));
        assert_eq!(handler.value("strict-transport-security"), Some("max-age=20000"));
    }

    #[test]
    fn test_subdomains_enabled() {
        let handler = transport_security(Some(20000), Some(true));
        assert_eq!(
            handler.value("strict-transport-security"),
            Some("max-age=20000; includeSubDomains;")
        );
    }
}
