//! Installers for headers with a single fixed value.

use axum::http::header;

use crate::handler::{HeaderHandler, X_DOWNLOAD_OPTIONS, X_POWERED_BY};

/// Remove `X-Powered-By` from the response.
pub fn remove_powered_by() -> HeaderHandler {
    HeaderHandler::remove(X_POWERED_BY)
}

/// `X-Content-Type-Options: nosniff`
pub fn no_sniff() -> HeaderHandler {
    HeaderHandler::set_static(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
}

/// `X-Download-Options: noopen`
pub fn download_option() -> HeaderHandler {
    HeaderHandler::set_static(X_DOWNLOAD_OPTIONS, "noopen")
}

/// `X-XSS-Protection: 1; mode=block;`
pub fn xss_protect() -> HeaderHandler {
    HeaderHandler::set_static(header::X_XSS_PROTECTION, "1; mode=block;")
}

/// `Cache-Control: no-cache`
pub fn no_cache() -> HeaderHandler {
    HeaderHandler::set_static(header::CACHE_CONTROL, "no-cache")
}
