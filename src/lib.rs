//! Hardhat - response-header hardening for Axum and Tower
//!
//! Hardhat compiles security-header configuration into reusable handlers.
//! Every builder validates its input once, at setup time, and returns a
//! [`HeaderHandler`] whose header value is fixed for its whole lifetime.
//! Handlers are plain tower layers, so they slot into any Axum router.
//!
//! # Headers
//!
//! - **Fixed**: `X-Powered-By` removal, `X-Content-Type-Options`,
//!   `X-Download-Options`, `X-XSS-Protection`, `Cache-Control`
//! - **Framing**: `X-Frame-Options` and `Frame-Options`
//! - **Transport**: `Strict-Transport-Security`
//! - **Policies**: `Content-Security-Policy[-Report-Only]` and
//!   `Public-Key-Pins[-Report-Only]`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use hardhat::{ContentSecurityPolicy, HardeningConfig};
//!
//! # fn main() -> hardhat::Result<()> {
//! let csp = ContentSecurityPolicy::builder()
//!     .directive("defaultSrc", ["self"])
//!     .directive("imgSrc", ["self", "data:"])
//!     .build();
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(hardhat::content_security(&csp)?)
//!     .layer(hardhat::all(&HardeningConfig::from_env())?);
//! # Ok(())
//! # }
//! ```

pub mod directive;
mod error;
pub mod handler;
pub mod pipeline;
pub mod security;
mod utils;

pub use directive::{DirectiveTable, DirectiveValue, dash_case};
pub use error::{ConfigurationError, Result};
pub use handler::{HeaderAction, HeaderHandler, HeaderHandlerService};
pub use pipeline::{HeaderChain, Pipeline, all, install};
pub use security::{
    ContentSecurityPolicy, ContentSecurityPolicyBuilder, FrameOption, FrameOptionConfig,
    HardeningConfig, HardeningConfigBuilder, KeyPinning, KeyPinningBuilder,
    TransportSecurityConfig, content_security, download_option, frame_option, key_pinning,
    no_cache, no_sniff, remove_powered_by, transport_security, xss_protect,
};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// Builders log the header values they compile at `debug` level, which is
/// handy when checking a policy at startup.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "hardhat=debug")
/// - `HARDHAT_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = utils::get_env_with_prefix("LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
