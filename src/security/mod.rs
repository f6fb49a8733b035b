//! Header builders, one per header family.
//!
//! Each builder validates its configuration once and returns a
//! [`HeaderHandler`](crate::HeaderHandler) with the header value already
//! compiled. Invalid configuration is reported as a
//! [`ConfigurationError`](crate::ConfigurationError) before any request is
//! served.

mod basic;
mod config;
mod csp;
mod frame;
mod pinning;
mod transport;

pub use basic::{download_option, no_cache, no_sniff, remove_powered_by, xss_protect};
pub use config::{FrameOptionConfig, HardeningConfig, HardeningConfigBuilder, TransportSecurityConfig};
pub use csp::{ContentSecurityPolicy, ContentSecurityPolicyBuilder, content_security};
pub use frame::{FrameOption, frame_option};
pub use pinning::{KeyPinning, KeyPinningBuilder, key_pinning};
pub use transport::{DEFAULT_HSTS_SECONDS, transport_security};
