//! Composing handlers into a pipeline.
//!
//! [`Pipeline`] is the only thing the composite installer needs from a host:
//! somewhere to `use` a handler. [`HeaderChain`] is the in-crate
//! implementation and doubles as a tower layer.

mod chain;

pub use chain::HeaderChain;

use crate::error::Result;
use crate::handler::HeaderHandler;
use crate::security::{
    HardeningConfig, download_option, no_sniff, remove_powered_by, xss_protect,
};

/// Host pipeline that handlers are registered with, in call order.
pub trait Pipeline {
    fn use_handler(&mut self, handler: HeaderHandler);
}

impl Pipeline for Vec<HeaderHandler> {
    fn use_handler(&mut self, handler: HeaderHandler) {
        self.push(handler);
    }
}

/// Register the default hardening handlers with `pipeline`.
///
/// Order: remove-powered-by, no-sniff, download-option, xss-protect,
/// frame-option, transport-security. Content-Security-Policy and key pinning
/// are never part of the defaults. Configuration is validated before the
/// first handler is registered, so a failed call leaves `pipeline` untouched.
pub fn install<P>(config: &HardeningConfig, pipeline: &mut P) -> Result<()>
where
    P: Pipeline + ?Sized,
{
    let frame = config.frame_option.handler()?;
    let transport = config.transport_security.handler();

    for handler in [
        remove_powered_by(),
        no_sniff(),
        download_option(),
        xss_protect(),
        frame,
        transport,
    ] {
        pipeline.use_handler(handler);
    }

    tracing::debug!("installed default hardening headers");
    Ok(())
}

/// Build the default hardening chain.
pub fn all(config: &HardeningConfig) -> Result<HeaderChain> {
    let mut chain = HeaderChain::new();
    install(config, &mut chain)?;
    Ok(chain)
}
