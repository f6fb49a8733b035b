use axum::http::HeaderMap;

use super::Pipeline;
use crate::handler::{HeaderHandler, HeaderHandlerService};

/// Ordered list of handlers applied one after another
#[derive(Debug, Clone, Default)]
pub struct HeaderChain {
    handlers: Vec<HeaderHandler>,
}

impl HeaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler, builder style
    pub fn with(mut self, handler: HeaderHandler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn handlers(&self) -> &[HeaderHandler] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Apply every handler in registration order
    pub fn apply(&self, headers: &mut HeaderMap) {
        for handler in &self.handlers {
            handler.apply(headers);
        }
    }

    /// Collapse the chain into a single handler with the same effect.
    pub fn to_handler(&self) -> HeaderHandler {
        HeaderHandler::new(
            self.handlers
                .iter()
                .flat_map(|handler| handler.actions().iter().cloned())
                .collect(),
        )
    }
}

impl Pipeline for HeaderChain {
    fn use_handler(&mut self, handler: HeaderHandler) {
        self.handlers.push(handler);
    }
}

impl FromIterator<HeaderHandler> for HeaderChain {
    fn from_iter<I: IntoIterator<Item = HeaderHandler>>(iter: I) -> Self {
        Self {
            handlers: iter.into_iter().collect(),
        }
    }
}

impl<S> tower::Layer<S> for HeaderChain {
    type Service = HeaderHandlerService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        tower::Layer::layer(&self.to_handler(), inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::{no_cache, no_sniff, remove_powered_by};
    use axum::http::HeaderValue;

    #[test]
    fn test_later_handlers_win() {
        let chain = HeaderChain::new()
            .with(no_cache())
            .with(HeaderHandler::set_static(
                axum::http::header::CACHE_CONTROL,
                "no-store",
            ));

        let mut headers = HeaderMap::new();
        chain.apply(&mut headers);
        assert_eq!(headers.get("cache-control").unwrap(), "no-store");
    }

    #[test]
    fn test_collapsed_handler_matches_chain() {
        let chain: HeaderChain = [remove_powered_by(), no_sniff(), no_cache()]
            .into_iter()
            .collect();

        let mut via_chain = HeaderMap::new();
        via_chain.insert("x-powered-by", HeaderValue::from_static("a"));
        let mut via_handler = via_chain.clone();

        chain.apply(&mut via_chain);
        chain.to_handler().apply(&mut via_handler);

        assert_eq!(via_chain, via_handler);
        assert_eq!(chain.to_handler().actions().len(), 3);
    }

    #[test]
    fn test_use_handler_appends() {
        let mut chain = HeaderChain::new();
        assert!(chain.is_empty());
        chain.use_handler(no_sniff());
        chain.use_handler(no_cache());
        assert_eq!(chain.len(), 2);
    }
}
