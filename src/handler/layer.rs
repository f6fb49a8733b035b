use super::HeaderHandler;
use axum::http::{Request, Response};
use futures::future::BoxFuture;
use tower::Service;

impl<S> tower::Layer<S> for HeaderHandler {
    type Service = HeaderHandlerService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HeaderHandlerService {
            inner,
            handler: self.clone(),
        }
    }
}

/// Tower service that applies a [`HeaderHandler`] to every response
#[derive(Debug, Clone)]
pub struct HeaderHandlerService<S> {
    inner: S,
    handler: HeaderHandler,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HeaderHandlerService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let handler = self.handler.clone();
        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.await?;
            handler.apply(response.headers_mut());
            Ok(response)
        })
    }
}
