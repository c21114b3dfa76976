//! Request log ID middleware.
//!
//! Ensures every inbound request carries an `X-AppEngine-Request-Log-Id`
//! header before translation, so the translator always populates the
//! `request_log_id` field. Edge-supplied values are preserved.

use axum::http::{HeaderName, HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::http::headers;

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogIdLayer;

impl<S> Layer<S> for RequestLogIdLayer {
    type Service = RequestLogIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestLogIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestLogIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let name = HeaderName::from_static(headers::REQUEST_LOG_ID);
        if !req.headers().contains_key(&name) {
            let id = Uuid::new_v4().simple().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(name, value);
            }
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Response;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn echo_log_id(req: Request<Body>) -> Result<Response<Body>, Infallible> {
        let id = req
            .headers()
            .get(headers::REQUEST_LOG_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        Ok(Response::new(Body::from(id)))
    }

    #[tokio::test]
    async fn stamps_missing_log_id() {
        let svc = RequestLogIdLayer.layer(service_fn(echo_log_id));
        let req = Request::builder().body(Body::empty()).unwrap();
        let resp = svc.oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(bytes.len(), 32, "expected a simple-format uuid");
    }

    #[tokio::test]
    async fn preserves_edge_supplied_log_id() {
        let svc = RequestLogIdLayer.layer(service_fn(echo_log_id));
        let req = Request::builder()
            .header(headers::REQUEST_LOG_ID, "edge-id")
            .body(Body::empty())
            .unwrap();
        let resp = svc.oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"edge-id");
    }
}
