//! The asynchronous delivery path to the runtime backend.
//!
//! A transport receives a call and a [`Completion`], performs the delivery
//! from its own task, and signals the outcome exactly once. The completion's
//! move semantics enforce the single-result, at-most-once contract; dropping
//! it without completing surfaces as a transport failure at the receiver.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::dispatch::call::CallContext;
use crate::protocol::{EvaluateCall, EvaluateReply, InternalResponse};

/// Transport-level failures: the runtime was unreachable or spoke the
/// protocol wrong. Application errors are not transport failures; they
/// arrive as [`EvaluateReply::AppError`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode call: {0}")]
    Encode(String),
    #[error("runtime unreachable: {0}")]
    Unreachable(String),
    #[error("runtime returned HTTP {0}")]
    BadStatus(u16),
    #[error("malformed runtime reply: {0}")]
    BadReply(String),
    #[error("call abandoned without a result")]
    Abandoned,
}

/// Outcome of one delivery attempt.
pub type CallResult = Result<EvaluateReply, TransportError>;

/// Write-once completion handle for a single call.
pub struct Completion {
    tx: oneshot::Sender<CallResult>,
}

impl Completion {
    pub fn new() -> (Self, oneshot::Receiver<CallResult>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Signal a normal runtime response.
    pub fn succeed(self, response: InternalResponse) {
        self.complete(Ok(EvaluateReply::Response(response)));
    }

    /// Signal an application-level error with a code callers can branch on.
    pub fn app_error(self, code: i32, detail: String) {
        self.complete(Ok(EvaluateReply::AppError { code, detail }));
    }

    /// Signal a transport failure.
    pub fn fail(self, error: TransportError) {
        self.complete(Err(error));
    }

    pub fn complete(self, result: CallResult) {
        // The receiver may already have given up on its deadline.
        let _ = self.tx.send(result);
    }
}

/// Delivery of calls to the runtime's evaluation service.
///
/// `submit` is fire-and-forget: the transport must signal the completion
/// exactly once from an async task and must never block the caller.
pub trait EvaluationTransport: Send + Sync + 'static {
    fn submit(&self, ctx: &CallContext, call: EvaluateCall, completion: Completion);
}

/// HTTP transport: POSTs the JSON call envelope to the runtime endpoint.
pub struct HttpTransport {
    client: Client<HttpConnector, Body>,
    evaluate_url: Uri,
}

impl HttpTransport {
    pub fn new(client: Client<HttpConnector, Body>, evaluate_url: Uri) -> Self {
        Self {
            client,
            evaluate_url,
        }
    }

    async fn evaluate(
        client: Client<HttpConnector, Body>,
        url: Uri,
        call: EvaluateCall,
    ) -> CallResult {
        let payload =
            serde_json::to_vec(&call).map_err(|e| TransportError::Encode(e.to_string()))?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .map_err(|e| TransportError::Encode(e.to_string()))?;

        let response = client
            .request(request)
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        if response.status() != StatusCode::OK {
            return Err(TransportError::BadStatus(response.status().as_u16()));
        }

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?
            .to_bytes();
        serde_json::from_slice(&bytes).map_err(|e| TransportError::BadReply(e.to_string()))
    }
}

impl EvaluationTransport for HttpTransport {
    fn submit(&self, ctx: &CallContext, call: EvaluateCall, completion: Completion) {
        let client = self.client.clone();
        let url = self.evaluate_url.clone();
        let call_id = ctx.id();
        tokio::spawn(async move {
            let result = Self::evaluate(client, url, call).await;
            if let Err(e) = &result {
                tracing::debug!(%call_id, error = %e, "Runtime call failed");
            }
            completion.complete(result);
        });
    }
}
