//! HTTP server setup and the forward handler.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all forward handler
//! - Wire up middleware (tracing, request log ID)
//! - Wire translator → dispatcher → response translation per request
//! - Keep every failure inside the fixed error-page format
//! - Record one request metric per inbound request

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, Uri},
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::dispatch::{deadline_for, DispatchError, Dispatcher, HttpTransport};
use crate::http::middleware::RequestLogIdLayer;
use crate::http::request::{RequestTranslator, TranslateError};
use crate::http::response;
use crate::observability::metrics;
use crate::protocol::ERROR_OK;

/// Server construction and serve-loop failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid runtime evaluate URL {url:?}")]
    InvalidEvaluateUrl {
        url: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Application state injected into the forward handler.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<RequestTranslator>,
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_bytes: usize,
}

/// HTTP front end for the runtime gateway.
pub struct HttpServer {
    router: Router,
    dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    /// Wire the translator, transport, and dispatcher for the given
    /// configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let evaluate_url: Uri =
            config
                .runtime
                .evaluate_url
                .parse()
                .map_err(|source| ServerError::InvalidEvaluateUrl {
                    url: config.runtime.evaluate_url.clone(),
                    source,
                })?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(
            config.runtime.connect_timeout_secs,
        )));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let transport = Arc::new(HttpTransport::new(client, evaluate_url));
        let dispatcher = Arc::new(Dispatcher::new(transport));
        let translator = Arc::new(RequestTranslator::new(config.app.clone()));

        let state = AppState {
            translator,
            dispatcher: dispatcher.clone(),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state);
        Ok(Self { router, dispatcher })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(RequestLogIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// The dispatcher handle, for draining in-flight calls at shutdown.
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    /// Run the server until the shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The single top-level request handler.
///
/// Translate → extract deadline → dispatch → translate response. Every
/// failure converges on the fixed error page; nothing propagates to the
/// framework's default error handling.
async fn forward_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let started_at = Instant::now();
    let method = request.method().to_string();
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to buffer request body");
            metrics::record_request(&method, 500, "translate_error", started_at);
            let e = TranslateError::BodyRead(e.to_string());
            return response::error_page(&response::describe_error(&e));
        }
    };

    let internal = match state.translator.translate(&parts, addr, body) {
        Ok(internal) => internal,
        Err(e) => {
            tracing::warn!(error = %e, path = %parts.uri.path(), "Request translation failed");
            metrics::record_request(&method, 500, "translate_error", started_at);
            return response::error_page(&response::describe_error(&e));
        }
    };

    let deadline = deadline_for(&internal);
    match state.dispatcher.dispatch(internal, deadline).await {
        Ok(reply) => {
            if reply.error != ERROR_OK {
                tracing::warn!(error = reply.error, message = %reply.error_message, "Runtime signaled an internal error");
                metrics::record_request(&method, 500, "runtime_error", started_at);
                return response::error_page(&reply.error_message);
            }
            match response::copy_response(&reply) {
                Ok(http_response) => {
                    metrics::record_request(
                        &method,
                        http_response.status().as_u16(),
                        "ok",
                        started_at,
                    );
                    http_response
                }
                Err(e) => {
                    tracing::error!(error = %e, "Runtime response could not be reconstructed");
                    metrics::record_request(&method, 500, "bad_response", started_at);
                    response::error_page(&response::describe_error(&e))
                }
            }
        }
        Err(DispatchError::App { code, detail }) => {
            metrics::record_request(&method, 500, "app_error", started_at);
            response::error_page(&format!("Application error {code}: {detail}"))
        }
        Err(e @ DispatchError::DeadlineExceeded) => {
            metrics::record_request(&method, 500, "deadline_exceeded", started_at);
            response::error_page(&response::describe_error(&e))
        }
        Err(e @ DispatchError::Transport(_)) => {
            metrics::record_request(&method, 500, "transport_error", started_at);
            response::error_page(&response::describe_error(&e))
        }
    }
}
