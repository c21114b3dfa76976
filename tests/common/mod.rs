//! Shared utilities for integration testing: a programmable mock runtime
//! and a gateway spawner, both on ephemeral ports.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, routing::post, Json, Router};
use tokio::net::TcpListener;

use runtime_gateway::config::GatewayConfig;
use runtime_gateway::http::HttpServer;
use runtime_gateway::lifecycle::Shutdown;
use runtime_gateway::protocol::{EvaluateCall, EvaluateReply, InternalResponse};

type ReplyFn = dyn Fn(&EvaluateCall) -> EvaluateReply + Send + Sync;

#[derive(Clone)]
struct RuntimeState {
    reply: Arc<ReplyFn>,
    delay: Duration,
    calls: Arc<Mutex<Vec<EvaluateCall>>>,
}

/// Handle onto a running mock runtime; records every call it receives.
pub struct MockRuntime {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<EvaluateCall>>>,
}

impl MockRuntime {
    pub fn calls(&self) -> Vec<EvaluateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> EvaluateCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("mock runtime received no calls")
    }
}

async fn evaluate(
    State(state): State<RuntimeState>,
    Json(call): Json<EvaluateCall>,
) -> Json<EvaluateReply> {
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    let reply = (state.reply)(&call);
    state.calls.lock().unwrap().push(call);
    Json(reply)
}

/// Start a mock runtime that answers instantly.
pub async fn start_mock_runtime<F>(reply: F) -> MockRuntime
where
    F: Fn(&EvaluateCall) -> EvaluateReply + Send + Sync + 'static,
{
    start_runtime(Duration::ZERO, reply).await
}

/// Start a mock runtime that sleeps before answering.
pub async fn start_delayed_runtime<F>(delay: Duration, reply: F) -> MockRuntime
where
    F: Fn(&EvaluateCall) -> EvaluateReply + Send + Sync + 'static,
{
    start_runtime(delay, reply).await
}

async fn start_runtime<F>(delay: Duration, reply: F) -> MockRuntime
where
    F: Fn(&EvaluateCall) -> EvaluateReply + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = RuntimeState {
        reply: Arc::new(reply),
        delay,
        calls: calls.clone(),
    };
    let app = Router::new()
        .route("/evaluate", post(evaluate))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockRuntime { addr, calls }
}

/// A default gateway config pointed at the given runtime address.
pub fn gateway_config(runtime_addr: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.runtime.evaluate_url = format!("http://{}/evaluate", runtime_addr);
    config
}

/// Spawn a gateway on an ephemeral port. The returned `Shutdown` must stay
/// alive for the lifetime of the test.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    // Let the serve loop start accepting.
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

/// A plain text success reply.
pub fn text_reply(status: u16, body: &str) -> EvaluateReply {
    EvaluateReply::Response(InternalResponse::ok(
        status,
        vec![("content-type".to_string(), "text/plain".to_string())],
        body.as_bytes().to_vec(),
    ))
}
