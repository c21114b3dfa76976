//! A minimal runtime backend for local experiments.
//!
//! Answers every evaluation call with a plain-text response echoing the
//! identity fields the gateway extracted. Point a gateway at it with
//! `runtime.evaluate_url = "http://127.0.0.1:8089/evaluate"`.

use axum::{routing::post, Json, Router};
use std::net::SocketAddr;

use runtime_gateway::protocol::{EvaluateCall, EvaluateReply, InternalResponse};

async fn evaluate(Json(call): Json<EvaluateCall>) -> Json<EvaluateReply> {
    let req = &call.request;
    let body = format!(
        "call={} app={} service={} version={} method={} url={}\n\
         user_ip={} email={:?} admin={} offline={} type={:?}\n",
        call.call_id,
        req.app_id,
        req.service_id,
        req.version_id,
        req.method,
        req.url,
        req.user_ip,
        req.email,
        req.is_admin,
        req.is_offline,
        req.request_type,
    );
    let response = InternalResponse::ok(
        200,
        vec![("content-type".to_string(), "text/plain".to_string())],
        body.into_bytes(),
    );
    Json(EvaluateReply::Response(response))
}

#[tokio::main]
async fn main() {
    let app = Router::new().route("/evaluate", post(evaluate));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8089));
    println!("Mock runtime listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
