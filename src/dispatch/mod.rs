//! Call dispatch: deliver internal requests to the runtime and await the
//! single result.
//!
//! # Data Flow
//! ```text
//! InternalRequest + deadline
//!     → CallContext (unique id, start timestamp, budget)
//!     → EvaluationTransport::submit (async, fire-and-forget)
//!     → await completion, bounded by the deadline
//!     → InternalResponse | App error | Transport error | DeadlineExceeded
//! ```
//!
//! # Design Decisions
//! - Exactly one result per call; the oneshot channel enforces at-most-once
//! - A deadline expiry releases the caller only; runtime work is not
//!   force-cancelled (the deadline travels in the envelope as advisory)
//! - In-flight calls are tracked for draining and the in-flight gauge

pub mod call;
pub mod deadline;
pub mod logs;
pub mod transport;

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use thiserror::Error;

use crate::observability::metrics;
use crate::protocol::{EvaluateCall, EvaluateReply, InternalRequest, InternalResponse};

pub use call::{CallContext, CallId};
pub use deadline::deadline_for;
pub use transport::{Completion, EvaluationTransport, HttpTransport, TransportError};

/// Failure taxonomy for one dispatched call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Business-level failure explicitly signaled by the runtime.
    #[error("application error {code}: {detail}")]
    App { code: i32, detail: String },
    /// The runtime was unreachable or violated the protocol.
    #[error("runtime transport failure")]
    Transport(#[from] TransportError),
    /// The caller's time budget elapsed before a result arrived.
    #[error("deadline exceeded waiting for the runtime")]
    DeadlineExceeded,
}

/// Dispatches calls to the runtime and presents a single awaited result per
/// call on top of the asynchronous transport.
pub struct Dispatcher {
    transport: Arc<dyn EvaluationTransport>,
    in_flight: DashMap<u64, Instant>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn EvaluationTransport>) -> Self {
        Self {
            transport,
            in_flight: DashMap::new(),
        }
    }

    /// Number of calls currently awaiting a result.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Deliver one request and wait for its result.
    ///
    /// The wait is bounded by `deadline`; `Duration::MAX` means unbounded.
    /// App log lines on a received response are drained here, before the
    /// response is handed back.
    pub async fn dispatch(
        &self,
        request: InternalRequest,
        deadline: Duration,
    ) -> Result<InternalResponse, DispatchError> {
        let ctx = CallContext::new(deadline);
        let call_id = ctx.id();
        let call = EvaluateCall {
            call_id: call_id.as_u64(),
            deadline_ms: ctx.deadline_ms(),
            request,
        };

        let (completion, rx) = Completion::new();
        self.in_flight.insert(call_id.as_u64(), ctx.started_at());
        metrics::set_calls_in_flight(self.in_flight.len());

        self.transport.submit(&ctx, call, completion);
        let outcome = tokio::time::timeout(deadline, rx).await;

        self.in_flight.remove(&call_id.as_u64());
        metrics::set_calls_in_flight(self.in_flight.len());

        match outcome {
            Err(_) => {
                tracing::warn!(%call_id, deadline = ?ctx.deadline(), "Call deadline exceeded");
                Err(DispatchError::DeadlineExceeded)
            }
            Ok(Err(_closed)) => Err(DispatchError::Transport(TransportError::Abandoned)),
            Ok(Ok(Err(e))) => Err(DispatchError::Transport(e)),
            Ok(Ok(Ok(EvaluateReply::AppError { code, detail }))) => {
                Err(DispatchError::App { code, detail })
            }
            Ok(Ok(Ok(EvaluateReply::Response(response)))) => {
                logs::emit_app_logs(call_id, &response.app_logs);
                Ok(response)
            }
        }
    }

    /// Wait until no calls are in flight or the grace period elapses.
    pub async fn drain(&self, grace: Duration) {
        let give_up = Instant::now() + grace;
        while !self.in_flight.is_empty() && Instant::now() < give_up {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let remaining = self.in_flight.len();
        if remaining > 0 {
            tracing::warn!(remaining, "Drain grace period elapsed with calls in flight");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Completes every call with a canned result.
    struct CannedTransport(Mutex<Vec<transport::CallResult>>);

    impl CannedTransport {
        fn replying(results: Vec<transport::CallResult>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(results)))
        }
    }

    impl EvaluationTransport for CannedTransport {
        fn submit(&self, _ctx: &CallContext, _call: EvaluateCall, completion: Completion) {
            let result = self.0.lock().unwrap().remove(0);
            completion.complete(result);
        }
    }

    /// Holds completions forever, so callers run into their deadline.
    struct StallTransport(Mutex<Vec<Completion>>);

    impl EvaluationTransport for StallTransport {
        fn submit(&self, _ctx: &CallContext, _call: EvaluateCall, completion: Completion) {
            self.0.lock().unwrap().push(completion);
        }
    }

    /// Drops the completion without ever signaling.
    struct DropTransport;

    impl EvaluationTransport for DropTransport {
        fn submit(&self, _ctx: &CallContext, _call: EvaluateCall, completion: Completion) {
            drop(completion);
        }
    }

    #[tokio::test]
    async fn success_returns_the_response() {
        let transport = CannedTransport::replying(vec![Ok(EvaluateReply::Response(
            InternalResponse::ok(200, vec![], b"hello".to_vec()),
        ))]);
        let dispatcher = Dispatcher::new(transport);
        let response = dispatcher
            .dispatch(InternalRequest::default(), Duration::MAX)
            .await
            .unwrap();
        assert_eq!(response.body, b"hello");
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[tokio::test]
    async fn app_error_is_distinct_from_transport_failure() {
        let transport = CannedTransport::replying(vec![
            Ok(EvaluateReply::AppError {
                code: 7,
                detail: "boom".to_string(),
            }),
            Err(TransportError::BadStatus(502)),
        ]);
        let dispatcher = Dispatcher::new(transport);

        match dispatcher
            .dispatch(InternalRequest::default(), Duration::MAX)
            .await
        {
            Err(DispatchError::App { code, detail }) => {
                assert_eq!(code, 7);
                assert_eq!(detail, "boom");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        match dispatcher
            .dispatch(InternalRequest::default(), Duration::MAX)
            .await
        {
            Err(DispatchError::Transport(TransportError::BadStatus(502))) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn deadline_releases_the_caller() {
        let dispatcher = Dispatcher::new(Arc::new(StallTransport(Mutex::new(Vec::new()))));
        let started = Instant::now();
        match dispatcher
            .dispatch(InternalRequest::default(), Duration::from_millis(50))
            .await
        {
            Err(DispatchError::DeadlineExceeded) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[tokio::test]
    async fn dropped_completion_is_a_transport_failure() {
        let dispatcher = Dispatcher::new(Arc::new(DropTransport));
        match dispatcher
            .dispatch(InternalRequest::default(), Duration::MAX)
            .await
        {
            Err(DispatchError::Transport(TransportError::Abandoned)) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
