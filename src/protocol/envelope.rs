//! The JSON envelope exchanged with the runtime backend.

use serde::{Deserialize, Serialize};

use crate::protocol::request::InternalRequest;
use crate::protocol::response::InternalResponse;

/// One call to the runtime's evaluation endpoint.
///
/// `deadline_ms` is advisory: it tells the runtime how long the caller is
/// willing to wait, but the gateway never force-cancels runtime work.
/// `None` means unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateCall {
    pub call_id: u64,
    pub deadline_ms: Option<u64>,
    pub request: InternalRequest,
}

/// The runtime's reply: either a response message or an explicit
/// application-level error with a code callers can branch on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluateReply {
    Response(InternalResponse),
    AppError { code: i32, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_round_trips_through_json() {
        let reply = EvaluateReply::AppError {
            code: 7,
            detail: "boom".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("app_error"));
        match serde_json::from_str(&json).unwrap() {
            EvaluateReply::AppError { code, detail } => {
                assert_eq!(code, 7);
                assert_eq!(detail, "boom");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn response_variant_carries_the_message() {
        let reply = EvaluateReply::Response(InternalResponse::ok(200, vec![], b"hi".to_vec()));
        let json = serde_json::to_string(&reply).unwrap();
        match serde_json::from_str(&json).unwrap() {
            EvaluateReply::Response(resp) => assert_eq!(resp.body, b"hi"),
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
