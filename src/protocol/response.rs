//! The internal response message received from the runtime backend.

use serde::{Deserialize, Serialize};

/// Error code meaning the runtime produced a normal HTTP response.
pub const ERROR_OK: i32 = 0;

/// One application log line accumulated while the runtime processed a call.
///
/// `level` is the runtime's numeric severity; the dispatcher maps it onto the
/// local logging levels when the lines are drained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppLogLine {
    pub timestamp_usec: i64,
    pub level: i64,
    pub message: String,
}

impl Default for AppLogLine {
    fn default() -> Self {
        Self {
            timestamp_usec: 0,
            level: 1,
            message: String::new(),
        }
    }
}

/// The runtime's reply to one internal request. Read-only once received.
///
/// When `error` is not [`ERROR_OK`] the status/headers/body carry no meaning
/// and the response translator discards them in favor of the error page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalResponse {
    pub status: u16,
    /// Ordered header list; duplicate names are distinct occurrences.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub error: i32,
    pub error_message: String,
    /// Drained once by the dispatcher and re-emitted locally.
    pub app_logs: Vec<AppLogLine>,
}

impl InternalResponse {
    /// A plain successful response, mainly for tests and demo runtimes.
    pub fn ok(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            ..Default::default()
        }
    }
}
