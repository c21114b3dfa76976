//! Internal evaluation-protocol message model.
//!
//! # Data Flow
//! ```text
//! inbound HTTP request
//!     → http::request (translator)
//!     → InternalRequest (immutable once built)
//!     → envelope::EvaluateCall (call id + advisory deadline)
//!     → runtime backend
//!     → envelope::EvaluateReply
//!     → InternalResponse / application error
//!     → http::response (translator)
//! ```
//!
//! # Design Decisions
//! - Every field is a named, typed struct field; no string-keyed property bags
//! - Messages are built once and exclusively owned by the call that built them
//! - JSON wire format via serde; the runtime side mirrors these types

pub mod envelope;
pub mod profiler;
pub mod request;
pub mod response;
pub mod trace;

pub use envelope::{EvaluateCall, EvaluateReply};
pub use profiler::{ProfilerParseError, ProfilerSettings};
pub use request::{InternalRequest, RequestType};
pub use response::{AppLogLine, InternalResponse, ERROR_OK};
pub use trace::{TraceContext, TraceParseError};
