//! Cloud trace context header parsing.
//!
//! The header value has the shape `TRACE_ID[/SPAN_ID][;o=MASK]`. Parse
//! failures are non-fatal for the request: the translator logs a warning and
//! proceeds without a trace context.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parsed `X-Cloud-Trace-Context` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: Option<u64>,
    pub trace_mask: Option<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceParseError {
    #[error("empty trace id")]
    EmptyTraceId,
    #[error("invalid span id {0:?}")]
    InvalidSpanId(String),
    #[error("invalid trace option {0:?}")]
    InvalidOption(String),
}

impl TraceContext {
    /// Parse a `TRACE_ID[/SPAN_ID][;o=MASK]` header value.
    pub fn parse(value: &str) -> Result<Self, TraceParseError> {
        let (ids, options) = match value.split_once(';') {
            Some((ids, options)) => (ids, Some(options)),
            None => (value, None),
        };

        let (trace_id, span) = match ids.split_once('/') {
            Some((trace_id, span)) => (trace_id, Some(span)),
            None => (ids, None),
        };
        if trace_id.is_empty() {
            return Err(TraceParseError::EmptyTraceId);
        }

        let span_id = match span {
            Some(span) => Some(
                span.parse::<u64>()
                    .map_err(|_| TraceParseError::InvalidSpanId(span.to_string()))?,
            ),
            None => None,
        };

        let mut trace_mask = None;
        if let Some(options) = options {
            for option in options.split(';') {
                match option.split_once('=') {
                    Some(("o", mask)) => {
                        trace_mask = Some(
                            mask.parse::<u32>()
                                .map_err(|_| TraceParseError::InvalidOption(option.to_string()))?,
                        );
                    }
                    // Unknown options are tolerated; malformed ones are not.
                    Some((_, _)) => {}
                    None => return Err(TraceParseError::InvalidOption(option.to_string())),
                }
            }
        }

        Ok(Self {
            trace_id: trace_id.to_string(),
            span_id,
            trace_mask,
        })
    }
}
