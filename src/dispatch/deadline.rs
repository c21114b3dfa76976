//! Deadline extraction from the translated request.
//!
//! The timeout header is forwarded to the runtime and read back here from
//! the already-built header list, so the edge layer, the gateway, and the
//! runtime all see the same value.

use std::time::Duration;

use crate::http::headers;
use crate::protocol::InternalRequest;

/// Remaining-time budget for a call.
///
/// Reads the millisecond timeout header, case-insensitively. Absent or
/// unparseable values yield `Duration::MAX`: a call without an explicit edge
/// deadline must never be cut off prematurely.
pub fn deadline_for(request: &InternalRequest) -> Duration {
    request
        .header(headers::TIMEOUT_MS)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(headers: Vec<(&str, &str)>) -> InternalRequest {
        InternalRequest {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_millisecond_header() {
        let req = request_with(vec![("x-appengine-timeout-ms", "2500")]);
        assert_eq!(deadline_for(&req), Duration::from_millis(2500));
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let req = request_with(vec![("X-AppEngine-Timeout-Ms", "100")]);
        assert_eq!(deadline_for(&req), Duration::from_millis(100));
    }

    #[test]
    fn missing_header_is_unbounded() {
        let req = request_with(vec![]);
        assert_eq!(deadline_for(&req), Duration::MAX);
    }

    #[test]
    fn unparseable_header_is_unbounded() {
        let req = request_with(vec![("x-appengine-timeout-ms", "soon")]);
        assert_eq!(deadline_for(&req), Duration::MAX);
    }
}
