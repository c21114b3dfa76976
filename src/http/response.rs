//! Response translation: internal response message → outbound HTTP response.
//!
//! # Responsibilities
//! - Copy status, headers (duplicates preserved), and body bytes verbatim
//! - Render the fixed error page for runtime errors and local failures
//! - HTML-escape every error message before it reaches a browser
//!
//! # Design Decisions
//! - A malformed runtime response (bad status code, bad header name/value)
//!   is a transport-class failure, not a partial copy
//! - Every failure mode converges on HTTP 500 with the same page shape

use axum::body::Body;
use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use axum::http::status::InvalidStatusCode;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use thiserror::Error;

use crate::protocol::InternalResponse;

/// Rejections while reconstructing an HTTP response from a runtime message.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("invalid status code in runtime response")]
    Status(#[from] InvalidStatusCode),
    #[error("invalid header name in runtime response")]
    HeaderName(#[from] InvalidHeaderName),
    #[error("invalid header value in runtime response")]
    HeaderValue(#[from] InvalidHeaderValue),
}

/// Copy a successful runtime response onto an HTTP response verbatim.
///
/// Header order is preserved and duplicate names become separate header
/// occurrences. The body bytes are written as-is.
pub fn copy_response(internal: &InternalResponse) -> Result<Response, ResponseError> {
    let status = StatusCode::from_u16(internal.status)?;

    let mut response = Response::new(Body::from(internal.body.clone()));
    *response.status_mut() = status;
    for (name, value) in &internal.headers {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        response.headers_mut().append(name, value);
    }
    Ok(response)
}

/// The fixed internal-server-error page. `message` is escaped, never markup.
pub fn error_page(message: &str) -> Response {
    let body = format!(
        "<html><head><title>Server Error</title></head><body>{}</body></html>",
        html_escape(message)
    );
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

/// Escape `& < > " '` so error text renders inert.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render an error and its source chain as one line of text.
pub fn describe_error(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        out.push_str(": ");
        out.push_str(&inner.to_string());
        source = inner.source();
    }
    out
}
