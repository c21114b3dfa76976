//! Request translation: inbound HTTP request → internal request message.
//!
//! # Responsibilities
//! - Iterate all request headers exactly once
//! - Populate identity fields from private headers instead of forwarding them
//! - Interpret HTTP-semantic headers (trust, HTTPS, user IP, trace, deadline)
//! - Forward every other header verbatim, original order preserved
//! - Rebuild the absolute URL and classify background requests
//!
//! # Design Decisions
//! - The body is fully buffered before translation; no streaming
//! - Trace-context parse failures are logged and ignored; profiler parse
//!   failures are fatal for the request
//! - The admin-check-skip marker is appended at most once (insert-if-absent)

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::http::{header, request::Parts};
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::http::headers;
use crate::protocol::{InternalRequest, ProfilerParseError, ProfilerSettings, RequestType, TraceContext};

/// Fatal local translation errors. Each one aborts only the current request
/// and is rendered as the standard error page by the top-level handler.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to read request body: {0}")]
    BodyRead(String),
    #[error("invalid X-AppEngine-Gaia-Id value {0:?}")]
    BadGaiaId(String),
    #[error("invalid X-Google-Internal-Profiler header")]
    Profiler(#[from] ProfilerParseError),
}

/// Translates inbound HTTP requests into [`InternalRequest`] messages.
///
/// Holds the configured app identity that seeds every message; one instance
/// is shared by all request-handling tasks and is never mutated.
#[derive(Debug)]
pub struct RequestTranslator {
    app: AppConfig,
}

impl RequestTranslator {
    pub fn new(app: AppConfig) -> Self {
        Self { app }
    }

    /// Build the internal request for one inbound HTTP request.
    ///
    /// `remote_addr` is the socket peer; the effective user IP may be
    /// overridden by the user-IP header.
    pub fn translate(
        &self,
        parts: &Parts,
        remote_addr: SocketAddr,
        body: Bytes,
    ) -> Result<InternalRequest, TranslateError> {
        let mut req = InternalRequest {
            app_id: self.app.app_id.clone(),
            service_id: self.app.service_id.clone(),
            version_id: self.app.version_id.clone(),
            default_version_hostname: self.app.default_version_hostname.clone(),
            security_ticket: self.app.security_ticket.clone(),
            user_ip: remote_addr.ip().to_string(),
            method: parts.method.to_string(),
            body: body.to_vec(),
            ..Default::default()
        };

        let mut skip_admin_check = false;

        for (name, value) in parts.headers.iter() {
            let name = name.as_str();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();

            match name {
                headers::API_TICKET => req.security_ticket = value,
                headers::USER_EMAIL => req.email = value,
                headers::USER_NICKNAME => req.nickname = value,
                headers::USER_IS_ADMIN => req.is_admin = value == headers::ADMIN_SENTINEL,
                headers::AUTH_DOMAIN => req.auth_domain = value,
                headers::USER_ORGANIZATION => req.user_organization = value,
                headers::LOAS_PEER_USERNAME => req.peer_username = value,
                headers::GAIA_ID => {
                    req.gaia_id = value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| TranslateError::BadGaiaId(value.clone()))?;
                }
                headers::GAIA_AUTHUSER => req.gaia_authuser = value,
                headers::GAIA_SESSION => req.gaia_session = value,
                headers::APPSERVER_DATACENTER => req.appserver_datacenter = value,
                headers::APPSERVER_TASK_BNS => req.appserver_task_bns = value,
                headers::DEFAULT_VERSION_HOSTNAME => req.default_version_hostname = value,
                headers::REQUEST_LOG_ID => req.request_log_id = value,
                headers::TRUSTED_IP_REQUEST => {
                    // Presence means the request came through a trusted
                    // internal channel; the sentinel value asserts a trusted
                    // user on top of that.
                    req.is_trusted = value == headers::TRUSTED_USER_SENTINEL;
                    req.is_trusted_app = true;
                }
                headers::HTTPS => {
                    if value.eq_ignore_ascii_case(headers::HTTPS_ON) {
                        req.is_https = true;
                    }
                }
                headers::FORWARDED_PROTO => {
                    if value.eq_ignore_ascii_case(headers::PROTO_HTTPS) {
                        req.is_https = true;
                    }
                }
                headers::USER_IP => req.user_ip = value,
                headers::CLOUD_TRACE_CONTEXT => match TraceContext::parse(&value) {
                    Ok(ctx) => req.trace_context = Some(ctx),
                    Err(e) => {
                        tracing::warn!(value = %value, error = %e, "Ignoring unparseable trace context");
                    }
                },
                headers::SKIP_ADMIN_CHECK => skip_admin_check = true,
                headers::QUEUE_NAME => {
                    // Cron/task-queue requests bypass admin-only URL checks
                    // and run offline. Task handlers read the queue name, so
                    // the header is also forwarded.
                    skip_admin_check = true;
                    req.is_offline = true;
                    req.headers.push((name.to_string(), value));
                }
                headers::PROFILER => {
                    req.profiler_settings = Some(ProfilerSettings::parse(&value)?);
                }
                _ => req.headers.push((name.to_string(), value)),
            }
        }

        if skip_admin_check {
            req.skip_admin_check = true;
            // Insert-if-absent: exactly one marker occurrence no matter how
            // many triggers fired.
            if req.header(headers::SKIP_ADMIN_CHECK).is_none() {
                req.headers.push((
                    headers::SKIP_ADMIN_CHECK.to_string(),
                    headers::SKIP_ADMIN_CHECK_VALUE.to_string(),
                ));
            }
        }

        let scheme = if req.is_https { "https" } else { "http" };
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(&self.app.default_version_hostname);
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        req.url = format!("{scheme}://{host}{path_and_query}");

        if parts.uri.path() == headers::BACKGROUND_PATH && req.user_ip == headers::BACKGROUND_IP {
            req.request_type = RequestType::Background;
        }

        Ok(req)
    }
}
