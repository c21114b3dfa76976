//! The internal request message sent to the runtime backend.

use serde::{Deserialize, Serialize};

use crate::protocol::profiler::ProfilerSettings;
use crate::protocol::trace::TraceContext;

/// Classification of an inbound request.
///
/// `Background` is only assigned to requests for the background path that
/// arrive from the reserved loopback-like sentinel address; everything else
/// is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestType {
    #[default]
    Other,
    Background,
}

/// The internal request message bridging HTTP and the evaluation protocol.
///
/// Built exactly once per inbound HTTP request by the request translator and
/// never mutated afterwards. Identity fields default to the configured app
/// identity and are overridden by the corresponding private headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalRequest {
    // App identity (from config).
    pub app_id: String,
    pub service_id: String,
    pub version_id: String,
    pub default_version_hostname: String,

    // Caller identity (from private headers).
    pub security_ticket: String,
    pub nickname: String,
    pub email: String,
    pub auth_domain: String,
    pub user_organization: String,
    pub peer_username: String,
    pub gaia_id: i64,
    pub gaia_authuser: String,
    pub gaia_session: String,
    pub appserver_datacenter: String,
    pub appserver_task_bns: String,
    pub request_log_id: String,

    // Effective user IP: socket peer unless overridden by header.
    pub user_ip: String,

    // Derived flags.
    pub is_admin: bool,
    pub is_https: bool,
    pub is_trusted: bool,
    pub is_trusted_app: bool,
    pub is_offline: bool,
    pub skip_admin_check: bool,
    pub request_type: RequestType,

    pub trace_context: Option<TraceContext>,
    pub profiler_settings: Option<ProfilerSettings>,

    // HTTP surface.
    pub method: String,
    /// Absolute URL including the query string.
    pub url: String,
    /// Forwarded headers, original order preserved; private headers excluded.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl InternalRequest {
    /// Look up the first forwarded header with the given name,
    /// case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Count forwarded header occurrences with the given name,
    /// case-insensitively.
    pub fn header_count(&self, name: &str) -> usize {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = InternalRequest {
            headers: vec![
                ("X-Custom".to_string(), "a".to_string()),
                ("x-custom".to_string(), "b".to_string()),
            ],
            ..Default::default()
        };
        assert_eq!(req.header("X-CUSTOM"), Some("a"));
        assert_eq!(req.header_count("x-Custom"), 2);
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn request_type_defaults_to_other() {
        assert_eq!(RequestType::default(), RequestType::Other);
    }
}
