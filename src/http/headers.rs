//! Recognized inbound header names and sentinel values.
//!
//! All names are lowercase; the `http` crate normalizes header names on
//! parse, so comparing against these constants is a case-insensitive match.
//!
//! Private identity headers populate a dedicated `InternalRequest` field and
//! are never forwarded. HTTP-semantic headers are interpreted; most are
//! consumed, but the queue-name and timeout headers are also forwarded so
//! task handlers and the deadline extractor can read them.

// Private identity headers.
pub const API_TICKET: &str = "x-appengine-api-ticket";
pub const USER_EMAIL: &str = "x-appengine-user-email";
pub const USER_NICKNAME: &str = "x-appengine-user-nickname";
pub const USER_IS_ADMIN: &str = "x-appengine-user-is-admin";
pub const AUTH_DOMAIN: &str = "x-appengine-auth-domain";
pub const USER_ORGANIZATION: &str = "x-appengine-user-organization";
pub const LOAS_PEER_USERNAME: &str = "x-appengine-loas-peer-username";
pub const GAIA_ID: &str = "x-appengine-gaia-id";
pub const GAIA_AUTHUSER: &str = "x-appengine-gaia-authuser";
pub const GAIA_SESSION: &str = "x-appengine-gaia-session";
pub const APPSERVER_DATACENTER: &str = "x-appengine-appserver-datacenter";
pub const APPSERVER_TASK_BNS: &str = "x-appengine-appserver-task-bns";
pub const DEFAULT_VERSION_HOSTNAME: &str = "x-appengine-default-version-hostname";
pub const REQUEST_LOG_ID: &str = "x-appengine-request-log-id";

// HTTP-semantic headers.
pub const TRUSTED_IP_REQUEST: &str = "x-appengine-trusted-ip-request";
pub const HTTPS: &str = "x-appengine-https";
pub const FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const USER_IP: &str = "x-appengine-user-ip";
pub const CLOUD_TRACE_CONTEXT: &str = "x-cloud-trace-context";
pub const SKIP_ADMIN_CHECK: &str = "x-google-internal-skipadmincheck";
pub const QUEUE_NAME: &str = "x-appengine-queuename";
pub const PROFILER: &str = "x-google-internal-profiler";
pub const TIMEOUT_MS: &str = "x-appengine-timeout-ms";

// Sentinel values.
pub const ADMIN_SENTINEL: &str = "1";
pub const TRUSTED_USER_SENTINEL: &str = "1";
pub const HTTPS_ON: &str = "on";
pub const PROTO_HTTPS: &str = "https";
pub const SKIP_ADMIN_CHECK_VALUE: &str = "true";

// Background request classification.
pub const BACKGROUND_PATH: &str = "/_ah/background";
pub const BACKGROUND_IP: &str = "0.1.0.3";
