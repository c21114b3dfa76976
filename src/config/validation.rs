//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Addresses parse, the runtime URL is well-formed http(s)
//! - Identity fields are non-empty, limits are sane
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress { value: String },
    InvalidEvaluateUrl { value: String, reason: String },
    UnsupportedEvaluateScheme { scheme: String },
    EmptyField { field: &'static str },
    ZeroBodyLimit,
    InvalidMetricsAddress { value: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress { value } => {
                write!(f, "listener.bind_address {value:?} is not a socket address")
            }
            ValidationError::InvalidEvaluateUrl { value, reason } => {
                write!(f, "runtime.evaluate_url {value:?} is invalid: {reason}")
            }
            ValidationError::UnsupportedEvaluateScheme { scheme } => {
                write!(f, "runtime.evaluate_url scheme {scheme:?} is not http or https")
            }
            ValidationError::EmptyField { field } => write!(f, "{field} must not be empty"),
            ValidationError::ZeroBodyLimit => write!(f, "limits.max_body_bytes must be > 0"),
            ValidationError::InvalidMetricsAddress { value } => {
                write!(f, "observability.metrics_address {value:?} is not a socket address")
            }
        }
    }
}

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            value: config.listener.bind_address.clone(),
        });
    }

    match Url::parse(&config.runtime.evaluate_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedEvaluateScheme {
                    scheme: url.scheme().to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidEvaluateUrl {
            value: config.runtime.evaluate_url.clone(),
            reason: e.to_string(),
        }),
    }

    for (field, value) in [
        ("app.app_id", &config.app.app_id),
        ("app.service_id", &config.app.service_id),
        ("app.version_id", &config.app.version_id),
        (
            "app.default_version_hostname",
            &config.app.default_version_hostname,
        ),
        ("app.security_ticket", &config.app.security_ticket),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::EmptyField { field });
        }
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nope".to_string();
        config.app.app_id = String::new();
        config.limits.max_body_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_empty_security_ticket() {
        let mut config = GatewayConfig::default();
        config.app.security_ticket = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmptyField {
                field: "app.security_ticket"
            }]
        );
    }

    #[test]
    fn rejects_non_http_evaluate_url() {
        let mut config = GatewayConfig::default();
        config.runtime.evaluate_url = "ftp://host/evaluate".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnsupportedEvaluateScheme {
                scheme: "ftp".to_string()
            }]
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bad".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
