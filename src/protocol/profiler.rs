//! Profiler settings header parsing.
//!
//! The header value is a comma-separated list of `key: value` entries. The
//! gateway validates the shape and forwards the blob opaquely; interpreting
//! the settings belongs to the runtime. Unlike trace-context parsing, a
//! malformed profiler header is fatal for the request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parsed profiler settings from the internal profiler header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilerSettings {
    /// Original header text, forwarded to the runtime unmodified.
    pub raw: String,
    /// Validated `(key, value)` entries in header order.
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfilerParseError {
    #[error("empty profiler header")]
    Empty,
    #[error("malformed profiler entry {0:?}")]
    MalformedEntry(String),
}

impl ProfilerSettings {
    /// Parse a comma-separated `key: value` list.
    pub fn parse(value: &str) -> Result<Self, ProfilerParseError> {
        if value.trim().is_empty() {
            return Err(ProfilerParseError::Empty);
        }

        let mut entries = Vec::new();
        for entry in value.split(',') {
            let (key, val) = entry
                .split_once(':')
                .ok_or_else(|| ProfilerParseError::MalformedEntry(entry.trim().to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ProfilerParseError::MalformedEntry(entry.trim().to_string()));
            }
            entries.push((key.to_string(), val.trim().to_string()));
        }

        Ok(Self {
            raw: value.to_string(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_list() {
        let settings = ProfilerSettings::parse("cpu: enabled, wall: 250").unwrap();
        assert_eq!(settings.raw, "cpu: enabled, wall: 250");
        assert_eq!(
            settings.entries,
            vec![
                ("cpu".to_string(), "enabled".to_string()),
                ("wall".to_string(), "250".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_empty_header() {
        assert_eq!(
            ProfilerSettings::parse("   "),
            Err(ProfilerParseError::Empty)
        );
    }

    #[test]
    fn rejects_entry_without_separator() {
        assert_eq!(
            ProfilerSettings::parse("cpu: on, garbage"),
            Err(ProfilerParseError::MalformedEntry("garbage".to_string()))
        );
    }

    #[test]
    fn rejects_empty_key() {
        assert_eq!(
            ProfilerSettings::parse(": on"),
            Err(ProfilerParseError::MalformedEntry(": on".to_string()))
        );
    }
}
