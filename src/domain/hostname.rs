// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource hostnames

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hostname validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("Hostname is empty")]
    Empty,

    #[error("Hostname exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in hostname: {0}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),

    #[error("Label cannot be all numeric: {0}")]
    NumericLabel(String),
}

/// RFC 1123 hostname naming a resource or the host a guest runs on
///
/// Labels are dot-separated, at most 63 characters of ASCII alphanumerics
/// and inner hyphens, with the whole name at most 253 characters. The final
/// label cannot be all digits.
///
/// DNS names are case-insensitive, so a hostname is stored lowercased and
/// `WEB01.example.com` equals `web01.example.com`.
///
/// # Examples
///
/// ```rust
/// use cim_command_core::domain::Hostname;
///
/// // Valid hostnames
/// let host = Hostname::new("web01.example.com").unwrap();
/// let short = Hostname::new("localhost").unwrap();
/// assert_eq!(Hostname::new("WEB01.Example.COM").unwrap(), host);
///
/// // Invalid hostnames
/// assert!(Hostname::new("").is_err());  // Empty
/// assert!(Hostname::new("-invalid").is_err());  // Starts with hyphen
/// assert!(Hostname::new("invalid-.com").is_err());  // Ends with hyphen
/// ```
///
/// Deserialization runs the same checks, so a payload carrying an invalid
/// hostname fails at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Maximum total length for FQDN (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length for a single label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Validate and canonicalize a hostname
    ///
    /// The stored form is lowercase.
    pub fn new(hostname: impl Into<String>) -> Result<Self, HostnameError> {
        let mut hostname = hostname.into();

        match hostname.len() {
            0 => return Err(HostnameError::Empty),
            len if len > Self::MAX_LENGTH => return Err(HostnameError::TooLong(len)),
            _ => {}
        }

        hostname.split('.').try_for_each(Self::check_label)?;

        // Top-level label cannot be all digits
        let tld = hostname.rsplit('.').next().unwrap_or_default();
        if tld.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HostnameError::NumericLabel(tld.to_string()));
        }

        hostname.make_ascii_lowercase();
        Ok(Self(hostname))
    }

    fn check_label(label: &str) -> Result<(), HostnameError> {
        if label.is_empty() {
            return Err(HostnameError::Empty);
        }
        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(HostnameError::LabelTooLong(label.to_string()));
        }
        if let Some(bad) = label.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
            return Err(HostnameError::InvalidCharacter(bad));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(HostnameError::InvalidLabelFormat(label.to_string()));
        }
        Ok(())
    }

    /// Get the hostname as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hostname> for String {
    fn from(hostname: Hostname) -> Self {
        hostname.0
    }
}

impl TryFrom<&str> for Hostname {
    type Error = HostnameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("localhost" ; "single label")]
    #[test_case("web01.example.com" ; "fqdn")]
    #[test_case("api-server.prod.us-east-1.example.com" ; "inner hyphens")]
    #[test_case("10.example.com" ; "numeric inner label")]
    #[test_case("a.b" ; "one char labels")]
    fn test_accepts(name: &str) {
        assert_eq!(Hostname::new(name).unwrap().as_str(), name);
    }

    #[test_case("", HostnameError::Empty ; "empty")]
    #[test_case("web..example.com", HostnameError::Empty ; "empty label")]
    #[test_case("-web.example.com", HostnameError::InvalidLabelFormat("-web".into()) ; "leading hyphen")]
    #[test_case("web-.example.com", HostnameError::InvalidLabelFormat("web-".into()) ; "trailing hyphen")]
    #[test_case("web_01.example.com", HostnameError::InvalidCharacter('_') ; "underscore")]
    #[test_case("web.123", HostnameError::NumericLabel("123".into()) ; "numeric tld")]
    fn test_rejects(name: &str, expected: HostnameError) {
        assert_eq!(Hostname::new(name), Err(expected));
    }

    #[test]
    fn test_length_limits() {
        let max_label = "a".repeat(Hostname::MAX_LABEL_LENGTH);
        assert!(Hostname::new(format!("{max_label}.com")).is_ok());

        let long_label = "a".repeat(Hostname::MAX_LABEL_LENGTH + 1);
        assert!(matches!(
            Hostname::new(format!("{long_label}.com")),
            Err(HostnameError::LabelTooLong(_))
        ));

        let long_name = format!("{}.{}.com", "a".repeat(125), "b".repeat(125));
        assert_eq!(Hostname::new(long_name), Err(HostnameError::TooLong(255)));
    }

    #[test]
    fn test_hostname_is_case_insensitive() {
        let upper = Hostname::new("HV01.Example.COM").unwrap();
        let lower = Hostname::new("hv01.example.com").unwrap();

        assert_eq!(upper, lower);
        assert_eq!(upper.to_string(), "hv01.example.com");

        let parsed: Hostname = serde_json::from_str("\"HV01.EXAMPLE.COM\"").unwrap();
        assert_eq!(parsed, lower);
    }

    #[test]
    fn test_deserialize_validates() {
        let host: Hostname = serde_json::from_str("\"web01.example.com\"").unwrap();
        assert_eq!(serde_json::to_string(&host).unwrap(), "\"web01.example.com\"");
        assert!(serde_json::from_str::<Hostname>("\"-bad\"").is_err());
    }
}
