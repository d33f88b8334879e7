// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS Names for Zones, Records and TLS Coverage

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected DNS name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name is {0} characters long, more than 253")]
    TooLong(usize),

    #[error("Label {0} is longer than 63 characters")]
    LabelTooLong(String),

    #[error("Character '{0}' is not allowed in a DNS name")]
    InvalidCharacter(char),

    #[error("Label {0} starts or ends with a hyphen")]
    InvalidLabelFormat(String),

    #[error("Top-level label cannot be all numeric: {0}")]
    NumericLabel(String),

    #[error("Wildcard label is only allowed in leftmost position: {0}")]
    MisplacedWildcard(String),
}

/// Domain name value object
///
/// Represents a DNS name as used for zones, certificates, CDN aliases and
/// record names. Invariants:
/// - Total length ≤ 253 characters (excluding an optional trailing dot)
/// - Each label ≤ 63 characters
/// - Labels contain only alphanumerics and hyphens, not at either end
/// - A label may start with `_` (service labels such as `_domainkey`)
/// - The leftmost label may be `*` (wildcard)
/// - The top-level label is not all numeric
/// - Stored lowercase without a trailing dot, so equality is DNS equality
///
/// # Examples
///
/// ```rust
/// use reclaimers_infrastructure::domain::Hostname;
///
/// let host = Hostname::new("c20.reclaimers.net").unwrap();
/// let wildcard = Hostname::new("*.reclaimers.net").unwrap();
/// assert!(wildcard.is_wildcard());
/// assert!(host.matches(&wildcard));
/// assert_eq!(Hostname::new("WWW.Reclaimers.NET.").unwrap().as_str(), "www.reclaimers.net");
///
/// assert!(Hostname::new("").is_err());
/// assert!(Hostname::new("a.*.net").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Longest full name (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Longest label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Parse and normalize a DNS name
    pub fn new(hostname: impl Into<String>) -> Result<Self, HostnameError> {
        let hostname = hostname.into();
        let hostname = hostname.strip_suffix('.').unwrap_or(&hostname).to_lowercase();

        if hostname.is_empty() {
            return Err(HostnameError::Empty);
        }

        if hostname.len() > Self::MAX_LENGTH {
            return Err(HostnameError::TooLong(hostname.len()));
        }

        let labels: Vec<&str> = hostname.split('.').collect();
        for (position, label) in labels.iter().enumerate() {
            if *label == "*" {
                if position != 0 {
                    return Err(HostnameError::MisplacedWildcard(hostname.clone()));
                }
                continue;
            }
            Self::validate_label(label)?;
        }

        if let Some(tld) = labels.last() {
            if labels.len() > 1 && tld.chars().all(|c| c.is_ascii_digit()) {
                return Err(HostnameError::NumericLabel(tld.to_string()));
            }
        }

        Ok(Self(hostname))
    }

    /// Check one label; `_` may lead service labels
    fn validate_label(label: &str) -> Result<(), HostnameError> {
        if label.is_empty() {
            return Err(HostnameError::Empty);
        }

        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(HostnameError::LabelTooLong(label.to_string()));
        }

        let body = label.strip_prefix('_').unwrap_or(label);
        for ch in body.chars() {
            if !ch.is_ascii_alphanumeric() && ch != '-' {
                return Err(HostnameError::InvalidCharacter(ch));
            }
        }

        if body.is_empty() || body.starts_with('-') || body.ends_with('-') {
            return Err(HostnameError::InvalidLabelFormat(label.to_string()));
        }

        Ok(())
    }

    /// Normalized text of the name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute form with the trailing root dot
    pub fn to_absolute(&self) -> String {
        format!("{}.", self.0)
    }

    /// Whether the leftmost label is `*`
    pub fn is_wildcard(&self) -> bool {
        self.0.starts_with("*.")
    }

    /// Wildcard name covering every direct child of this name
    pub fn wildcard(&self) -> Self {
        Self(format!("*.{}", self.0))
    }

    /// Prefix a child label onto this name
    pub fn child(&self, label: &str) -> Result<Self, HostnameError> {
        Self::new(format!("{}.{}", label, self.0))
    }

    /// Whether this name equals `zone` or sits underneath it
    pub fn is_within(&self, zone: &Hostname) -> bool {
        self.0 == zone.0 || self.0.ends_with(&format!(".{}", zone.0))
    }

    /// Whether a certificate issued for `pattern` covers this name
    pub fn matches(&self, pattern: &Hostname) -> bool {
        match pattern.0.strip_prefix("*.") {
            Some(parent) => self
                .0
                .split_once('.')
                .map(|(label, rest)| label != "*" && rest == parent)
                .unwrap_or(false),
            None => self.0 == pattern.0,
        }
    }

    /// Labels from leftmost to top-level
    pub fn labels(&self) -> Vec<&str> {
        self.0.split('.').collect()
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

impl From<Hostname> for String {
    fn from(value: Hostname) -> Self {
        value.0
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
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
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("reclaimers.net" ; "zone apex")]
    #[test_case("c20.reclaimers.net" ; "wiki alias")]
    #[test_case("*.reclaimers.net" ; "certificate wildcard")]
    #[test_case("fm1._domainkey.reclaimers.net" ; "dkim selector")]
    #[test_case("in1-smtp.messagingengine.com." ; "absolute mail exchange")]
    #[test_case("fm3.reclaimers.net.dkim.fmhosted.com" ; "dkim target")]
    fn test_deployment_names_accepted(name: &str) {
        assert!(Hostname::new(name).is_ok(), "{} rejected", name);
    }

    #[test_case("", HostnameError::Empty ; "empty")]
    #[test_case(".", HostnameError::Empty ; "root dot only")]
    #[test_case("c20..reclaimers.net", HostnameError::Empty ; "empty label")]
    #[test_case("-c20.reclaimers.net", HostnameError::InvalidLabelFormat("-c20".to_string()) ; "leading hyphen")]
    #[test_case("c20-.reclaimers.net", HostnameError::InvalidLabelFormat("c20-".to_string()) ; "trailing hyphen")]
    #[test_case("_.reclaimers.net", HostnameError::InvalidLabelFormat("_".to_string()) ; "bare underscore")]
    #[test_case("fm_1.reclaimers.net", HostnameError::InvalidCharacter('_') ; "inner underscore")]
    #[test_case("discord gg.reclaimers.net", HostnameError::InvalidCharacter(' ') ; "space")]
    #[test_case("108.61.232.93", HostnameError::NumericLabel("93".to_string()) ; "ip address")]
    #[test_case("www.*.reclaimers.net", HostnameError::MisplacedWildcard("www.*.reclaimers.net".to_string()) ; "inner wildcard")]
    fn test_malformed_names_rejected(name: &str, expected: HostnameError) {
        assert_eq!(Hostname::new(name), Err(expected));
    }

    #[test]
    fn test_label_and_name_ceilings() {
        let root = Hostname::new("reclaimers.net").unwrap();
        assert!(root.child(&"w".repeat(Hostname::MAX_LABEL_LENGTH)).is_ok());
        assert_eq!(
            root.child(&"w".repeat(Hostname::MAX_LABEL_LENGTH + 1)),
            Err(HostnameError::LabelTooLong("w".repeat(64)))
        );

        let labels = vec!["a".repeat(60); 4].join(".");
        let name = format!("{}.reclaimers.net", labels);
        assert_eq!(Hostname::new(name.as_str()), Err(HostnameError::TooLong(name.len())));
    }

    #[test]
    fn test_json_form_is_validated() {
        let host: Hostname = serde_json::from_str("\"Play.Reclaimers.Net\"").unwrap();
        assert_eq!(host.labels(), vec!["play", "reclaimers", "net"]);
        assert_eq!(serde_json::to_string(&host).unwrap(), "\"play.reclaimers.net\"");
        assert!(serde_json::from_str::<Hostname>("\"disord..reclaimers.net\"").is_err());
    }

    #[test]
    fn test_canonical_form() {
        let host = Hostname::new("WWW.Reclaimers.NET.").unwrap();
        assert_eq!(host.as_str(), "www.reclaimers.net");
        assert_eq!(host.to_absolute(), "www.reclaimers.net.");
        assert_eq!(host, Hostname::new("www.reclaimers.net").unwrap());
    }

    #[test]
    fn test_wildcard_matching() {
        let root = Hostname::new("reclaimers.net").unwrap();
        let wildcard = root.wildcard();
        assert_eq!(wildcard.as_str(), "*.reclaimers.net");

        assert!(Hostname::new("c20.reclaimers.net").unwrap().matches(&wildcard));
        assert!(!root.matches(&wildcard));
        assert!(!Hostname::new("a.b.reclaimers.net").unwrap().matches(&wildcard));
        assert!(root.matches(&root));
    }

    #[test]
    fn test_zone_membership() {
        let zone = Hostname::new("reclaimers.net").unwrap();
        assert!(zone.child("play").unwrap().is_within(&zone));
        assert!(zone.is_within(&zone));
        assert!(!Hostname::new("notreclaimers.net").unwrap().is_within(&zone));
    }
}
