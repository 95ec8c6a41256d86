//! Core data types for scan targets, probe results, and the final report.
//!
//! This module contains the fundamental types used throughout wpguard:
//!
//! - [`TargetDescriptor`] - The website a scan session runs against
//! - [`ProbeOutcome`] - Settled result of one probe (ok or degraded)
//! - [`Fallback`] - The designated error-fallback value of a result type
//! - [`SecurityScanResult`] - Complete scan results
//!
//! # Example
//!
//! ```
//! use wpguard::model::TargetDescriptor;
//!
//! let target = TargetDescriptor::new("https://example.com/", 42, 7)
//!     .with_api_key("wrm-key");
//!
//! assert_eq!(target.url, "https://example.com");
//! assert!(target.ssl_enabled());
//! ```

mod report;

pub use report::*;
use serde::{Deserialize, Serialize};

/// The website one scan session runs against.
///
/// Immutable input to a scan session, created by the caller (report
/// generation or an on-demand scan trigger). Never persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Site origin, trailing slash stripped.
    pub url: String,
    pub website_id: u64,
    pub user_id: u64,
    /// Per-site remote-management API key, if one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl TargetDescriptor {
    pub fn new(url: impl Into<String>, website_id: u64, user_id: u64) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        Self {
            url,
            website_id,
            user_id,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// True when the target origin uses HTTPS.
    pub fn ssl_enabled(&self) -> bool {
        self.url.starts_with("https://")
    }
}

/// Severity of an outdated software entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The designated error-fallback value of a probe result type.
///
/// Every probe result type has a conservative/neutral substitute value that
/// stands in when the underlying check could not be completed. A failing
/// probe never produces an absent field, only this value, which is what
/// keeps the score aggregator total.
pub trait Fallback {
    fn fallback() -> Self;
}

/// Settled result of one probe invocation.
///
/// Both branches carry a value of the same type: `Degraded` holds the
/// result type's [`Fallback`] value rather than an error, so downstream
/// aggregation treats success and failure uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome<T> {
    Ok(T),
    Degraded(T),
}

impl<T> ProbeOutcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            ProbeOutcome::Ok(v) | ProbeOutcome::Degraded(v) => v,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ProbeOutcome::Degraded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_strips_trailing_slash() {
        let target = TargetDescriptor::new("https://example.com/", 1, 1);
        assert_eq!(target.url, "https://example.com");

        let target = TargetDescriptor::new("https://example.com///", 1, 1);
        assert_eq!(target.url, "https://example.com");

        let target = TargetDescriptor::new("https://example.com", 1, 1);
        assert_eq!(target.url, "https://example.com");
    }

    #[test]
    fn test_target_ssl_enabled() {
        assert!(TargetDescriptor::new("https://example.com", 1, 1).ssl_enabled());
        assert!(!TargetDescriptor::new("http://example.com", 1, 1).ssl_enabled());
    }

    #[test]
    fn test_target_api_key_builder() {
        let target = TargetDescriptor::new("https://example.com", 1, 1);
        assert!(target.api_key.is_none());

        let target = target.with_api_key("secret");
        assert_eq!(target.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_probe_outcome_into_inner() {
        assert_eq!(ProbeOutcome::Ok(3).into_inner(), 3);
        assert_eq!(ProbeOutcome::Degraded(7).into_inner(), 7);
    }

    #[test]
    fn test_probe_outcome_is_degraded() {
        assert!(!ProbeOutcome::Ok(()).is_degraded());
        assert!(ProbeOutcome::Degraded(()).is_degraded());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Severity::Low).unwrap(), "\"low\"");
    }
}
