use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Fallback, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalwareStatus {
    Clean,
    Infected,
    Suspicious,
    Scanning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistStatus {
    Clean,
    Blacklisted,
    Checking,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalwareScanResult {
    pub status: MalwareStatus,
    pub last_scan: DateTime<Utc>,
    pub infected_files: Vec<String>,
    pub threats_detected: u32,
    pub scan_duration: String,
}

impl Fallback for MalwareScanResult {
    fn fallback() -> Self {
        Self {
            status: MalwareStatus::Error,
            last_scan: Utc::now(),
            infected_files: Vec::new(),
            threats_detected: 0,
            scan_duration: "0.00s".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistCheckResult {
    pub status: BlacklistStatus,
    pub services_checked: Vec<String>,
    pub flagged_by: Vec<String>,
    pub last_check: DateTime<Utc>,
}

impl Fallback for BlacklistCheckResult {
    fn fallback() -> Self {
        Self {
            status: BlacklistStatus::Error,
            services_checked: Vec::new(),
            flagged_by: Vec::new(),
            last_check: Utc::now(),
        }
    }
}

/// One outdated core/plugin/theme entry reported by the vulnerability probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdatedSoftware {
    pub name: String,
    pub severity: Severity,
    pub current_version: String,
    pub latest_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityScanResult {
    pub core_vulnerabilities: u32,
    pub plugin_vulnerabilities: u32,
    pub theme_vulnerabilities: u32,
    pub outdated_software: Vec<OutdatedSoftware>,
    /// Informational per-probe score; distinct from the composite
    /// `overall_score` of the full report.
    pub security_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordpress_version: Option<String>,
}

impl VulnerabilityScanResult {
    pub fn total(&self) -> u32 {
        self.core_vulnerabilities + self.plugin_vulnerabilities + self.theme_vulnerabilities
    }
}

impl Fallback for VulnerabilityScanResult {
    // Zero-valued fallback: no counts, neutral local score, no version.
    fn fallback() -> Self {
        Self {
            core_vulnerabilities: 0,
            plugin_vulnerabilities: 0,
            theme_vulnerabilities: 0,
            outdated_software: Vec::new(),
            security_score: 50,
            wordpress_version: None,
        }
    }
}

/// Presence of the seven security response headers, regardless of value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityHeadersResult {
    pub x_frame_options: bool,
    pub x_content_type_options: bool,
    pub x_xss_protection: bool,
    pub strict_transport_security: bool,
    pub content_security_policy: bool,
    pub referrer_policy: bool,
    pub permissions_policy: bool,
}

impl SecurityHeadersResult {
    /// Number of the seven headers that are absent.
    pub fn missing_count(&self) -> u32 {
        [
            self.x_frame_options,
            self.x_content_type_options,
            self.x_xss_protection,
            self.strict_transport_security,
            self.content_security_policy,
            self.referrer_policy,
            self.permissions_policy,
        ]
        .iter()
        .filter(|present| !**present)
        .count() as u32
    }
}

impl Fallback for SecurityHeadersResult {
    fn fallback() -> Self {
        Self::default()
    }
}

/// Baseline hardening checks.
///
/// `file_permissions_secure`, `admin_user_secure`, and
/// `login_attempts_limited` cannot be determined remotely in this deployment
/// mode; they are optimistic on a successful fetch and pessimistic (all
/// false) when the site could not be reached at all. That asymmetry is part
/// of the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineSecurityResult {
    pub ssl_enabled: bool,
    pub file_permissions_secure: bool,
    pub admin_user_secure: bool,
    pub wp_version_hidden: bool,
    pub login_attempts_limited: bool,
    pub security_plugins_active: Vec<String>,
}

impl Fallback for BaselineSecurityResult {
    fn fallback() -> Self {
        Self::default()
    }
}

/// Settled results of all five probes for one target.
///
/// Every field is always populated; a failed probe contributes its
/// [`Fallback`] value, never an absent entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResultBundle {
    pub malware: MalwareScanResult,
    pub blacklist: BlacklistCheckResult,
    pub vulnerability: VulnerabilityScanResult,
    pub headers: SecurityHeadersResult,
    pub baseline: BaselineSecurityResult,
}

/// Final aggregate returned to the caller, serialized with the wire field
/// names downstream report renderers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScanResult {
    pub malware_scan: MalwareScanResult,
    pub blacklist_check: BlacklistCheckResult,
    pub vulnerability_scan: VulnerabilityScanResult,
    pub security_headers: SecurityHeadersResult,
    pub ssl_enabled: bool,
    pub file_permissions_secure: bool,
    pub admin_user_secure: bool,
    pub wp_version_hidden: bool,
    pub login_attempts_limited: bool,
    pub security_plugins_active: Vec<String>,
    /// Composite score in [10, 100].
    pub overall_score: u8,
    /// One human-readable line per scoring rule, in rule order.
    pub score_breakdown: Vec<String>,
    pub scanned_at: DateTime<Utc>,
    pub scan_duration_secs: u64,
}

impl SecurityScanResult {
    pub fn from_bundle(
        bundle: ProbeResultBundle,
        overall_score: u8,
        score_breakdown: Vec<String>,
        scanned_at: DateTime<Utc>,
        scan_duration_secs: u64,
    ) -> Self {
        let baseline = bundle.baseline;
        Self {
            malware_scan: bundle.malware,
            blacklist_check: bundle.blacklist,
            vulnerability_scan: bundle.vulnerability,
            security_headers: bundle.headers,
            ssl_enabled: baseline.ssl_enabled,
            file_permissions_secure: baseline.file_permissions_secure,
            admin_user_secure: baseline.admin_user_secure,
            wp_version_hidden: baseline.wp_version_hidden,
            login_attempts_limited: baseline.login_attempts_limited,
            security_plugins_active: baseline.security_plugins_active,
            overall_score,
            score_breakdown,
            scanned_at,
            scan_duration_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vulnerability_fallback_is_zero_valued() {
        let fallback = VulnerabilityScanResult::fallback();
        assert_eq!(fallback.total(), 0);
        assert_eq!(fallback.security_score, 50);
        assert!(fallback.outdated_software.is_empty());
        assert!(fallback.wordpress_version.is_none());
    }

    #[test]
    fn test_headers_missing_count() {
        let mut headers = SecurityHeadersResult::default();
        assert_eq!(headers.missing_count(), 7);

        headers.x_frame_options = true;
        headers.content_security_policy = true;
        headers.strict_transport_security = true;
        assert_eq!(headers.missing_count(), 4);
    }

    #[test]
    fn test_malware_fallback_status() {
        let fallback = MalwareScanResult::fallback();
        assert_eq!(fallback.status, MalwareStatus::Error);
        assert_eq!(fallback.threats_detected, 0);
        assert!(fallback.infected_files.is_empty());
    }

    #[test]
    fn test_baseline_fallback_is_pessimistic() {
        let fallback = BaselineSecurityResult::fallback();
        assert!(!fallback.ssl_enabled);
        assert!(!fallback.file_permissions_secure);
        assert!(!fallback.admin_user_secure);
        assert!(!fallback.wp_version_hidden);
        assert!(!fallback.login_attempts_limited);
        assert!(fallback.security_plugins_active.is_empty());
    }

    #[test]
    fn test_report_wire_field_names() {
        let bundle = ProbeResultBundle {
            malware: MalwareScanResult::fallback(),
            blacklist: BlacklistCheckResult::fallback(),
            vulnerability: VulnerabilityScanResult::fallback(),
            headers: SecurityHeadersResult::fallback(),
            baseline: BaselineSecurityResult::fallback(),
        };
        let report =
            SecurityScanResult::from_bundle(bundle, 100, vec!["ok".to_string()], Utc::now(), 3);

        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "malware_scan",
            "blacklist_check",
            "vulnerability_scan",
            "security_headers",
            "ssl_enabled",
            "file_permissions_secure",
            "admin_user_secure",
            "wp_version_hidden",
            "login_attempts_limited",
            "security_plugins_active",
            "overall_score",
            "score_breakdown",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {}", key);
        }
        assert_eq!(json["malware_scan"]["status"], "error");
    }
}
