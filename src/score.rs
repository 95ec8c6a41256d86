//! Score aggregator.
//!
//! Pure reduction of a settled probe bundle to the composite security
//! posture: a 10-100 integer score plus a human-readable breakdown with one
//! line per scoring rule, in fixed rule order (malware, blacklist,
//! vulnerabilities, headers, SSL, baseline checks, bonus). The breakdown
//! order and wording are part of the observable contract. No I/O, never
//! fails.

use crate::model::{BlacklistStatus, MalwareStatus, ProbeResultBundle};

/// Lowest score a scan can produce. Kept above zero so even a
/// catastrophic report never renders as 0/100.
const SCORE_FLOOR: f64 = 10.0;
const SCORE_CEILING: f64 = 100.0;

/// Per-missing-header deduction. Deliberately fractional; rounding happens
/// once at the end.
const HEADER_DEDUCTION: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    /// Composite score in [10, 100].
    pub overall_score: u8,
    /// One line per rule, in rule order, whether or not it deducted.
    pub breakdown: Vec<String>,
}

/// Reduces the probe bundle to the composite score and breakdown.
///
/// Deductions are independent; each is computed from the bundle alone.
/// Rounding is half-up, applied once after the clamp.
pub fn aggregate(bundle: &ProbeResultBundle) -> ScoreSummary {
    let mut deductions = 0.0f64;
    let mut breakdown = Vec::with_capacity(7);

    let (malware_deduction, malware_line) = match bundle.malware.status {
        MalwareStatus::Infected => (
            30.0,
            format!(
                "Malware: infected, {} threat(s) detected (-30)",
                bundle.malware.threats_detected
            ),
        ),
        MalwareStatus::Suspicious => (15.0, "Malware: suspicious activity detected (-15)".into()),
        MalwareStatus::Error => (5.0, "Malware: scan unavailable (-5)".into()),
        MalwareStatus::Clean | MalwareStatus::Scanning => (0.0, "Malware: clean".into()),
    };
    deductions += malware_deduction;
    breakdown.push(malware_line);

    let (blacklist_deduction, blacklist_line) = match bundle.blacklist.status {
        BlacklistStatus::Blacklisted => (
            25.0,
            format!(
                "Blacklist: flagged by {} service(s) (-25)",
                bundle.blacklist.flagged_by.len()
            ),
        ),
        BlacklistStatus::Error => (3.0, "Blacklist: check unavailable (-3)".into()),
        BlacklistStatus::Clean | BlacklistStatus::Checking => (0.0, "Blacklist: clean".into()),
    };
    deductions += blacklist_deduction;
    breakdown.push(blacklist_line);

    let total_vulnerabilities = bundle.vulnerability.total();
    let (vuln_deduction, vuln_line) = match total_vulnerabilities {
        0 => (0.0, "Vulnerabilities: none found".into()),
        n @ 1..=5 => (10.0, format!("Vulnerabilities: {} found (-10)", n)),
        n @ 6..=10 => (15.0, format!("Vulnerabilities: {} found (-15)", n)),
        n => (25.0, format!("Vulnerabilities: {} found (-25)", n)),
    };
    deductions += vuln_deduction;
    breakdown.push(vuln_line);

    let missing_headers = bundle.headers.missing_count();
    if missing_headers > 0 {
        let header_deduction = f64::from(missing_headers) * HEADER_DEDUCTION;
        deductions += header_deduction;
        breakdown.push(format!(
            "Security headers: {} of 7 missing (-{})",
            missing_headers, header_deduction
        ));
    } else {
        breakdown.push("Security headers: all present".into());
    }

    // Certificate-warning flag is stubbed; no probe sets it yet.
    let ssl_warning = false;
    if !bundle.baseline.ssl_enabled {
        deductions += 8.0;
        breakdown.push("SSL: not enabled (-8)".into());
    } else if ssl_warning {
        deductions += 3.0;
        breakdown.push("SSL: certificate warning (-3)".into());
    } else {
        breakdown.push("SSL: enabled".into());
    }

    let mut baseline_deduction = 0.0;
    if !bundle.baseline.file_permissions_secure {
        baseline_deduction += 2.0;
    }
    if !bundle.baseline.admin_user_secure {
        baseline_deduction += 2.0;
    }
    if !bundle.baseline.wp_version_hidden {
        baseline_deduction += 2.0;
    }
    if !bundle.baseline.login_attempts_limited {
        baseline_deduction += 1.0;
    }
    deductions += baseline_deduction;
    if baseline_deduction > 0.0 {
        breakdown.push(format!("Baseline checks: issues found (-{})", baseline_deduction));
    } else {
        breakdown.push("Baseline checks: all passed".into());
    }

    let active_plugins = bundle.baseline.security_plugins_active.len();
    let bonus = if active_plugins > 0 {
        breakdown.push(format!(
            "Security plugins: {} active (+2)",
            active_plugins
        ));
        2.0
    } else {
        breakdown.push("Security plugins: none active".into());
        0.0
    };

    let raw = SCORE_CEILING - deductions + bonus;
    let overall_score = raw.clamp(SCORE_FLOOR, SCORE_CEILING).round() as u8;

    ScoreSummary {
        overall_score,
        breakdown,
    }
}
