//! Scan session: the orchestrating entry point for one target.

use crate::coordinator::ProbeCoordinator;
use crate::model::{SecurityScanResult, TargetDescriptor};
use crate::score::aggregate;
use chrono::Utc;
use std::time::Instant;
use tracing::info;

/// One-target scan session wiring the probe coordinator and the score
/// aggregator together.
///
/// # Example
///
/// ```no_run
/// use wpguard::model::TargetDescriptor;
/// use wpguard::session::ScanSession;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let session = ScanSession::new("wpguard/0.1")?;
///     let target = TargetDescriptor::new("https://example.com", 42, 7);
///
///     let report = session.run(&target).await;
///     println!("score: {}", report.overall_score);
///     Ok(())
/// }
/// ```
pub struct ScanSession {
    coordinator: ProbeCoordinator,
}

impl ScanSession {
    /// Builds a session with a fresh HTTP client shared by all probes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            coordinator: ProbeCoordinator::new(client),
        })
    }

    /// Runs the full scan for one target.
    ///
    /// Never fails: probe failures degrade to their fallback values and the
    /// aggregation is total, so the caller always receives a complete
    /// report with every field populated.
    pub async fn run(&self, target: &TargetDescriptor) -> SecurityScanResult {
        let scanned_at = Utc::now();
        let started = Instant::now();

        let bundle = self.coordinator.run_all(target).await;
        let summary = aggregate(&bundle);

        let duration_secs = started.elapsed().as_secs();
        info!(
            url = %target.url,
            website_id = target.website_id,
            score = summary.overall_score,
            duration_secs,
            "scan session complete"
        );

        SecurityScanResult::from_bundle(
            bundle,
            summary.overall_score,
            summary.breakdown,
            scanned_at,
            duration_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MalwareStatus;

    #[tokio::test]
    async fn test_session_is_total_for_unreachable_target() {
        let session = ScanSession::new("wpguard-test").unwrap();
        let target = TargetDescriptor::new("http://127.0.0.1:9", 3, 5);

        let report = session.run(&target).await;

        // Both HTTP probes degrade pessimistically; the stubs stay clean.
        assert_eq!(report.malware_scan.status, MalwareStatus::Clean);
        assert!(!report.ssl_enabled);
        assert!(!report.wp_version_hidden);
        assert_eq!(report.security_headers.missing_count(), 7);
        assert_eq!(report.score_breakdown.len(), 7);
        // 7 missing headers (-10.5), no ssl (-8), all baseline false (-7).
        assert_eq!(report.overall_score, 75);
    }
}
