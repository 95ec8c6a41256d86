use crate::model::{MalwareScanResult, MalwareStatus, TargetDescriptor};
use async_trait::async_trait;
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Malware probe.
///
/// Placeholder for a real signature-scanning service; reports the target as
/// clean. Kept behind the [`Probe`](super::Probe) contract so a real
/// implementation can replace it without touching the coordinator.
pub struct MalwareProbe;

#[async_trait]
impl super::Probe for MalwareProbe {
    type Output = MalwareScanResult;

    fn name(&self) -> &'static str {
        "malware"
    }

    fn deadline(&self) -> Duration {
        Duration::from_secs(5)
    }

    async fn run(&self, target: &TargetDescriptor) -> Result<MalwareScanResult, super::ProbeError> {
        let started = Instant::now();
        debug!(url = %target.url, "running malware probe");

        Ok(MalwareScanResult {
            status: MalwareStatus::Clean,
            last_scan: Utc::now(),
            infected_files: Vec::new(),
            threats_detected: 0,
            scan_duration: format!("{:.2}s", started.elapsed().as_secs_f64()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Probe;

    #[tokio::test]
    async fn test_stub_reports_clean() {
        let target = TargetDescriptor::new("https://example.com", 1, 1);
        let result = MalwareProbe.run(&target).await.unwrap();

        assert_eq!(result.status, MalwareStatus::Clean);
        assert_eq!(result.threats_detected, 0);
        assert!(result.infected_files.is_empty());
        assert!(result.scan_duration.ends_with('s'));
    }
}
