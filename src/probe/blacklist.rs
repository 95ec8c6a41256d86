use crate::model::{BlacklistCheckResult, BlacklistStatus, TargetDescriptor};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

/// Reputation services the check claims to consult.
const REPUTATION_SERVICES: [&str; 4] = [
    "Google Safe Browsing",
    "Norton Safe Web",
    "McAfee SiteAdvisor",
    "Sucuri SiteCheck",
];

/// Blacklist probe.
///
/// Placeholder for real reputation-list lookups; reports the target as not
/// flagged by any service.
pub struct BlacklistProbe;

#[async_trait]
impl super::Probe for BlacklistProbe {
    type Output = BlacklistCheckResult;

    fn name(&self) -> &'static str {
        "blacklist"
    }

    fn deadline(&self) -> Duration {
        Duration::from_secs(5)
    }

    async fn run(
        &self,
        target: &TargetDescriptor,
    ) -> Result<BlacklistCheckResult, super::ProbeError> {
        debug!(url = %target.url, "running blacklist probe");

        Ok(BlacklistCheckResult {
            status: BlacklistStatus::Clean,
            services_checked: REPUTATION_SERVICES.iter().map(|s| s.to_string()).collect(),
            flagged_by: Vec::new(),
            last_check: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Probe;

    #[tokio::test]
    async fn test_stub_reports_not_listed() {
        let target = TargetDescriptor::new("https://example.com", 1, 1);
        let result = BlacklistProbe.run(&target).await.unwrap();

        assert_eq!(result.status, BlacklistStatus::Clean);
        assert_eq!(result.services_checked.len(), 4);
        assert!(result.flagged_by.is_empty());
    }
}
