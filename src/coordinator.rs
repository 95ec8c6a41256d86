//! Probe coordinator.
//!
//! Fires all five probes for one target concurrently and waits for every
//! one of them to settle. A probe that errors, times out, or returns
//! malformed data degrades to its fallback value locally; it never
//! propagates and never cancels sibling probes, so the caller always
//! receives a complete bundle. Total wall-clock time is bounded by the
//! slowest probe's own deadline.

use crate::model::{Fallback, ProbeOutcome, ProbeResultBundle, TargetDescriptor};
use crate::probe::{
    BaselineProbe, BlacklistProbe, HeaderProbe, MalwareProbe, Probe, VulnerabilityProbe,
};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{info, warn};

pub struct ProbeCoordinator {
    malware: MalwareProbe,
    blacklist: BlacklistProbe,
    vulnerability: VulnerabilityProbe,
    headers: HeaderProbe,
    baseline: BaselineProbe,
}

impl ProbeCoordinator {
    /// Builds the coordinator with its five probes sharing one HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            malware: MalwareProbe,
            blacklist: BlacklistProbe,
            vulnerability: VulnerabilityProbe::new(client.clone()),
            headers: HeaderProbe::new(client.clone()),
            baseline: BaselineProbe::new(client),
        }
    }

    /// Runs all probes concurrently and returns the complete result
    /// bundle, even if every probe fails.
    pub async fn run_all(&self, target: &TargetDescriptor) -> ProbeResultBundle {
        let started = Instant::now();
        info!(url = %target.url, website_id = target.website_id, "starting probe run");

        let (malware, blacklist, vulnerability, headers, baseline) = tokio::join!(
            settle(&self.malware, target),
            settle(&self.blacklist, target),
            settle(&self.vulnerability, target),
            settle(&self.headers, target),
            settle(&self.baseline, target),
        );

        info!(
            duration_secs = started.elapsed().as_secs(),
            "probe run settled"
        );

        ProbeResultBundle {
            malware: malware.into_inner(),
            blacklist: blacklist.into_inner(),
            vulnerability: vulnerability.into_inner(),
            headers: headers.into_inner(),
            baseline: baseline.into_inner(),
        }
    }
}

/// Runs one probe under its deadline and converts any failure into the
/// output type's fallback value.
async fn settle<P: Probe>(probe: &P, target: &TargetDescriptor) -> ProbeOutcome<P::Output> {
    match timeout(probe.deadline(), probe.run(target)).await {
        Ok(Ok(value)) => ProbeOutcome::Ok(value),
        Ok(Err(e)) => {
            warn!(probe = probe.name(), error = %e, "probe failed, degrading to fallback");
            ProbeOutcome::Degraded(P::Output::fallback())
        }
        Err(_) => {
            warn!(
                probe = probe.name(),
                deadline_secs = probe.deadline().as_secs(),
                "probe deadline exceeded, degrading to fallback"
            );
            ProbeOutcome::Degraded(P::Output::fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlacklistStatus, MalwareStatus};
    use crate::probe::ProbeError;
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker(&'static str);

    impl Fallback for Marker {
        fn fallback() -> Self {
            Marker("fallback")
        }
    }

    enum Behavior {
        Succeed,
        Fail,
        Hang,
    }

    struct FakeProbe {
        behavior: Behavior,
    }

    #[async_trait]
    impl Probe for FakeProbe {
        type Output = Marker;

        fn name(&self) -> &'static str {
            "fake"
        }

        fn deadline(&self) -> Duration {
            Duration::from_secs(1)
        }

        async fn run(&self, _target: &TargetDescriptor) -> Result<Marker, ProbeError> {
            match self.behavior {
                Behavior::Succeed => Ok(Marker("ok")),
                Behavior::Fail => Err(ProbeError::Malformed("bad payload".to_string())),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(Marker("too late"))
                }
            }
        }
    }

    fn target() -> TargetDescriptor {
        TargetDescriptor::new("https://example.com", 1, 1)
    }

    #[tokio::test]
    async fn test_settle_success() {
        let probe = FakeProbe {
            behavior: Behavior::Succeed,
        };
        let outcome = settle(&probe, &target()).await;
        assert_eq!(outcome, ProbeOutcome::Ok(Marker("ok")));
    }

    #[tokio::test]
    async fn test_settle_error_degrades_to_fallback() {
        let probe = FakeProbe {
            behavior: Behavior::Fail,
        };
        let outcome = settle(&probe, &target()).await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), Marker("fallback"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_deadline_degrades_to_fallback() {
        let probe = FakeProbe {
            behavior: Behavior::Hang,
        };
        let outcome = settle(&probe, &target()).await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), Marker("fallback"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_probe_does_not_alter_sibling() {
        let ok_probe = FakeProbe {
            behavior: Behavior::Succeed,
        };
        let target = target();

        let (with_failure, _) = tokio::join!(
            settle(&ok_probe, &target),
            settle(
                &FakeProbe {
                    behavior: Behavior::Hang
                },
                &target
            ),
        );
        let alone = settle(&ok_probe, &target).await;

        assert_eq!(with_failure, alone);
    }

    #[tokio::test]
    async fn test_run_all_is_total_for_unreachable_target() {
        // Nothing listens on port 9; both HTTP probes degrade while the
        // stub probes still succeed.
        let coordinator = ProbeCoordinator::new(reqwest::Client::new());
        let target = TargetDescriptor::new("http://127.0.0.1:9", 1, 1);

        let bundle = coordinator.run_all(&target).await;

        assert_eq!(bundle.malware.status, MalwareStatus::Clean);
        assert_eq!(bundle.blacklist.status, BlacklistStatus::Clean);
        assert_eq!(bundle.vulnerability.security_score, 50);
        assert_eq!(bundle.headers.missing_count(), 7);
        assert!(!bundle.baseline.ssl_enabled);
        assert!(!bundle.baseline.wp_version_hidden);
    }
}
