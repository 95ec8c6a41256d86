//! Security probes.
//!
//! This module provides the [`Probe`] trait and the five implementations
//! that inspect one security dimension of a target site each.
//!
//! # Available Probes
//!
//! | Probe | Checks | Network |
//! |-------|--------|---------|
//! | [`MalwareProbe`] | Malware infection status | stub |
//! | [`BlacklistProbe`] | Reputation-list status | stub |
//! | [`VulnerabilityProbe`] | Outdated core/plugins/themes | updates endpoint |
//! | [`HeaderProbe`] | Security response headers | one GET |
//! | [`BaselineProbe`] | SSL, version disclosure, hardening | one GET |
//!
//! Every probe produces either its typed result or a typed error; the
//! coordinator converts errors and timeouts into the result type's
//! [`Fallback`](crate::model::Fallback) value. Swapping a stub probe for a
//! real network-backed implementation requires no change to the coordinator
//! or the aggregator.

mod baseline;
mod blacklist;
mod headers;
mod malware;
mod vulnerability;

pub use baseline::BaselineProbe;
pub use blacklist::BlacklistProbe;
pub use headers::HeaderProbe;
pub use malware::MalwareProbe;
pub use vulnerability::VulnerabilityProbe;

use crate::model::{Fallback, TargetDescriptor};
use async_trait::async_trait;
use std::time::Duration;

/// Request timeout for the plain HTTP GET probes.
pub const HTTP_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Scheduling slack added on top of a probe's own request timeout when the
/// coordinator computes the outer deadline.
pub(crate) const DEADLINE_SLACK: Duration = Duration::from_secs(2);

/// Failure of a single probe. Always recovered locally by the coordinator,
/// never surfaced to the scan caller.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// An independent unit of work inspecting one security dimension of a
/// target.
#[async_trait]
pub trait Probe: Send + Sync {
    /// The probe's typed result. Its [`Fallback`] value stands in when the
    /// probe errors or exceeds its deadline.
    type Output: Fallback + Send;

    /// Human-readable probe name, used in logs.
    fn name(&self) -> &'static str;

    /// Hard outer bound on one invocation, enforced by the coordinator.
    ///
    /// Set to the probe's own request timeout plus scheduling slack, so a
    /// stalled socket cannot leak past the request timeout.
    fn deadline(&self) -> Duration;

    /// Runs the probe against one target.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure. Probes with an internal
    /// silent-degrade policy (the vulnerability probe) return their
    /// fallback value instead of erroring.
    async fn run(&self, target: &TargetDescriptor) -> Result<Self::Output, ProbeError>;
}
