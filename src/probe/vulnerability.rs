use crate::inventory::{InventoryClient, InventoryResponse, UpdateInventory, INVENTORY_TIMEOUT};
use crate::model::{
    Fallback, OutdatedSoftware, Severity, TargetDescriptor, VulnerabilityScanResult,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::DEADLINE_SLACK;

/// Vulnerability probe: translates the update inventory of the target site
/// into vulnerability counts and a severity-tagged outdated-software list.
///
/// Degrades silently: a missing API key, an unreachable updates endpoint,
/// or a bad payload all yield the zero-valued fallback instead of a scan
/// failure.
pub struct VulnerabilityProbe {
    inventory: InventoryClient,
}

impl VulnerabilityProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            inventory: InventoryClient::new(client),
        }
    }

    pub fn with_client(inventory: InventoryClient) -> Self {
        Self { inventory }
    }
}

/// Reduces an update inventory to counts, severity entries, and the local
/// informational score.
fn summarize(inventory: &UpdateInventory) -> VulnerabilityScanResult {
    let mut outdated = Vec::new();

    let core_vulnerabilities = u32::from(inventory.wordpress.update_available);
    if inventory.wordpress.update_available {
        outdated.push(OutdatedSoftware {
            name: "WordPress Core".to_string(),
            severity: Severity::High,
            current_version: inventory.wordpress.current_version.clone(),
            latest_version: inventory.wordpress.new_version.clone(),
        });
    }

    for plugin in &inventory.plugins {
        outdated.push(OutdatedSoftware {
            name: plugin.name.clone(),
            severity: Severity::Medium,
            current_version: plugin.current_version.clone(),
            latest_version: plugin.new_version.clone(),
        });
    }

    for theme in &inventory.themes {
        outdated.push(OutdatedSoftware {
            name: theme.name.clone(),
            severity: Severity::Low,
            current_version: theme.current_version.clone(),
            latest_version: theme.new_version.clone(),
        });
    }

    let total = core_vulnerabilities
        + inventory.plugins.len() as u32
        + inventory.themes.len() as u32;
    let security_score = (100i64 - 10 * i64::from(total)).max(0) as u8;

    VulnerabilityScanResult {
        core_vulnerabilities,
        plugin_vulnerabilities: inventory.plugins.len() as u32,
        theme_vulnerabilities: inventory.themes.len() as u32,
        outdated_software: outdated,
        security_score,
        wordpress_version: Some(inventory.wordpress.current_version.clone()),
    }
}

#[async_trait]
impl super::Probe for VulnerabilityProbe {
    type Output = VulnerabilityScanResult;

    fn name(&self) -> &'static str {
        "vulnerability"
    }

    fn deadline(&self) -> Duration {
        INVENTORY_TIMEOUT + DEADLINE_SLACK
    }

    async fn run(
        &self,
        target: &TargetDescriptor,
    ) -> Result<VulnerabilityScanResult, super::ProbeError> {
        let api_key = match &target.api_key {
            Some(key) => key,
            None => {
                debug!(url = %target.url, "no API key configured, skipping update inventory");
                return Ok(VulnerabilityScanResult::fallback());
            }
        };

        match self.inventory.fetch_updates(&target.url, api_key).await {
            Ok(InventoryResponse::Updates(inventory)) => Ok(summarize(&inventory)),
            Ok(InventoryResponse::Unavailable) => {
                warn!(url = %target.url, "updates endpoint has no data, using fallback");
                Ok(VulnerabilityScanResult::fallback())
            }
            Err(e) => {
                warn!(url = %target.url, error = %e, "update inventory fetch failed, using fallback");
                Ok(VulnerabilityScanResult::fallback())
            }
        }
    }
}
