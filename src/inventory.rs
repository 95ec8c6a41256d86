//! Update Inventory Client.
//!
//! Authenticated HTTP client against the remote-management endpoint exposed
//! by the target WordPress installation. Returns the set of available
//! core/plugin/theme updates. Only the vulnerability probe consumes it.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Header carrying the per-site API key.
const API_KEY_HEADER: &str = "X-WRM-API-Key";

/// Path of the updates endpoint relative to the site origin.
const UPDATES_PATH: &str = "/wp-json/wrm/v1/updates";

/// Request timeout for the updates endpoint.
pub const INVENTORY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// Endpoint answered with a client error (bad key, unknown route).
    #[error("updates endpoint returned status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreUpdate {
    pub update_available: bool,
    pub current_version: String,
    pub new_version: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareUpdate {
    pub name: String,
    pub current_version: String,
    pub new_version: String,
}

/// Available updates reported by the remote-management endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInventory {
    pub wordpress: CoreUpdate,
    #[serde(default)]
    pub plugins: Vec<SoftwareUpdate>,
    #[serde(default)]
    pub themes: Vec<SoftwareUpdate>,
}

/// Outcome of one inventory fetch.
///
/// `Unavailable` covers server-side failure (status >= 500): the endpoint
/// exists but has no data to give. Transport and client errors are typed
/// separately so callers never read undefined fields out of a bad payload.
#[derive(Debug, Clone)]
pub enum InventoryResponse {
    Updates(UpdateInventory),
    Unavailable,
}

pub struct InventoryClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl InventoryClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: INVENTORY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches the update inventory for one site. Single attempt, no
    /// retries.
    pub async fn fetch_updates(
        &self,
        base_url: &str,
        api_key: &str,
    ) -> Result<InventoryResponse, InventoryError> {
        let url = format!("{}{}", base_url, UPDATES_PATH);
        debug!(%url, "fetching update inventory");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            debug!(status = status.as_u16(), "updates endpoint unavailable");
            return Ok(InventoryResponse::Unavailable);
        }
        if !status.is_success() {
            return Err(InventoryError::Status(status.as_u16()));
        }

        let inventory: UpdateInventory = response.json().await?;
        debug!(
            plugins = inventory.plugins.len(),
            themes = inventory.themes.len(),
            core_update = inventory.wordpress.update_available,
            "update inventory fetched"
        );
        Ok(InventoryResponse::Updates(inventory))
    }
}
