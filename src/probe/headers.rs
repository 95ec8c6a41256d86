use crate::model::{SecurityHeadersResult, TargetDescriptor};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::debug;

use super::{HTTP_PROBE_TIMEOUT, DEADLINE_SLACK};

/// Security-header probe: one GET to the target origin, then a presence
/// check for seven security response headers. Header values are not
/// inspected, only presence counts.
pub struct HeaderProbe {
    client: reqwest::Client,
}

impl HeaderProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Maps a response header map to the seven presence booleans. Lookup is
/// case-insensitive (reqwest normalizes header names to lowercase).
fn headers_from(headers: &HeaderMap) -> SecurityHeadersResult {
    SecurityHeadersResult {
        x_frame_options: headers.contains_key("x-frame-options"),
        x_content_type_options: headers.contains_key("x-content-type-options"),
        x_xss_protection: headers.contains_key("x-xss-protection"),
        strict_transport_security: headers.contains_key("strict-transport-security"),
        content_security_policy: headers.contains_key("content-security-policy"),
        referrer_policy: headers.contains_key("referrer-policy"),
        permissions_policy: headers.contains_key("permissions-policy"),
    }
}

#[async_trait]
impl super::Probe for HeaderProbe {
    type Output = SecurityHeadersResult;

    fn name(&self) -> &'static str {
        "security-headers"
    }

    fn deadline(&self) -> Duration {
        HTTP_PROBE_TIMEOUT + DEADLINE_SLACK
    }

    async fn run(
        &self,
        target: &TargetDescriptor,
    ) -> Result<SecurityHeadersResult, super::ProbeError> {
        debug!(url = %target.url, "running security-header probe");

        let response = self
            .client
            .get(&target.url)
            .timeout(HTTP_PROBE_TIMEOUT)
            .send()
            .await?;

        let result = headers_from(response.headers());
        debug!(missing = result.missing_count(), "security-header probe finished");
        Ok(result)
    }
}
