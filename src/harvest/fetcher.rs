//! HTTP page fetching
//!
//! The transport layer is deliberately thin: one GET per page, no retries,
//! no redirect policy beyond the client default. The interesting part is
//! decoding: listing and chapter pages sometimes carry mislabeled latin-1
//! bytes, so payloads are decoded lossily instead of trusting the declared
//! charset.

use crate::config::FetcherConfig;
use crate::markup::decode_lossy;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for every fetch in a run
pub fn build_http_client(config: &FetcherConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its decoded text
///
/// A transport error or a non-success status fails the fetch; how that
/// failure propagates (abandon the translation, keep siblings running) is
/// decided by the caller, not here.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("downloading {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| HarvestError::Http {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|e| HarvestError::Http {
        url: url.to_string(),
        source: e,
    })?;

    Ok(decode_lossy(&bytes))
}
