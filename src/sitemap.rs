//! Sitemap ping: notify a search engine that the sitemap changed.

use crate::config::SitemapConfig;
use crate::error::SitemapError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a successful ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResult {
    pub sitemap_url: String,
    pub endpoint: String,
    pub status: u16,
}

/// Resolve the sitemap URL to announce. An explicit argument wins over the
/// configured `[sitemap] url`; neither present is an error. Relative URLs
/// are joined to `base_url`.
pub fn resolve_sitemap_url(
    config: &SitemapConfig,
    explicit: Option<&str>,
) -> Result<String, SitemapError> {
    let url = explicit
        .map(str::to_string)
        .or_else(|| config.url.clone())
        .ok_or(SitemapError::SitemapNotFound)?;

    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url);
    }

    let base = config
        .base_url
        .as_deref()
        .ok_or_else(|| SitemapError::InvalidUrl(format!("relative URL without base_url: {}", url)))?;
    Ok(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    ))
}

/// Ping the configured search engine with the sitemap URL. With
/// `sitemap_url = None` the configured location is announced; otherwise the
/// given URL is forwarded verbatim to resolution.
pub fn ping_google(
    config: &SitemapConfig,
    sitemap_url: Option<&str>,
) -> Result<PingResult, SitemapError> {
    let sitemap_url = resolve_sitemap_url(config, sitemap_url)?;
    debug!(sitemap_url = %sitemap_url, endpoint = %config.ping_endpoint, "Pinging search engine");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| SitemapError::PingFailed(format!("Failed to create runtime: {}", e)))?;
    let status = rt.block_on(send_ping(&config.ping_endpoint, &sitemap_url))?;

    info!(sitemap_url = %sitemap_url, status, "Sitemap ping accepted");
    Ok(PingResult {
        sitemap_url,
        endpoint: config.ping_endpoint.clone(),
        status,
    })
}

async fn send_ping(endpoint: &str, sitemap_url: &str) -> Result<u16, SitemapError> {
    let client = reqwest::Client::builder()
        .timeout(PING_TIMEOUT)
        .build()
        .map_err(|e| SitemapError::PingFailed(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(endpoint)
        .query(&[("sitemap", sitemap_url)])
        .send()
        .await
        .map_err(|e| SitemapError::PingFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SitemapError::PingFailed(format!(
            "{} returned status {}",
            endpoint, status
        )));
    }
    Ok(status.as_u16())
}
