use reqwest::Client;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, info};

use crate::config::ScraperConfig;
use crate::http::{ClientOptions, ProxySettings, build_client};
use crate::models::RawPage;
use crate::utils::error::AppError;
use crate::Result;

/// Retries after the first failed GET. Fixed: one re-attempt, then the error is fatal.
pub const FETCH_RETRIES: usize = 1;

/// Joins the catalog base and an endpoint with exactly one slash between them.
///
/// Only one trailing slash of `base` and one leading slash of `endpoint` are trimmed.
pub fn build_target_uri(base: &str, endpoint: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
    format!("{}/{}", base, endpoint)
}

pub struct CatalogScraper {
    client: Client,
    config: ScraperConfig,
}

impl CatalogScraper {
    pub fn new(config: ScraperConfig, proxy: Option<&ProxySettings>) -> Result<Self> {
        let client = build_client(ClientOptions {
            user_agent: Some(&config.user_agent),
            accept_invalid_certs: config.accept_invalid_certs,
            proxy,
        })?;

        Ok(Self { client, config })
    }

    pub fn target_uri(&self, endpoint: &str) -> String {
        build_target_uri(&self.config.target_url, endpoint)
    }

    /// GETs `uri`, retrying once on any failure (transport error, timeout or non-2xx).
    pub async fn fetch(&self, uri: &str) -> Result<RawPage> {
        let strategy = FixedInterval::from_millis(self.config.retry_delay_ms).take(FETCH_RETRIES);
        let mut attempt = 0usize;

        Retry::spawn(strategy, || {
            attempt += 1;
            let attempt = attempt;
            async move {
                self.fetch_once(uri).await.map_err(|e| {
                    error!("Request to {} failed (attempt {}): {}", uri, attempt, e);
                    e
                })
            }
        })
        .await
    }

    async fn fetch_once(&self, uri: &str) -> Result<RawPage> {
        info!("Fetching catalog page {}", uri);

        let response = self
            .client
            .get(uri)
            .timeout(Duration::from_secs(self.config.request_timeout))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| AppError::Fetch {
                url: uri.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| AppError::Fetch {
            url: uri.to_string(),
            source,
        })?;

        debug!("Received {} bytes with status {}", body.len(), status);

        Ok(RawPage {
            url: uri.to_string(),
            status,
            body,
        })
    }
}
