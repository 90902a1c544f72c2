use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::info;

use crate::config::NotificationsConfig;
use crate::http::{ClientOptions, ProxySettings, build_client};
use crate::models::NotificationPayload;
use crate::utils::error::AppError;
use crate::Result;

/// Delivery channel for match alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, payload: &NotificationPayload) -> Result<()>;
}

/// Publishes to an ntfy topic with a plain-text body and header metadata.
pub struct NtfyNotifier {
    client: Client,
    config: NotificationsConfig,
}

impl NtfyNotifier {
    pub fn new(config: NotificationsConfig, proxy: Option<&ProxySettings>) -> Result<Self> {
        let client = build_client(ClientOptions {
            proxy,
            ..ClientOptions::default()
        })?;

        Ok(Self { client, config })
    }

    fn build_headers(&self, payload: &NotificationPayload) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, "title", &payload.title)?;
        insert_header(&mut headers, "click", &payload.click_url)?;
        insert_header(&mut headers, "priority", &payload.priority.to_string())?;
        insert_header(&mut headers, "tags", &payload.tags_header())?;

        if let Some(icon) = &payload.icon {
            insert_header(&mut headers, "icon", icon)?;
        }

        Ok(headers)
    }
}

// Header values are sent as raw UTF-8 so accented product names survive
fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_bytes(value.as_bytes()).map_err(|e| AppError::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

#[async_trait]
impl Notifier for NtfyNotifier {
    fn name(&self) -> &str {
        "ntfy"
    }

    async fn notify(&self, payload: &NotificationPayload) -> Result<()> {
        let headers = self.build_headers(payload)?;

        info!("Notifying found products to `{}`", payload.channel_url);

        self.client
            .post(&payload.channel_url)
            .headers(headers)
            .body(payload.body.clone().into_bytes())
            .timeout(Duration::from_secs(self.config.request_timeout))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| AppError::Notify {
                url: payload.channel_url.clone(),
                source,
            })?;

        Ok(())
    }
}
