use crate::config::NotificationsConfig;
use crate::models::{MatchSet, Query};

/// Everything needed for one ntfy POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub channel_url: String,
    pub title: String,
    pub click_url: String,
    pub priority: u8,
    pub tags: Vec<String>,
    pub icon: Option<String>,
    pub body: String,
}

impl NotificationPayload {
    pub fn build(
        query: &Query,
        matches: &MatchSet,
        target_uri: &str,
        config: &NotificationsConfig,
    ) -> Self {
        let body = matches
            .iter()
            .map(|title| format!("- {}", title))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            channel_url: channel_url(&config.base_url, target_uri),
            title: format!("Sacaron {}!!", query.display_name),
            click_url: target_uri.to_string(),
            priority: config.priority,
            tags: config.tags.clone(),
            icon: config.icon.clone(),
            body,
        }
    }

    /// Value of the `Tags` header.
    pub fn tags_header(&self) -> String {
        self.tags.join(", ")
    }
}

/// ntfy topic URL for a target: the host part with dots turned into underscores.
///
/// `https://shop.example.com/ofertas` on `https://ntfy.sh` gives `https://ntfy.sh/shop_example_com`.
pub fn channel_url(notify_base: &str, target_uri: &str) -> String {
    let without_scheme = target_uri
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(target_uri);
    let host = without_scheme.split('/').next().unwrap_or_default();
    let base = notify_base.strip_suffix('/').unwrap_or(notify_base);

    format!("{}/{}", base, host.replace('.', "_"))
}
