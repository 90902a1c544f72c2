use tracing::{error, info};

use crate::config::{AppConfig, NotificationsConfig};
use crate::extractor::extract_matches;
use crate::http::ProxySettings;
use crate::models::{MatchSet, NotificationPayload, Query};
use crate::notifier::{Notifier, NtfyNotifier};
use crate::scraper::CatalogScraper;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Disabled,
    Failed(String),
}

/// How a completed run ended. A fatal fetch error is returned as `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoMatches,
    Matched { matches: MatchSet, delivery: Delivery },
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        0
    }
}

pub struct Watcher {
    scraper: CatalogScraper,
    notifier: Box<dyn Notifier>,
    notifications: NotificationsConfig,
}

impl Watcher {
    pub fn new(
        scraper: CatalogScraper,
        notifier: Box<dyn Notifier>,
        notifications: NotificationsConfig,
    ) -> Self {
        Self {
            scraper,
            notifier,
            notifications,
        }
    }

    /// Catalog scraper plus ntfy notifier, both behind the same optional proxy.
    pub fn from_config(config: &AppConfig, proxy: Option<&ProxySettings>) -> Result<Self> {
        let scraper = CatalogScraper::new(config.scraper.clone(), proxy)?;
        let notifier = NtfyNotifier::new(config.notifications.clone(), proxy)?;
        Ok(Self::new(scraper, Box::new(notifier), config.notifications.clone()))
    }

    pub async fn run(&self, query: &Query) -> Result<RunOutcome> {
        let target_uri = self.scraper.target_uri(&query.endpoint);

        info!("Starting scrape of {}", target_uri);
        let page = self.scraper.fetch(&target_uri).await?;

        let matches = extract_matches(&page.body, query);
        if matches.is_empty() {
            info!("{} not found yet :c", query.product_name);
            return Ok(RunOutcome::NoMatches);
        }

        info!(
            "Products found: {}",
            matches.iter().cloned().collect::<Vec<_>>().join(",")
        );

        let delivery = if query.notify {
            self.deliver(query, &matches, &target_uri).await
        } else {
            Delivery::Disabled
        };

        Ok(RunOutcome::Matched { matches, delivery })
    }

    // Failures are logged and reported, never propagated
    async fn deliver(&self, query: &Query, matches: &MatchSet, target_uri: &str) -> Delivery {
        let payload = NotificationPayload::build(query, matches, target_uri, &self.notifications);

        match self.notifier.notify(&payload).await {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                error!("Error sending {} notification: {}", self.notifier.name(), e);
                Delivery::Failed(e.to_string())
            }
        }
    }
}
