use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Location of the optional config file when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/watcher";

pub const DEFAULT_TARGET_URL: &str = "https://megacaribehabautopista.enzona.net/";
pub const DEFAULT_NTFY_URL: &str = "https://ntfy.sh";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 11; Redmi Note 8 Pro) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Mobile Safari/537.36";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub target_url: String,
    pub user_agent: String,
    /// Seconds
    pub request_timeout: u64,
    pub retry_delay_ms: u64,
    pub accept_invalid_certs: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: 90,
            retry_delay_ms: 0,
            accept_invalid_certs: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub base_url: String,
    /// Seconds
    pub request_timeout: u64,
    pub priority: u8,
    pub tags: Vec<String>,
    pub icon: Option<String>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NTFY_URL.to_string(),
            request_timeout: 30,
            priority: 4,
            tags: vec!["loudspeaker".to_string(), "loudspeaker".to_string()],
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_name: String,
    pub level: String,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_name: "scrapper.log".to_string(),
            level: "info".to_string(),
            rotation: LogRotation::Never,
        }
    }
}

impl AppConfig {
    /// Layers defaults, the TOML file and `WATCHER_*` variables, then validates.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let s = Config::builder()
            .add_source(file)
            // e.g. WATCHER_SCRAPER__TARGET_URL
            .add_source(
                Environment::with_prefix("WATCHER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.scraper.target_url).is_err() {
            return Err(ConfigError::Message("Invalid scraper target_url format".into()));
        }

        if self.scraper.request_timeout == 0 {
            return Err(ConfigError::Message("Scraper request_timeout must be greater than 0".into()));
        }

        if self.scraper.user_agent.trim().is_empty() {
            return Err(ConfigError::Message("Scraper user_agent cannot be empty".into()));
        }

        if Url::parse(&self.notifications.base_url).is_err() {
            return Err(ConfigError::Message("Invalid notifications base_url format".into()));
        }

        if self.notifications.request_timeout == 0 {
            return Err(ConfigError::Message("Notifications request_timeout must be greater than 0".into()));
        }

        if !(1..=5).contains(&self.notifications.priority) {
            return Err(ConfigError::Message("Notifications priority must be between 1 and 5".into()));
        }

        if self.logging.file_name.trim().is_empty() {
            return Err(ConfigError::Message("Logging file_name cannot be empty".into()));
        }

        Ok(())
    }
}
