pub mod cli;
pub mod config;
pub mod extractor;
pub mod http;
pub mod models;
pub mod notifier;
pub mod scraper;
pub mod utils;
pub mod watcher;

// Re-export commonly used types
pub use config::AppConfig;
pub use models::{MatchSet, NotificationPayload, Query};
pub use utils::error::AppError;
pub use watcher::{Delivery, RunOutcome, Watcher};

pub type Result<T> = std::result::Result<T, AppError>;
