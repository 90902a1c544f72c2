use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Notification to {url} failed: {source}")]
    Notify {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup error: {0}")]
    Logging(#[from] tracing_appender::rolling::InitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status reported to the scheduler for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Fetch { .. } => 2,
            _ => 1,
        }
    }
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
