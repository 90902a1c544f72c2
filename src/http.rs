use reqwest::{Client, Proxy};
use std::env;
use tracing::debug;

use crate::Result;

/// Proxy pair taken from `http_proxy` / `https_proxy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: String,
    pub https: String,
}

impl ProxySettings {
    /// Reads the lowercase proxy variables from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_values(env::var("http_proxy").ok(), env::var("https_proxy").ok())
    }

    /// Both values must be present and non-empty, otherwise no proxy is used at all.
    pub fn from_values(http: Option<String>, https: Option<String>) -> Option<Self> {
        match (http, https) {
            (Some(http), Some(https)) if !http.is_empty() && !https.is_empty() => {
                Some(Self { http, https })
            }
            _ => None,
        }
    }
}

/// Client options shared by the catalog fetcher and the notifier.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions<'a> {
    pub user_agent: Option<&'a str>,
    pub accept_invalid_certs: bool,
    pub proxy: Option<&'a ProxySettings>,
}

pub fn build_client(options: ClientOptions<'_>) -> Result<Client> {
    let mut builder = Client::builder().danger_accept_invalid_certs(options.accept_invalid_certs);

    if let Some(user_agent) = options.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder = match options.proxy {
        Some(proxy) => {
            debug!("Running behind a proxy");
            builder
                .proxy(Proxy::http(&proxy.http)?)
                .proxy(Proxy::https(&proxy.https)?)
        }
        // Also disables reqwest's own HTTP_PROXY/HTTPS_PROXY detection
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}
