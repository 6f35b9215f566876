use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::{NoProxy, Proxy};

use crate::constants::{PROXY_NONE, PROXY_SYSTEM};
use crate::error::{Result, SyncError};
use crate::settings::SyncSettings;
use crate::utils::system::{get_system_no_proxy, get_system_proxy};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub proxy: Option<String>,
    /// Comma-separated hosts that bypass `proxy`, in `NO_PROXY` syntax
    pub no_proxy: Option<String>,
}

pub fn parse_proxy(proxy_str: &str) -> ProxyConfig {
    if proxy_str == PROXY_SYSTEM {
        let proxy = get_system_proxy();
        let no_proxy = get_system_no_proxy();
        return ProxyConfig {
            proxy: if proxy.is_empty() { None } else { Some(proxy) },
            no_proxy: if no_proxy.is_empty() {
                None
            } else {
                Some(no_proxy)
            },
        };
    } else if proxy_str == PROXY_NONE {
        return ProxyConfig::default();
    } else if !proxy_str.is_empty() {
        return ProxyConfig {
            proxy: Some(proxy_str.to_string()),
            no_proxy: None,
        };
    }
    ProxyConfig::default()
}

/// Source of upstream rule list text
pub trait RuleFetcher {
    /// Fetch the body at `url` as text
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher shared by every request of a run
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, proxy_config: &ProxyConfig) -> Result<Self> {
        let mut client_builder = Client::builder().timeout(timeout).user_agent(user_agent);

        match &proxy_config.proxy {
            Some(proxy) if !proxy.is_empty() => {
                let proxy = Proxy::all(proxy.as_str()).map_err(|e| {
                    SyncError::Config(format!("Failed to set proxy '{}': {}", proxy, e))
                })?
                .no_proxy(proxy_config.no_proxy.as_deref().and_then(NoProxy::from_string));
                client_builder = client_builder.proxy(proxy);
            }
            _ => {
                client_builder = client_builder.no_proxy();
            }
        }

        let client = client_builder
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_settings(settings: &SyncSettings) -> Result<Self> {
        Self::new(
            &settings.user_agent,
            Duration::from_secs(settings.timeout_secs),
            &parse_proxy(&settings.proxy),
        )
    }
}

impl RuleFetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| SyncError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().map_err(|source| SyncError::Network {
            url: url.to_string(),
            source,
        })?;
        debug!("Received {} bytes from {}", body.len(), url);

        String::from_utf8(body.to_vec()).map_err(|source| SyncError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
