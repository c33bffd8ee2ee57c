//! # HTTP Service
//!
//! Backs the `fetch` command: validates the target against the site origin
//! and a host allowlist, performs a GET, and pretty-prints the JSON body.
//! Same-origin responses go through the asset cache first.

use reqwest::Url;
use thiserror::Error;

use crate::config::{FETCH_ALLOWED_HOSTS, FETCH_CHAR_BUDGET};
use crate::repl::services::cache::{AssetCache, ASSET_MANIFEST};

/// Why a fetch did not produce output
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("unsupported scheme '{0}', only http and https are allowed")]
    UnsupportedScheme(String),
    #[error("blocked cross-origin request to {0}")]
    CrossOriginBlocked(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("server answered {0}")]
    Status(u16),
    #[error("response is not JSON: {0}")]
    Parse(String),
}

/// Where `fetch` may go
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    origin: Url,
    allowed_hosts: Vec<String>,
}

impl FetchPolicy {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            allowed_hosts: FETCH_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }

    pub fn with_allowed_hosts(mut self, hosts: &[&str]) -> Self {
        self.allowed_hosts = hosts.iter().map(|h| h.to_string()).collect();
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Validate a user supplied target before any network attempt
    pub fn check(&self, raw: &str) -> Result<Url, FetchError> {
        let raw = raw.trim();
        let url = Url::parse(raw)
            .or_else(|_| self.origin.join(raw))
            .map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
        }
        if self.is_same_origin(&url) {
            return Ok(url);
        }
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        if self.allowed_hosts.iter().any(|h| *h == host) {
            Ok(url)
        } else {
            Err(FetchError::CrossOriginBlocked(host))
        }
    }

    pub fn is_same_origin(&self, url: &Url) -> bool {
        url.origin() == self.origin.origin()
    }
}

/// Service for the outbound GET of the `fetch` command
#[derive(Debug, Clone)]
pub struct HttpService {
    client: reqwest::Client,
    policy: FetchPolicy,
    cache: Option<AssetCache>,
}

impl HttpService {
    pub fn new(policy: FetchPolicy) -> anyhow::Result<Self> {
        tracing::debug!("Creating HttpService for origin {}", policy.origin());
        let client = reqwest::Client::builder()
            .user_agent(concat!("termfolio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            policy,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: AssetCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// GET `url` and return its JSON body pretty-printed and truncated
    pub async fn fetch_json(&self, url: &Url) -> Result<String, FetchError> {
        let same_origin = self.policy.is_same_origin(url);
        let cached = if same_origin {
            self.cache.as_ref().and_then(|c| c.get(url.as_str()))
        } else {
            None
        };

        let body = match cached {
            Some(body) => {
                tracing::debug!("Serving {url} from cache");
                body
            }
            None => {
                let body = self.get_text(url).await?;
                if same_origin {
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.put(url.as_str(), &body) {
                            tracing::warn!("Could not cache {url}: {e:#}");
                        }
                    }
                }
                body
            }
        };

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        let pretty =
            serde_json::to_string_pretty(&value).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(truncate_chars(&pretty, FETCH_CHAR_BUDGET))
    }

    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        tracing::info!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(error_chain(&e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(error_chain(&e)))
    }

    /// Purge cache versions other than the current one
    pub fn activate_cache(&self) -> anyhow::Result<usize> {
        match &self.cache {
            Some(cache) => cache.activate(),
            None => Ok(0),
        }
    }

    /// Pre-cache the asset manifest. Failures are logged and skipped;
    /// returns how many assets were stored.
    pub async fn install(&self) -> usize {
        let Some(cache) = &self.cache else {
            return 0;
        };
        let mut stored = 0;
        for path in ASSET_MANIFEST {
            let Ok(url) = self.policy.origin().join(path) else {
                continue;
            };
            match self.get_text(&url).await {
                Ok(body) => match cache.put(url.as_str(), &body) {
                    Ok(()) => stored += 1,
                    Err(e) => tracing::warn!("Could not cache {url}: {e:#}"),
                },
                Err(e) => tracing::warn!("Skipping {url}: {e}"),
            }
        }
        tracing::info!("Pre-cached {stored}/{} assets", ASSET_MANIFEST.len());
        stored
    }
}

/// Full source chain of an error on one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

/// Keep at most `budget` chars, marking the cut
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}\n… (truncated)", &text[..cut]),
        None => text.to_string(),
    }
}
