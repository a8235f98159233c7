//! HTTP transport used by the schema client.
//!
//! [`Transport`] is the only seam through which the crate talks to the network:
//! one GET, one status, one body. [`ReqwestTransport`] is the default
//! implementation and carries the shared client construction policy (timeouts,
//! user-agent, compression, proxy compatibility).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Proxy};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::user_agent;

/// Default connect timeout for API requests.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout. The client schema text is several megabytes.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, empty when unknown.
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP status level (no response was received).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or body-read failure.
    #[error("network error requesting {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("timeout requesting {url}")]
    Timeout { url: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild { reason: String },

    /// Failure reported by a custom transport.
    #[error("transport failure requesting {url}: {reason}")]
    Other { url: String, reason: String },
}

impl TransportError {
    /// Creates a request error, promoting reqwest timeouts to [`TransportError::Timeout`].
    ///
    /// The URL is stripped from `source`; only the redacted `url` is rendered.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Request {
                url,
                source: source.without_url(),
            }
        }
    }

    /// Creates a free-form failure for custom transports.
    pub fn other(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Other {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Fetches a URL and returns its status and body.
///
/// Implementations must not interpret the status: non-2xx responses are
/// returned as `Ok` and classified by the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request for `url`.
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// Connect and read timeouts for [`ReqwestTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect_secs: u64,
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when client construction fails.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeouts(HttpTimeouts::default())
    }

    /// Builds a transport with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when client construction fails.
    pub fn with_timeouts(timeouts: HttpTimeouts) -> Result<Self, TransportError> {
        let client = build_http_client(timeouts, user_agent::default_user_agent())?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::request(redact(url), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::request(redact(url), e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Renders a URL for logs and errors with the `key` query parameter masked.
#[must_use]
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

fn build_http_client(timeouts: HttpTimeouts, user_agent: String) -> Result<Client, TransportError> {
    match try_build_client(timeouts, &user_agent, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed macOS environments panic when reading system proxy
            // settings; retry with env-only proxy discovery.
            warn!("HTTP client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(timeouts, &user_agent, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(TransportError::ClientBuild {
                    reason: "client construction panicked while reading proxy settings".to_string(),
                }),
                Err(BuildClientFailure::Build(error)) => Err(TransportError::ClientBuild {
                    reason: error.to_string(),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(TransportError::ClientBuild {
            reason: error.to_string(),
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    timeouts: HttpTimeouts,
    user_agent: &str,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    let user_agent = user_agent.to_string();
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeouts, user_agent);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeouts: HttpTimeouts, user_agent: String) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(user_agent)
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    let names: &[&str] = match scheme {
        "https" => &["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"],
        "http" => &["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"],
        _ => return None,
    };
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
