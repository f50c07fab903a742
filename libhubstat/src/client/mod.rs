//! Shared HTTP transport.
//!
//! A thin wrapper around a pooled reqwest client. Every outbound call made by
//! hubstat goes through [`Client::execute`], which owns the timeout policy and
//! the translation of transport failures into [`HubStatError`].

use crate::error::{HubStatError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use std::time::Duration;


/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libhubstat::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(60)
///     .with_max_idle_per_host(20);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::client::ClientConfig;
    ///
    /// let config = ClientConfig::new();
    /// assert_eq!(config.timeout_seconds, 30);
    /// assert_eq!(config.max_idle_per_host, 10);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// HTTP client shared by every outbound call.
///
/// Cloning is cheap and clones share the same connection pool, so one
/// `Client` can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: ReqwestClient,
    timeout_seconds: u64,
}

impl Client {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::client::{Client, ClientConfig};
    ///
    /// let client = Client::with_config(ClientConfig::new().with_timeout(10)).unwrap();
    /// assert_eq!(client.timeout_seconds(), 10);
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(concat!("hubstat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HubStatError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Returns the configured request timeout in seconds.
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Starts a request with the given method and URL.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client.request(method, url)
    }

    /// Sends a request built with [`Client::request`].
    ///
    /// Only transport failures are errors here; any HTTP status is returned
    /// to the caller as a response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| self.translate_reqwest_error(e))
    }

    /// Translates a reqwest error into a HubStatError.
    fn translate_reqwest_error(&self, error: reqwest::Error) -> HubStatError {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| String::from("(unknown url)"));

        if error.is_timeout() {
            HubStatError::network_with_source(
                format!(
                    "Request to {} timed out after {} seconds",
                    url, self.timeout_seconds
                ),
                error,
            )
        } else if error.is_connect() {
            HubStatError::network_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_request() || error.is_builder() {
            HubStatError::network_with_source(format!("Failed to send request to {}", url), error)
        } else {
            HubStatError::network_with_source(
                format!("Network error communicating with {}", url),
                error,
            )
        }
    }
}

/// Reads and discards the rest of a response body.
///
/// Used on error paths so the connection goes back to the pool clean.
pub(crate) async fn drain(response: Response) {
    let _ = response.bytes().await;
}
