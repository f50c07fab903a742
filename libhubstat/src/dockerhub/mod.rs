//! DockerHub pull rate-limit retrieval.
//!
//! Retrieval is a two-step pipeline that always runs in this order:
//!
//! 1. [`acquire_token`] asks the auth service for a pull-scoped bearer token
//!    on the probe repository, anonymously or with the stored account.
//! 2. [`fetch_rate_limits`] sends a HEAD for the probe manifest with that
//!    token and reads `RateLimit-Limit` and `RateLimit-Remaining`.
//!
//! Nothing is cached between retrievals and failed calls are not retried.
//!
//! # Examples
//!
//! ```no_run
//! use libhubstat::auth::DockerHubCredentials;
//! use libhubstat::dockerhub::DockerHub;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dockerhub = DockerHub::with_defaults()?;
//!     let status = dockerhub.status(&DockerHubCredentials::anonymous()).await?;
//!     println!("{} of {} pulls left", status.remaining, status.limit);
//!     Ok(())
//! }
//! ```

use crate::auth::DockerHubCredentials;
use crate::client::Client;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod limits;
mod token;

pub use limits::{LIMIT_HEADER, RATE_LIMITS_URL, REMAINING_HEADER, fetch_rate_limits};
pub use token::{TOKEN_URL, Token, acquire_token};

#[cfg(test)]
mod tests;

/// Pull quota as reported by DockerHub for this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    /// Pulls left in the current window
    pub remaining: u64,
    /// Maximum pulls allowed per window
    pub limit: u64,
}

/// Outbound URLs for the two calls.
///
/// Defaults point at DockerHub; tests and mirrors override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerHubUrls {
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_rate_limits_url")]
    pub rate_limits_url: String,
}

impl Default for DockerHubUrls {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            rate_limits_url: default_rate_limits_url(),
        }
    }
}

fn default_token_url() -> String {
    TOKEN_URL.to_string()
}

fn default_rate_limits_url() -> String {
    RATE_LIMITS_URL.to_string()
}

/// Runs the token-then-limits pipeline against a configurable set of URLs.
///
/// `DockerHub` holds no per-retrieval state. Clones share the underlying
/// connection pool, so a single instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct DockerHub {
    client: Client,
    urls: DockerHubUrls,
}

impl DockerHub {
    /// Creates a retriever using `client` for both calls.
    pub fn new(client: Client, urls: DockerHubUrls) -> Self {
        Self { client, urls }
    }

    /// Creates a retriever with the default client and DockerHub URLs.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(Client::new()?, DockerHubUrls::default()))
    }

    /// Returns the URLs this retriever calls.
    pub fn urls(&self) -> &DockerHubUrls {
        &self.urls
    }

    /// First step: obtains a bearer token.
    pub async fn acquire_token(&self, credentials: &DockerHubCredentials) -> Result<Token> {
        acquire_token(&self.client, &self.urls.token_url, credentials).await
    }

    /// Second step: reads the quota headers using `token`.
    pub async fn fetch_rate_limits(&self, token: &Token) -> Result<RateLimitStatus> {
        fetch_rate_limits(&self.client, &self.urls.rate_limits_url, token).await
    }

    /// Runs both steps and returns the current quota.
    ///
    /// The rate-limit call is only made once a token has been obtained.
    ///
    /// # Errors
    ///
    /// Returns the first failure of either step unchanged.
    pub async fn status(&self, credentials: &DockerHubCredentials) -> Result<RateLimitStatus> {
        let token = self.acquire_token(credentials).await?;
        debug!("received dockerhub token");

        let status = self.fetch_rate_limits(&token).await?;
        debug!(
            limit = status.limit,
            remaining = status.remaining,
            "received dockerhub rate limits"
        );

        Ok(status)
    }
}
