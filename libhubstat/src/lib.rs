//! hubstat - DockerHub pull rate-limit status
//!
//! libhubstat reports the DockerHub image-pull quota as seen from the machine
//! it runs on, scoped to the container runtime endpoints that share that
//! machine's network egress.
//!
//! # Quick Start
//!
//! ```no_run
//! use libhubstat::{DockerHub, DockerHubCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dockerhub = DockerHub::with_defaults()?;
//!     let status = dockerhub.status(&DockerHubCredentials::anonymous()).await?;
//!     println!("remaining: {}, limit: {}", status.remaining, status.limit);
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`DockerHub`] - Token then rate-limit retrieval pipeline
//! - [`StatusService`] - Endpoint lookup, egress check and retrieval
//! - [`RateLimitStatus`] - The `limit` / `remaining` pair
//! - [`DockerHubCredentials`] - Optional DockerHub account
//! - [`Config`] - YAML configuration with defaults

#![warn(clippy::all)]

/// Returns the libhubstat crate version.
///
/// # Examples
///
/// ```
/// let version = libhubstat::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use auth::DockerHubCredentials;
pub use config::Config;
pub use dockerhub::{DockerHub, DockerHubUrls, RateLimitStatus, Token};
pub use endpoint::{Endpoint, EndpointLookup, EndpointType};
pub use error::{HubStatError, Result};
pub use status::StatusService;

pub mod auth;
pub mod client;
pub mod config;
pub mod dockerhub;
pub mod endpoint;
pub mod error;
pub mod header;
pub mod status;
