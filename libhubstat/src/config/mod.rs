//! Application configuration.
//!
//! This module manages application configuration with sensible defaults,
//! loading from a YAML file and merging it over the defaults.

use crate::client::ClientConfig;
use crate::dockerhub::DockerHubUrls;
use crate::error::{HubStatError, Result};
use config::{Config as ConfigRs, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};


/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub dockerhub: DockerHubUrls,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    ///
    /// This function is primarily used for testing.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(Self::defaults_source()?)
            .add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads a `Config` from an optional file path.
    ///
    /// With `None`, or a path that does not exist, the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigRs::builder().add_source(Self::defaults_source()?);

        if let Some(p) = path
            && p.exists()
        {
            builder = builder.add_source(File::from(p).format(FileFormat::Yaml).required(true));
        }

        Self::from_builder(builder, path)
    }

    /// Returns the HTTP client settings derived from the network section.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_timeout(self.network.timeout)
            .with_max_idle_per_host(self.network.max_idle_per_host)
    }

    fn defaults_source() -> Result<ConfigRs> {
        ConfigRs::try_from(&Config::default()).map_err(|e| {
            HubStatError::config_with_source("Failed to build default configuration", None, e)
        })
    }

    /// Creates a `Config` from a `config::ConfigBuilder`.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                HubStatError::config_with_source(
                    "Failed to deserialize configuration".to_string(),
                    path.map(|p| p.display().to_string()),
                    e,
                )
            })
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    #[serde(default = "default_server_bind")]
    pub bind: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: default_server_bind(),
        }
    }
}

fn default_server_bind() -> String {
    "127.0.0.1:9000".to_string()
}

/// Network settings for outbound calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Request timeout in seconds
    #[serde(default = "default_network_timeout")]
    pub timeout: u64,

    #[serde(default = "default_network_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            timeout: default_network_timeout(),
            max_idle_per_host: default_network_max_idle_per_host(),
        }
    }
}

fn default_network_timeout() -> u64 {
    30
}

fn default_network_max_idle_per_host() -> usize {
    10
}

/// Locations of the persisted endpoint and credential files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Storage {
    #[serde(default = "default_storage_endpoints")]
    pub endpoints: PathBuf,

    #[serde(default = "default_storage_credentials")]
    pub credentials: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            endpoints: default_storage_endpoints(),
            credentials: default_storage_credentials(),
        }
    }
}

/// Directory holding hubstat's files, `~/.config/hubstat` when available.
pub fn default_config_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("hubstat"),
        None => PathBuf::from("."),
    }
}

fn default_storage_endpoints() -> PathBuf {
    default_config_dir().join("endpoints.toml")
}

fn default_storage_credentials() -> PathBuf {
    default_config_dir().join("credentials.toml")
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Logging {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_logging_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
        }
    }
}

fn default_logging_level() -> String {
    "info".to_string()
}
