//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags (applied by the individual commands)
//!
//! Once built, the context is passed as read-only throughout the application.

use libhubstat::auth::FileCredentialStore;
use libhubstat::client::Client;
use libhubstat::endpoint::FileEndpointStore;
use libhubstat::{Config, DockerHub, StatusService};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application context with resolved configuration
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
}

impl AppContext {
    /// Build context with precedence: defaults > config file > env vars
    pub fn build(config_path: Option<&Path>) -> Self {
        if let Some(warning) = missing_config_warning(config_path) {
            eprintln!("{}", warning);
        }

        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let mut config = match Config::load(Some(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: ignoring config file {}: {}", path.display(), e);
                Config::default()
            }
        };

        if let Ok(level) = env::var("HUBSTAT_LOG") {
            config.logging.level = level;
        }

        Self { config }
    }

    /// Context over an explicit configuration, bypassing file and env lookup.
    #[cfg(test)]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Opens the configured endpoint store.
    pub fn endpoint_store(&self) -> libhubstat::Result<FileEndpointStore> {
        FileEndpointStore::new(self.config.storage.endpoints.clone())
    }

    /// Opens the configured credential store.
    pub fn credential_store(&self) -> libhubstat::Result<FileCredentialStore> {
        FileCredentialStore::new(self.config.storage.credentials.clone())
    }

    /// Wires the stores and the DockerHub client into a status service.
    pub fn status_service(&self) -> libhubstat::Result<StatusService> {
        let client = Client::with_config(self.config.client_config())?;
        let dockerhub = DockerHub::new(client, self.config.dockerhub.clone());

        Ok(StatusService::new(
            Arc::new(self.endpoint_store()?),
            Arc::new(self.credential_store()?),
            dockerhub,
        ))
    }
}

/// Warning for an explicitly requested config file that does not exist.
///
/// The default location is allowed to be absent.
pub fn missing_config_warning(config_path: Option<&Path>) -> Option<String> {
    match config_path {
        Some(path) if !path.exists() => Some(format!(
            "Warning: config file {} not found, using defaults",
            path.display()
        )),
        _ => None,
    }
}

/// Get the path to the config file
pub fn default_config_path() -> PathBuf {
    libhubstat::config::default_config_dir().join("config.yaml")
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
