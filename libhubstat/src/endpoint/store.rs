//! Endpoint persistence.
//!
//! The file-based implementation keeps every endpoint in one TOML file:
//!
//! ```toml
//! [[endpoints]]
//! id = 1
//! name = "local"
//! url = "unix:///var/run/docker.sock"
//! type = "docker"
//! ```

use super::{Endpoint, EndpointId, EndpointLookup, EndpointType};
use crate::error::{HubStatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Trait for looking up and managing endpoints.
pub trait EndpointStore: Send + Sync {
    /// Looks an endpoint up by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read; a missing
    /// endpoint is [`EndpointLookup::NotFound`].
    fn endpoint(&self, id: EndpointId) -> Result<EndpointLookup>;

    /// Lists all endpoints ordered by id.
    fn list(&self) -> Result<Vec<Endpoint>>;

    /// Adds an endpoint and returns it with its newly assigned id.
    fn create(&self, name: &str, url: &str, kind: EndpointType) -> Result<Endpoint>;

    /// Removes an endpoint. Returns false if no endpoint had that id.
    fn remove(&self, id: EndpointId) -> Result<bool>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EndpointsFile {
    #[serde(default)]
    endpoints: Vec<Endpoint>,
}

fn next_id(endpoints: &[Endpoint]) -> Result<EndpointId> {
    endpoints
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| HubStatError::storage("No endpoint identifier left to assign", None))
}

fn find(endpoints: &[Endpoint], id: EndpointId) -> EndpointLookup {
    match endpoints.iter().find(|e| e.id == id) {
        Some(endpoint) => EndpointLookup::Found(endpoint.clone()),
        None => EndpointLookup::NotFound,
    }
}

/// File-based endpoint store.
///
/// # Examples
///
/// ```no_run
/// use libhubstat::endpoint::{EndpointLookup, EndpointStore, EndpointType, FileEndpointStore};
/// use std::path::PathBuf;
///
/// # fn example() -> libhubstat::error::Result<()> {
/// let store = FileEndpointStore::new(PathBuf::from("/var/lib/hubstat/endpoints.toml"))?;
/// let created = store.create("local", "unix:///var/run/docker.sock", EndpointType::Docker)?;
/// assert!(matches!(store.endpoint(created.id)?, EndpointLookup::Found(_)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileEndpointStore {
    path: PathBuf,
}

impl FileEndpointStore {
    /// Creates a store backed by `path`, creating the parent directory if needed.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                HubStatError::storage_with_source(
                    "Failed to create endpoints directory",
                    parent.to_str(),
                    e,
                )
            })?;
        }

        Ok(Self { path })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<EndpointsFile> {
        if !self.path.exists() {
            return Ok(EndpointsFile::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            HubStatError::storage_with_source("Failed to read endpoints file", self.path.to_str(), e)
        })?;

        toml::from_str(&contents).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to parse endpoints file",
                self.path.to_str(),
                e,
            )
        })
    }

    fn save(&self, file: &EndpointsFile) -> Result<()> {
        let contents = toml::to_string_pretty(file).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to serialize endpoints",
                self.path.to_str(),
                e,
            )
        })?;

        fs::write(&self.path, contents).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to write endpoints file",
                self.path.to_str(),
                e,
            )
        })
    }
}

impl EndpointStore for FileEndpointStore {
    fn endpoint(&self, id: EndpointId) -> Result<EndpointLookup> {
        Ok(find(&self.load()?.endpoints, id))
    }

    fn list(&self) -> Result<Vec<Endpoint>> {
        let mut endpoints = self.load()?.endpoints;
        endpoints.sort_by_key(|e| e.id);
        Ok(endpoints)
    }

    fn create(&self, name: &str, url: &str, kind: EndpointType) -> Result<Endpoint> {
        let mut file = self.load()?;
        let endpoint = Endpoint {
            id: next_id(&file.endpoints)?,
            name: name.to_string(),
            url: url.to_string(),
            kind,
        };
        file.endpoints.push(endpoint.clone());
        self.save(&file)?;
        Ok(endpoint)
    }

    fn remove(&self, id: EndpointId) -> Result<bool> {
        let mut file = self.load()?;
        let before = file.endpoints.len();
        file.endpoints.retain(|e| e.id != id);
        if file.endpoints.len() == before {
            return Ok(false);
        }
        self.save(&file)?;
        Ok(true)
    }
}

/// In-memory endpoint store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryEndpointStore {
    endpoints: RwLock<Vec<Endpoint>>,
}

impl MemoryEndpointStore {
    /// Creates a store pre-populated with `endpoints`.
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints: RwLock::new(endpoints),
        }
    }

    fn poisoned() -> HubStatError {
        HubStatError::storage("Endpoint store lock poisoned", None)
    }
}

impl EndpointStore for MemoryEndpointStore {
    fn endpoint(&self, id: EndpointId) -> Result<EndpointLookup> {
        let endpoints = self.endpoints.read().map_err(|_| Self::poisoned())?;
        Ok(find(&endpoints, id))
    }

    fn list(&self) -> Result<Vec<Endpoint>> {
        let mut endpoints = self.endpoints.read().map_err(|_| Self::poisoned())?.clone();
        endpoints.sort_by_key(|e| e.id);
        Ok(endpoints)
    }

    fn create(&self, name: &str, url: &str, kind: EndpointType) -> Result<Endpoint> {
        let mut endpoints = self.endpoints.write().map_err(|_| Self::poisoned())?;
        let endpoint = Endpoint {
            id: next_id(&endpoints)?,
            name: name.to_string(),
            url: url.to_string(),
            kind,
        };
        endpoints.push(endpoint.clone());
        Ok(endpoint)
    }

    fn remove(&self, id: EndpointId) -> Result<bool> {
        let mut endpoints = self.endpoints.write().map_err(|_| Self::poisoned())?;
        let before = endpoints.len();
        endpoints.retain(|e| e.id != id);
        Ok(endpoints.len() != before)
    }
}
