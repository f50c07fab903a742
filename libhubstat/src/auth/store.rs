//! Credential storage for the DockerHub account.
//!
//! The file-based implementation stores the account in a TOML file with
//! restricted permissions (0600). The password is base64 encoded for basic
//! obfuscation, it is not encrypted.

use crate::auth::DockerHubCredentials;
use crate::error::{HubStatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Trait for storing and retrieving the DockerHub credentials.
///
/// Implementations must be shareable across concurrent requests, so the
/// methods take `&self` and the trait requires `Send + Sync`.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credentials, or anonymous credentials when none are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored credentials cannot be read or decoded.
    fn dockerhub_credentials(&self) -> Result<DockerHubCredentials>;

    /// Replaces the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be persisted.
    fn set_dockerhub_credentials(&self, credentials: &DockerHubCredentials) -> Result<()>;

    /// Removes the stored credentials, reverting to anonymous access.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn clear(&self) -> Result<()>;
}

/// Stored credential representation for serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct StoredFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dockerhub: Option<StoredCredential>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct StoredCredential {
    #[serde(default)]
    authentication: bool,
    #[serde(default)]
    username: String,
    /// Password, base64 encoded
    #[serde(default)]
    password: String,
}

/// File-based credential store implementation.
///
/// # Examples
///
/// ```no_run
/// use libhubstat::auth::{CredentialStore, DockerHubCredentials, FileCredentialStore};
/// use std::path::PathBuf;
///
/// # fn example() -> libhubstat::error::Result<()> {
/// let path = PathBuf::from("/home/user/.config/hubstat/credentials.toml");
/// let store = FileCredentialStore::new(path)?;
///
/// store.set_dockerhub_credentials(&DockerHubCredentials::basic("username", "password"))?;
/// let creds = store.dockerhub_credentials()?;
/// assert!(creds.authentication);
///
/// store.clear()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileCredentialStore {
    /// Path to the credentials file
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a new file-based credential store.
    ///
    /// The parent directory is created if it doesn't exist. The file itself is
    /// only written on the first update.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                HubStatError::storage_with_source(
                    "Failed to create credentials directory",
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

    fn load_from_file(&self) -> Result<StoredFile> {
        if !self.path.exists() {
            return Ok(StoredFile::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to read credentials file",
                self.path.to_str(),
                e,
            )
        })?;

        toml::from_str(&contents).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to parse credentials file",
                self.path.to_str(),
                e,
            )
        })
    }

    /// Saves credentials to the file with restricted permissions.
    fn save_to_file(&self, stored: &StoredFile) -> Result<()> {
        let contents = toml::to_string_pretty(stored).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to serialize credentials",
                self.path.to_str(),
                e,
            )
        })?;

        fs::write(&self.path, contents).map_err(|e| {
            HubStatError::storage_with_source(
                "Failed to write credentials file",
                self.path.to_str(),
                e,
            )
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, permissions).map_err(|e| {
                HubStatError::storage_with_source(
                    "Failed to set credentials file permissions",
                    self.path.to_str(),
                    e,
                )
            })?;
        }

        Ok(())
    }

    fn encode_credential(credentials: &DockerHubCredentials) -> StoredCredential {
        use base64::{Engine as _, engine::general_purpose};
        StoredCredential {
            authentication: credentials.authentication,
            username: credentials.username.clone(),
            password: general_purpose::STANDARD.encode(&credentials.password),
        }
    }

    fn decode_credential(&self, stored: &StoredCredential) -> Result<DockerHubCredentials> {
        use base64::{Engine as _, engine::general_purpose};
        let decoded_password = general_purpose::STANDARD
            .decode(&stored.password)
            .map_err(|e| {
                HubStatError::storage_with_source(
                    "Failed to decode password",
                    self.path.to_str(),
                    e,
                )
            })?;

        let password = String::from_utf8(decoded_password).map_err(|e| {
            HubStatError::storage_with_source(
                "Invalid password encoding",
                self.path.to_str(),
                e,
            )
        })?;

        Ok(DockerHubCredentials {
            authentication: stored.authentication,
            username: stored.username.clone(),
            password,
        })
    }
}

impl CredentialStore for FileCredentialStore {
    // Always re-reads the backing file.
    fn dockerhub_credentials(&self) -> Result<DockerHubCredentials> {
        match self.load_from_file()?.dockerhub {
            Some(stored) => self.decode_credential(&stored),
            None => Ok(DockerHubCredentials::anonymous()),
        }
    }

    fn set_dockerhub_credentials(&self, credentials: &DockerHubCredentials) -> Result<()> {
        let mut stored = self.load_from_file()?;
        stored.dockerhub = Some(Self::encode_credential(credentials));
        self.save_to_file(&stored)
    }

    fn clear(&self) -> Result<()> {
        let mut stored = self.load_from_file()?;
        stored.dockerhub = None;
        self.save_to_file(&stored)
    }
}

/// In-memory credential store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Option<DockerHubCredentials>>,
}

impl MemoryCredentialStore {
    /// Creates a store holding `credentials`.
    pub fn new(credentials: DockerHubCredentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn dockerhub_credentials(&self) -> Result<DockerHubCredentials> {
        let guard = self
            .credentials
            .read()
            .map_err(|_| HubStatError::storage("Credential store lock poisoned", None))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn set_dockerhub_credentials(&self, credentials: &DockerHubCredentials) -> Result<()> {
        let mut guard = self
            .credentials
            .write()
            .map_err(|_| HubStatError::storage("Credential store lock poisoned", None))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .credentials
            .write()
            .map_err(|_| HubStatError::storage("Credential store lock poisoned", None))?;
        *guard = None;
        Ok(())
    }
}
