//! DockerHub credentials.
//!
//! The status retrieval can run anonymously or with a DockerHub account.
//! Anonymous pulls have a lower quota, so operators who pull with an account
//! store it here to see the quota that actually applies to them.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod store;

pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};


/// DockerHub account settings used when requesting a token.
///
/// When `authentication` is false the username and password are ignored and
/// the token is requested anonymously.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DockerHubCredentials {
    /// Whether the token request should carry Basic credentials
    #[serde(default)]
    pub authentication: bool,
    /// DockerHub username
    #[serde(default)]
    pub username: String,
    /// DockerHub password or personal access token
    #[serde(default)]
    pub password: String,
}

impl DockerHubCredentials {
    /// Creates anonymous credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::auth::DockerHubCredentials;
    ///
    /// let creds = DockerHubCredentials::anonymous();
    /// assert!(creds.basic_auth().is_none());
    /// ```
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates credentials with authentication enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::auth::DockerHubCredentials;
    ///
    /// let creds = DockerHubCredentials::basic("user", "pass");
    /// assert_eq!(creds.basic_auth(), Some(("user", "pass")));
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            authentication: true,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username/password pair to attach, if authentication is enabled.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        if self.authentication {
            Some((self.username.as_str(), self.password.as_str()))
        } else {
            None
        }
    }
}

impl fmt::Debug for DockerHubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockerHubCredentials")
            .field("authentication", &self.authentication)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
