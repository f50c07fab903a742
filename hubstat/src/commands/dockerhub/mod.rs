use crate::format::Formattable;
use libhubstat::auth::CredentialStore;
use libhubstat::{DockerHub, DockerHubCredentials};
use serde::Serialize;

pub mod handlers;

/// Stored DockerHub account, without the password
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AccountDisplay {
    pub authentication: bool,
    pub username: Option<String>,
}

impl From<&DockerHubCredentials> for AccountDisplay {
    fn from(credentials: &DockerHubCredentials) -> Self {
        let username = credentials
            .basic_auth()
            .map(|(username, _)| username.to_string());
        Self {
            authentication: credentials.authentication,
            username,
        }
    }
}

impl Formattable for AccountDisplay {
    fn format_pretty(&self) -> String {
        match &self.username {
            Some(username) => format!("Authentication: enabled\nUsername: {}", username),
            None => "Authentication: disabled (anonymous pulls)".to_string(),
        }
    }
}

/// Prompt for username if not provided
fn prompt_username(provided_username: Option<&str>) -> Result<String, String> {
    match provided_username {
        Some(username) => Ok(username.to_string()),
        None => {
            print!("Username: ");
            std::io::Write::flush(&mut std::io::stdout())
                .map_err(|e| format!("Failed to flush stdout: {}", e))?;

            let mut username = String::new();
            std::io::stdin()
                .read_line(&mut username)
                .map_err(|e| format!("Failed to read username: {}", e))?;

            Ok(username.trim().to_string())
        }
    }
}

/// Prompt for password if not provided
fn prompt_password(provided_password: Option<&str>) -> Result<String, String> {
    match provided_password {
        Some(password) => Ok(password.to_string()),
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| format!("Failed to read password: {}", e)),
    }
}

/// Store DockerHub credentials once DockerHub has issued a token for them
pub(crate) async fn login_dockerhub(
    store: &dyn CredentialStore,
    dockerhub: &DockerHub,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<String, String> {
    let username = prompt_username(username)?;
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    let password = prompt_password(password)?;

    let credentials = DockerHubCredentials::basic(&username, &password);

    dockerhub
        .acquire_token(&credentials)
        .await
        .map_err(|e| {
            if e.is_credentials_rejected() {
                "DockerHub rejected the username or password".to_string()
            } else {
                format!("Unable to verify credentials: {}", e)
            }
        })?;

    store
        .set_dockerhub_credentials(&credentials)
        .map_err(|e| format!("Failed to store credentials: {}", e))?;

    Ok(username)
}

/// Remove stored credentials
pub(crate) fn logout_dockerhub(store: &dyn CredentialStore) -> Result<(), String> {
    store
        .clear()
        .map_err(|e| format!("Failed to remove credentials: {}", e))
}

/// Describe the stored account
pub(crate) fn show_dockerhub(store: &dyn CredentialStore) -> Result<AccountDisplay, String> {
    let credentials = store.dockerhub_credentials().map_err(|e| e.to_string())?;
    Ok(AccountDisplay::from(&credentials))
}
