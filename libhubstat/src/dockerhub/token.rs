//! Bearer token acquisition from the DockerHub auth service.

use crate::auth::DockerHubCredentials;
use crate::client::{Client, drain};
use crate::error::{HubStatError, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

/// Token endpoint granting pull scope on the rate-limit probe repository.
pub const TOKEN_URL: &str = "https://auth.docker.io/token?service=registry.docker.io&scope=repository:ratelimitpreview/test:pull";

/// Short-lived bearer token for one status retrieval.
///
/// The value is never printed: `Debug` shows a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Requests a pull-scoped token, with Basic credentials when authentication is enabled.
///
/// # Errors
///
/// Every failure is an [`HubStatError::UpstreamAuth`]:
/// - the request could not be sent (the transport error is the source)
/// - the auth service answered with anything other than 200 (`status_code` is set)
/// - the body is not `{"token": string}` (the decode error is the source)
pub async fn acquire_token(
    client: &Client,
    token_url: &str,
    credentials: &DockerHubCredentials,
) -> Result<Token> {
    let mut request = client.request(Method::GET, token_url);
    if let Some((username, password)) = credentials.basic_auth() {
        request = request.basic_auth(username, Some(password));
    }

    debug!(
        url = token_url,
        authenticated = credentials.authentication,
        "requesting dockerhub token"
    );

    let response = client.execute(request).await.map_err(|e| {
        HubStatError::upstream_auth_with_source("failed sending dockerhub token request", e)
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        drain(response).await;
        warn!(status = status.as_u16(), "dockerhub token request rejected");
        return Err(HubStatError::upstream_auth(
            "failed fetching dockerhub token",
            Some(status.as_u16()),
        ));
    }

    let body: TokenResponse = response.json().await.map_err(|e| {
        HubStatError::upstream_auth_with_source("failed decoding dockerhub token response", e)
    })?;

    Ok(Token(body.token))
}
