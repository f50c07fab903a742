//! Error types for hubstat
//!
//! Every failure surfaced by the status retrieval is a [`HubStatError`].
//! Each variant corresponds to one stage of the request: input validation,
//! endpoint lookup, the endpoint-type gate, the two upstream calls, and the
//! ambient concerns (network transport, storage, configuration).

use thiserror::Error;


type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for hubstat operations
#[derive(Error, Debug)]
pub enum HubStatError {
    /// Bad route variable or identifier
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Endpoint missing from the store
    #[error("{resource_type} not found: {name}")]
    NotFound { resource_type: String, name: String },

    /// Endpoint exists but the server cannot assume DockerHub egress for it
    #[error("Invalid environment type: {message}")]
    UnsupportedEndpointType { message: String },

    /// The token call to the auth service failed
    #[error("Unable to retrieve DockerHub token{}: {message}", status_suffix(.status_code))]
    UpstreamAuth {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The HEAD call to the registry failed
    #[error("Unable to retrieve DockerHub rate limits{}: {message}", status_suffix(.status_code))]
    UpstreamRateLimit {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The registry answered but a rate-limit header was missing or malformed
    #[error("{message}")]
    UpstreamProtocol {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Network-related errors (connection, timeout, DNS)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Persisted endpoint or credential storage failed
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration errors (invalid config file, missing settings)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },
}

/// Result type alias for hubstat operations
pub type Result<T> = std::result::Result<T, HubStatError>;

fn status_suffix(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}

impl HubStatError {
    /// Creates a new invalid input error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::error::HubStatError;
    ///
    /// let err = HubStatError::invalid_input("Invalid endpoint identifier route variable");
    /// assert_eq!(err.http_status(), 400);
    /// ```
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new invalid input error with a source error.
    pub fn invalid_input_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidInput {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::error::HubStatError;
    ///
    /// let err = HubStatError::not_found("endpoint", "7");
    /// assert!(matches!(err, HubStatError::NotFound { .. }));
    /// assert_eq!(err.http_status(), 404);
    /// ```
    pub fn not_found<S: Into<String>>(resource_type: S, name: S) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Creates a new unsupported endpoint type error.
    pub fn unsupported_endpoint_type<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedEndpointType {
            message: message.into(),
        }
    }

    /// Creates a new upstream auth error for the token call.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::error::HubStatError;
    ///
    /// let err = HubStatError::upstream_auth("failed fetching dockerhub token", Some(401));
    /// assert!(err.is_credentials_rejected());
    /// ```
    pub fn upstream_auth<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self::UpstreamAuth {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Creates a new upstream auth error with a source error.
    pub fn upstream_auth_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::UpstreamAuth {
            message: message.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new upstream rate-limit error for the HEAD call.
    pub fn upstream_rate_limit<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self::UpstreamRateLimit {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Creates a new upstream rate-limit error with a source error.
    pub fn upstream_rate_limit_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::UpstreamRateLimit {
            message: message.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new upstream protocol error with the offending parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::error::HubStatError;
    /// use std::io;
    ///
    /// let cause = io::Error::new(io::ErrorKind::InvalidData, "Missing RateLimit-Limit header");
    /// let err = HubStatError::upstream_protocol_with_source(
    ///     "Failed fetching RateLimit-Limit header",
    ///     cause,
    /// );
    /// assert_eq!(err.to_string(), "Failed fetching RateLimit-Limit header");
    /// ```
    pub fn upstream_protocol_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::UpstreamProtocol {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new network error.
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::error::HubStatError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
    /// let err = HubStatError::network_with_source("failed to connect", io_err);
    /// assert!(matches!(err, HubStatError::Network { .. }));
    /// ```
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new storage error.
    pub fn storage<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Storage {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new storage error with a source error.
    pub fn storage_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::error::HubStatError;
    ///
    /// let err = HubStatError::config("invalid config file", Some("/path/to/config.yaml"));
    /// assert!(matches!(err, HubStatError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status the API layer answers with for this error.
    ///
    /// Invalid input and unsupported endpoint types are client errors (400),
    /// a missing endpoint is 404, and every upstream or internal failure is 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } | Self::UnsupportedEndpointType { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::UpstreamAuth { .. }
            | Self::UpstreamRateLimit { .. }
            | Self::UpstreamProtocol { .. }
            | Self::Network { .. }
            | Self::Storage { .. }
            | Self::Config { .. } => 500,
        }
    }

    /// Returns true when DockerHub rejected the request with 401 or 403.
    ///
    /// Lets callers tell bad stored credentials apart from an upstream outage,
    /// even though both map to the same HTTP status.
    pub fn is_credentials_rejected(&self) -> bool {
        match self {
            Self::UpstreamAuth { status_code, .. } | Self::UpstreamRateLimit { status_code, .. } => {
                matches!(status_code, Some(401) | Some(403))
            }
            _ => false,
        }
    }

    /// Short summary used as the user-facing message in API error bodies.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Invalid endpoint identifier route variable",
            Self::NotFound { .. } => {
                "Unable to find an endpoint with the specified identifier inside the database"
            }
            Self::UnsupportedEndpointType { .. } => "Invalid environment type",
            Self::UpstreamAuth { .. } => "Unable to retrieve DockerHub token from DockerHub",
            Self::UpstreamRateLimit { .. } | Self::UpstreamProtocol { .. } => {
                "Unable to retrieve DockerHub rate limits from DockerHub"
            }
            Self::Network { .. } => "Unable to reach DockerHub",
            Self::Storage { .. } => "Unable to read persisted data",
            Self::Config { .. } => "Invalid server configuration",
        }
    }
}
