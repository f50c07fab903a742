use crate::format::Formattable;
use libhubstat::endpoint::{EndpointId, EndpointStore};
use libhubstat::status::parse_endpoint_id;
use libhubstat::{Endpoint, EndpointType};
use serde::Serialize;
use tabled::Tabled;
use url::Url;

pub mod handlers;

/// Endpoint row for display purposes
#[derive(Debug, Tabled, Serialize)]
pub struct EndpointDisplay {
    #[tabled(rename = "ID")]
    pub id: EndpointId,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether `hubstat status` can report on this endpoint
    #[tabled(rename = "STATUS")]
    #[serde(skip)]
    pub status: String,
}

impl From<&Endpoint> for EndpointDisplay {
    fn from(endpoint: &Endpoint) -> Self {
        let status = if endpoint.shares_server_egress() {
            "supported"
        } else {
            "unsupported"
        };
        Self {
            id: endpoint.id,
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            kind: endpoint.kind.to_string(),
            status: status.to_string(),
        }
    }
}

impl Formattable for EndpointDisplay {
    fn format_pretty(&self) -> String {
        format!(
            "ID: {}\nName: {}\nURL: {}\nType: {}",
            self.id, self.name, self.url, self.kind
        )
    }
}

/// Validate an endpoint URL
///
/// The URL must parse and use one of the schemes a container runtime is
/// reached over. The input is returned trimmed but otherwise unchanged, so
/// socket prefixes such as `unix://` survive as typed.
///
/// # Examples
///
/// ```
/// # use hubstat::commands::endpoint::validate_endpoint_url;
/// assert!(validate_endpoint_url("unix:///var/run/docker.sock").is_ok());
/// assert!(validate_endpoint_url("tcp://10.0.0.5:2375").is_ok());
/// assert!(validate_endpoint_url("ftp://example.com").is_err());
/// ```
pub(crate) fn validate_endpoint_url(url_str: &str) -> Result<String, String> {
    let trimmed = url_str.trim();
    let parsed = Url::parse(trimmed).map_err(|e| format!("Invalid URL '{}': {}", trimmed, e))?;

    match parsed.scheme() {
        "unix" | "npipe" => {}
        "tcp" | "http" | "https" => {
            if parsed.host_str().is_none() {
                return Err(format!("Invalid URL '{}': missing host", trimmed));
            }
        }
        scheme => {
            return Err(format!(
                "Invalid URL scheme '{}'. Supported schemes: unix, npipe, tcp, http, https.",
                scheme
            ));
        }
    }

    Ok(trimmed.to_string())
}

/// List all endpoints in display form
pub(crate) fn list_endpoints(store: &dyn EndpointStore) -> Result<Vec<EndpointDisplay>, String> {
    let endpoints = store.list().map_err(|e| e.to_string())?;
    Ok(endpoints.iter().map(EndpointDisplay::from).collect())
}

/// Add an endpoint after validating its name, URL and type
pub(crate) fn add_endpoint(
    store: &dyn EndpointStore,
    name: &str,
    url: &str,
    kind: &str,
) -> Result<Endpoint, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Endpoint name cannot be empty".to_string());
    }

    let url = validate_endpoint_url(url)?;
    let kind: EndpointType = kind.parse()?;

    if store
        .list()
        .map_err(|e| e.to_string())?
        .iter()
        .any(|e| e.name == name)
    {
        return Err(format!("Endpoint '{}' already exists", name));
    }

    store.create(name, &url, kind).map_err(|e| e.to_string())
}

/// Remove an endpoint by its identifier
pub(crate) fn remove_endpoint(store: &dyn EndpointStore, raw_id: &str) -> Result<EndpointId, String> {
    let id = parse_endpoint_id(raw_id).map_err(|e| e.to_string())?;

    if store.remove(id).map_err(|e| e.to_string())? {
        Ok(id)
    } else {
        Err(format!("Endpoint {} not found", id))
    }
}
