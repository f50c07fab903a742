//! Endpoint-scoped DockerHub status.
//!
//! [`StatusService`] answers "what is the DockerHub quota for endpoint N" by
//! resolving the endpoint, refusing endpoints that do not pull through the
//! server's own network, loading the stored credentials, and running the
//! DockerHub pipeline.

use crate::auth::CredentialStore;
use crate::dockerhub::{DockerHub, RateLimitStatus};
use crate::endpoint::{Endpoint, EndpointId, EndpointLookup, EndpointStore};
use crate::error::{HubStatError, Result};
use std::sync::Arc;
use tracing::{debug, info};


/// Orchestrates the endpoint checks and the DockerHub retrieval.
#[derive(Clone)]
pub struct StatusService {
    endpoints: Arc<dyn EndpointStore>,
    credentials: Arc<dyn CredentialStore>,
    dockerhub: DockerHub,
}

impl StatusService {
    pub fn new(
        endpoints: Arc<dyn EndpointStore>,
        credentials: Arc<dyn CredentialStore>,
        dockerhub: DockerHub,
    ) -> Self {
        Self {
            endpoints,
            credentials,
            dockerhub,
        }
    }

    /// Returns the endpoint store.
    pub fn endpoints(&self) -> &Arc<dyn EndpointStore> {
        &self.endpoints
    }

    /// Returns the DockerHub quota for the endpoint identified by `raw_id`.
    ///
    /// `raw_id` is the identifier as it arrives from a route or command line.
    ///
    /// # Errors
    ///
    /// - [`HubStatError::InvalidInput`] if `raw_id` is not a numeric id
    /// - [`HubStatError::NotFound`] if no endpoint has that id
    /// - [`HubStatError::UnsupportedEndpointType`] if the endpoint does not
    ///   share the server's egress; no outbound call is made in that case
    /// - any storage or upstream error, unchanged
    pub async fn endpoint_dockerhub_status(&self, raw_id: &str) -> Result<RateLimitStatus> {
        let id = parse_endpoint_id(raw_id)?;
        let endpoint = self.find_endpoint(id)?;
        ensure_shares_egress(&endpoint)?;

        let credentials = self.credentials.dockerhub_credentials()?;
        debug!(
            endpoint_id = id,
            authenticated = credentials.authentication,
            "retrieving dockerhub status"
        );

        let status = self.dockerhub.status(&credentials).await?;
        info!(
            endpoint_id = id,
            limit = status.limit,
            remaining = status.remaining,
            "dockerhub status retrieved"
        );
        Ok(status)
    }

    fn find_endpoint(&self, id: EndpointId) -> Result<Endpoint> {
        match self.endpoints.endpoint(id)? {
            EndpointLookup::Found(endpoint) => Ok(endpoint),
            EndpointLookup::NotFound => Err(HubStatError::not_found(
                "endpoint".to_string(),
                id.to_string(),
            )),
        }
    }
}

/// Parses a route or CLI endpoint identifier.
pub fn parse_endpoint_id(raw_id: &str) -> Result<EndpointId> {
    raw_id.trim().parse::<EndpointId>().map_err(|e| {
        HubStatError::invalid_input_with_source(
            format!("Invalid endpoint identifier '{}'", raw_id),
            e,
        )
    })
}

fn ensure_shares_egress(endpoint: &Endpoint) -> Result<()> {
    if endpoint.shares_server_egress() {
        return Ok(());
    }

    Err(HubStatError::unsupported_endpoint_type(format!(
        "endpoint {} ({}, {}) does not pull through this server",
        endpoint.id, endpoint.kind, endpoint.url
    )))
}
