//! Managed container runtime endpoints.
//!
//! An endpoint is a Docker or Kubernetes environment supervised by the
//! server. Only some endpoints share the server's network egress, and the
//! DockerHub quota the server observes is only meaningful for those.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod store;

pub use store::{EndpointStore, FileEndpointStore, MemoryEndpointStore};


/// Identifier of a managed endpoint.
pub type EndpointId = u32;

/// Kind of environment behind an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    /// Docker engine reached directly (socket or TCP)
    Docker,
    /// Docker engine reached through an agent
    Agent,
    /// Azure Container Instances
    Azure,
    /// Docker engine behind an edge agent
    EdgeAgent,
    /// Kubernetes cluster the server itself runs in
    KubernetesLocal,
    /// Kubernetes cluster reached through an agent
    AgentOnKubernetes,
    /// Kubernetes cluster behind an edge agent
    EdgeAgentOnKubernetes,
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Docker => "docker",
            Self::Agent => "agent",
            Self::Azure => "azure",
            Self::EdgeAgent => "edge_agent",
            Self::KubernetesLocal => "kubernetes_local",
            Self::AgentOnKubernetes => "agent_on_kubernetes",
            Self::EdgeAgentOnKubernetes => "edge_agent_on_kubernetes",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for EndpointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "docker" => Ok(Self::Docker),
            "agent" => Ok(Self::Agent),
            "azure" => Ok(Self::Azure),
            "edge_agent" => Ok(Self::EdgeAgent),
            "kubernetes_local" => Ok(Self::KubernetesLocal),
            "agent_on_kubernetes" => Ok(Self::AgentOnKubernetes),
            "edge_agent_on_kubernetes" => Ok(Self::EdgeAgentOnKubernetes),
            other => Err(format!("unknown endpoint type '{}'", other)),
        }
    }
}

/// A managed endpoint as persisted by the endpoint store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: EndpointId,
    pub name: String,
    /// Connection address, e.g. `unix:///var/run/docker.sock` or `tcp://10.0.0.5:2375`
    pub url: String,
    #[serde(rename = "type")]
    pub kind: EndpointType,
}

impl Endpoint {
    /// Returns true if the server can assume this endpoint pulls through its own egress.
    ///
    /// That holds for runtimes managed over a local socket (`unix://` or
    /// `npipe://`) and for the Kubernetes cluster the server runs in.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubstat::endpoint::{Endpoint, EndpointType};
    ///
    /// let local = Endpoint {
    ///     id: 1,
    ///     name: "local".to_string(),
    ///     url: "unix:///var/run/docker.sock".to_string(),
    ///     kind: EndpointType::Docker,
    /// };
    /// assert!(local.shares_server_egress());
    /// ```
    pub fn shares_server_egress(&self) -> bool {
        self.url.starts_with("unix://")
            || self.url.starts_with("npipe://")
            || self.kind == EndpointType::KubernetesLocal
    }
}

/// Outcome of looking an endpoint up by id.
///
/// Storage failures are reported through the surrounding `Result`, so a
/// missing endpoint never has to be recognized by comparing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointLookup {
    Found(Endpoint),
    NotFound,
}
