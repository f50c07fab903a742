/// DockerHub account command handlers and logic
pub mod dockerhub;

/// Endpoint command handlers and logic
pub mod endpoint;

/// Status command handler
pub mod status;

/// Version command handlers
pub mod version;
