//! CnsClient trait for mocking
//!
//! Abstracts the CNS allocation subsystem so the endpoint manager and the agent can be
//! unit tested against an in-memory implementation.

use crate::error::CnsError;
use crate::models::{CreateNetworkContainerRequest, GetEndpointResponse, IPConfigsRequest};

/// Trait for CNS API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait CnsClientTrait: Send + Sync {
    /// Create or update a network container and its secondary IP pool
    async fn create_or_update_network_container(
        &self,
        request: &CreateNetworkContainerRequest,
    ) -> Result<(), CnsError>;

    /// Read the stored endpoint state of a container
    async fn get_endpoint(&self, container_id: &str) -> Result<GetEndpointResponse, CnsError>;

    /// Release the IPs leased to a pod interface
    async fn release_ips(&self, request: &IPConfigsRequest) -> Result<(), CnsError>;
}
