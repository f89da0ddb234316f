//! Host endpoint driver
//!
//! The host networking stack (HNS on Windows nodes) owns the virtual endpoints pods
//! attach to. The agent only needs to find an endpoint by its addresses and delete it.

use crate::error::DriverError;
use ipnet::IpNet;

#[async_trait::async_trait]
pub trait EndpointDriver: Send + Sync {
    /// Resolve the ID of the endpoint carrying the given addresses
    async fn find_endpoint_by_ip(&self, ipv4: &[IpNet], ipv6: &[IpNet]) -> Result<String, DriverError>;

    /// Delete an endpoint by ID
    async fn delete_endpoint_by_id(&self, id: &str) -> Result<(), DriverError>;
}
