//! Endpoint teardown on IP release
//!
//! When a pod goes away its IPs go back to CNS, but the host endpoint the pod was
//! attached to has to be removed first. Teardown is best effort: failures are logged
//! and never block the release.

use crate::cns_trait::CnsClientTrait;
use crate::driver::EndpointDriver;
use crate::error::{CnsError, TeardownError};
use crate::models::IPConfigsRequest;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Releases pod IPs back to CNS after deleting their host endpoints
///
/// Concurrent calls for different containers are independent. Two concurrent calls
/// for the same container are not coordinated; callers serialize per container if
/// exactly-once endpoint deletion matters.
#[derive(Debug)]
pub struct EndpointManager<C, D> {
    cli: C,
    driver: D,
    teardown_timeout: Option<Duration>,
}

impl<C: CnsClientTrait, D: EndpointDriver> EndpointManager<C, D> {
    pub fn new(cli: C, driver: D) -> Self {
        Self {
            cli,
            driver,
            teardown_timeout: None,
        }
    }

    /// Bound the time spent tearing down endpoints before the release goes ahead
    #[must_use]
    pub fn with_teardown_timeout(mut self, timeout: Duration) -> Self {
        self.teardown_timeout = Some(timeout);
        self
    }

    /// Delete the container's host endpoints, then release its IPs in CNS
    ///
    /// The returned error only ever reflects the CNS release. Dropping the future
    /// cancels whichever call is in flight.
    pub async fn release_ips(&self, request: &IPConfigsRequest) -> Result<(), CnsError> {
        let container_id = &request.infra_container_id;
        info!("Deleting host endpoints for container {}", container_id);

        for e in self.teardown(container_id).await {
            warn!("Failed to remove host endpoint for container {}: {}", container_id, e);
        }

        self.cli
            .release_ips(request)
            .await
            .map_err(|e| CnsError::Release(Box::new(e)))
    }

    async fn teardown(&self, container_id: &str) -> Vec<TeardownError> {
        match self.teardown_timeout {
            Some(limit) => tokio::time::timeout(limit, self.delete_endpoints(container_id))
                .await
                .unwrap_or_else(|_elapsed| vec![TeardownError::Timeout(limit)]),
            None => self.delete_endpoints(container_id).await,
        }
    }

    /// Deletes the endpoint of every interface in the container's stored state
    ///
    /// Interfaces without a stored endpoint ID are resolved by address first. One
    /// interface failing does not stop the others.
    async fn delete_endpoints(&self, container_id: &str) -> Vec<TeardownError> {
        let state = match self.cli.get_endpoint(container_id).await {
            Ok(state) => state,
            Err(e) => return vec![CnsError::EndpointState(Box::new(e)).into()],
        };

        let mut errors = Vec::new();
        for (ifname, ip_info) in &state.endpoint_info.ifname_to_ip_map {
            let id = match ip_info.endpoint_id() {
                Some(id) => id.to_string(),
                None => {
                    debug!("No endpoint ID stored for {} on {}, looking it up by IP", container_id, ifname);
                    match self.driver.find_endpoint_by_ip(&ip_info.ipv4, &ip_info.ipv6).await {
                        Ok(id) => id,
                        Err(source) => {
                            errors.push(TeardownError::Lookup {
                                ipv4: ip_info.ipv4.iter().map(ToString::to_string).collect(),
                                ipv6: ip_info.ipv6.iter().map(ToString::to_string).collect(),
                                source,
                            });
                            continue;
                        }
                    }
                }
            };

            info!("Deleting host endpoint {} ({}/{})", id, container_id, ifname);
            if let Err(source) = self.driver.delete_endpoint_by_id(&id).await {
                errors.push(TeardownError::Delete { id, source });
            }
        }
        errors
    }
}
