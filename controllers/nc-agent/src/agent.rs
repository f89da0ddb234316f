//! One reconcile pass of the NC agent.
//!
//! Reads the node's `NodeNetworkConfig`, programs every network container it
//! lists into CNS and reports NCs whose version IMDS says is newer than the one
//! just programmed.

use crate::error::AgentError;
use cns::{CnsClientTrait, VersionSkew, create_nc_requests_from_nnc, detect_version_skew};
use crds::NodeNetworkConfig;
use imds_client::ImdsClientTrait;
use tracing::{debug, info, warn};

/// Outcome of a reconcile pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub vm_unique_id: String,
    /// IDs of the NCs pushed to CNS, in NNC order
    pub programmed: Vec<String>,
    pub skews: Vec<VersionSkew>,
}

/// Reconciles a NodeNetworkConfig into CNS
pub struct Agent<C, I> {
    cns: C,
    imds: I,
}

impl<C, I> Agent<C, I>
where
    C: CnsClientTrait,
    I: ImdsClientTrait,
{
    pub fn new(cns: C, imds: I) -> Self {
        Self { cns, imds }
    }

    /// Run a single pass over `nnc`
    ///
    /// Conversion is all-or-nothing: a malformed NC fails the pass before anything
    /// is pushed. A failed IMDS version query only skips skew detection, since the
    /// NCs are already programmed by then.
    pub async fn reconcile(&self, nnc: &NodeNetworkConfig) -> Result<PassReport, AgentError> {
        let vm_unique_id = self.imds.get_vm_unique_id().await?;
        info!("Running on VM {}", vm_unique_id);

        let requests = create_nc_requests_from_nnc(nnc)?;
        if requests.is_empty() {
            info!("NodeNetworkConfig lists no network containers");
        }

        let mut programmed = Vec::with_capacity(requests.len());
        for request in &requests {
            debug!(
                "Pushing NC {} version {} with {} secondary IPs",
                request.network_container_id,
                request.version,
                request.secondary_ip_configs.len()
            );
            self.cns.create_or_update_network_container(request).await?;
            info!("Programmed NC {}", request.network_container_id);
            programmed.push(request.network_container_id.clone());
        }

        let skews = match self.imds.get_nc_versions().await {
            Ok(versions) => detect_version_skew(&requests, &versions),
            Err(e) => {
                warn!("Skipping NC version check, IMDS query failed: {}", e);
                Vec::new()
            }
        };
        for skew in &skews {
            warn!(
                "NC {} programmed at version {} but IMDS expects version {}",
                skew.nc_id, skew.built, skew.expected
            );
        }

        Ok(PassReport {
            vm_unique_id,
            programmed,
            skews,
        })
    }
}
