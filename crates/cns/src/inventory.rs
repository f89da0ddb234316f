//! Network container inventory construction
//!
//! Expands a static network container descriptor into the full set of secondary IP
//! configs CNS can lease to pods, and wraps it in a `CreateNetworkContainerRequest`.
//!
//! Every address of the primary prefix is added, network and broadcast included.
//! The NC's own primary IP is NOT removed from the pool either; callers must not
//! hand that address to a pod.

use crate::addrs::PrefixAddrs;
use crate::error::CnsError;
use crate::models::{
    CreateNetworkContainerRequest, IPConfiguration, IPSubnet, NetworkContainerType,
    NetworkInterfaceInfo, SecondaryIPConfig,
};
use crds::{NCType, NetworkContainer, NodeNetworkConfig};
use ipnet::IpNet;
use std::collections::HashMap;
use tracing::debug;

/// Builds the create request for a static NC from an already parsed primary prefix
///
/// Pure: no I/O and no shared state, so it is safe to call concurrently. For
/// `vnetblock` containers each IP assignment is parsed as a CIDR block and all of its
/// addresses are merged into the same map; a malformed block fails the whole build.
pub fn build_request(
    nc: &NetworkContainer,
    primary_prefix: IpNet,
    subnet: IPSubnet,
) -> Result<CreateNetworkContainerRequest, CnsError> {
    let mut secondary_ip_configs = HashMap::new();
    insert_prefix(&mut secondary_ip_configs, primary_prefix, nc.version);

    if nc.nc_type == NCType::VnetBlock {
        for assignment in &nc.ip_assignments {
            let block: IpNet = assignment.ip.parse().map_err(|source| CnsError::InvalidCidr {
                cidr: assignment.ip.clone(),
                source,
            })?;
            insert_prefix(&mut secondary_ip_configs, block, nc.version);
        }
    }

    debug!(
        "Built {} secondary IP configs for NC {} at version {}",
        secondary_ip_configs.len(),
        nc.id,
        nc.version
    );

    Ok(CreateNetworkContainerRequest {
        host_primary_ip: nc.node_ip.clone(),
        secondary_ip_configs,
        network_container_id: nc.id.clone(),
        network_container_type: NetworkContainerType::Docker,
        version: nc.version.to_string(),
        ip_configuration: IPConfiguration {
            ip_subnet: subnet,
            dns_servers: Vec::new(),
            gateway_ip_address: nc.default_gateway.clone(),
            gateway_ipv6_address: nc.default_gateway_v6.clone(),
        },
        nc_status: nc.status.clone(),
        network_interface_info: NetworkInterfaceInfo {
            mac_address: nc.mac_address.clone(),
        },
    })
}

fn insert_prefix(configs: &mut HashMap<String, SecondaryIPConfig>, prefix: IpNet, version: i64) {
    for addr in PrefixAddrs::new(prefix) {
        let ip_address = addr.to_string();
        configs.insert(
            ip_address.clone(),
            SecondaryIPConfig {
                ip_address,
                nc_version: version,
            },
        );
    }
}

/// Builds the create request for a static NC straight from its descriptor
///
/// `primaryIP` is the NC's primary prefix; the subnet embedded in the request pairs
/// the primary address with the prefix length of `subnetAddressSpace`.
pub fn create_nc_request_from_static_nc(
    nc: &NetworkContainer,
) -> Result<CreateNetworkContainerRequest, CnsError> {
    let primary_prefix: IpNet = nc.primary_ip.parse().map_err(|source| CnsError::InvalidPrimaryIp {
        ip: nc.primary_ip.clone(),
        source,
    })?;
    let subnet_prefix: IpNet =
        nc.subnet_address_space
            .parse()
            .map_err(|source| CnsError::InvalidSubnet {
                subnet: nc.subnet_address_space.clone(),
                source,
            })?;

    let subnet = IPSubnet {
        ip_address: primary_prefix.addr().to_string(),
        prefix_length: subnet_prefix.prefix_len(),
    };

    build_request(nc, primary_prefix, subnet)
}

/// Converts every network container in a NodeNetworkConfig status
///
/// Stops at the first NC that fails to convert.
pub fn create_nc_requests_from_nnc(
    nnc: &NodeNetworkConfig,
) -> Result<Vec<CreateNetworkContainerRequest>, CnsError> {
    let Some(status) = nnc.status.as_ref() else {
        return Ok(Vec::new());
    };

    status
        .network_containers
        .iter()
        .map(|nc| {
            create_nc_request_from_static_nc(nc).map_err(|e| CnsError::Conversion {
                nc_id: nc.id.clone(),
                source: Box::new(e),
            })
        })
        .collect()
}
