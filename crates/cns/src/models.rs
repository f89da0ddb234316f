//! CNS API models
//!
//! Wire types exchanged with the CNS allocation subsystem. Field names follow the
//! CNS REST API, which mixes untagged (PascalCase) and camelCase structs.

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One leasable secondary IP and the NC version it was minted under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryIPConfig {
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(rename = "NCVersion")]
    pub nc_version: i64,
}

/// Address plus prefix length of a subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IPSubnet {
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(rename = "PrefixLength")]
    pub prefix_length: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IPConfiguration {
    #[serde(rename = "IPSubnet")]
    pub ip_subnet: IPSubnet,
    #[serde(rename = "DNSServers", default)]
    pub dns_servers: Vec<String>,
    #[serde(rename = "GatewayIPAddress", default)]
    pub gateway_ip_address: String,
    #[serde(rename = "GatewayIPv6Address", default)]
    pub gateway_ipv6_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceInfo {
    #[serde(rename = "MACAddress", default)]
    pub mac_address: String,
}

/// Kind of workload the network container serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkContainerType {
    #[default]
    Docker,
    Kubernetes,
    AzureContainerInstance,
}

/// Request handed to CNS to create (or update) a network container
///
/// Self-contained: CNS needs no further lookups to materialise the IP pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNetworkContainerRequest {
    #[serde(rename = "HostPrimaryIP")]
    pub host_primary_ip: String,
    #[serde(rename = "SecondaryIPConfigs")]
    pub secondary_ip_configs: HashMap<String, SecondaryIPConfig>,
    #[serde(rename = "NetworkContainerid")]
    pub network_container_id: String,
    #[serde(rename = "NetworkContainerType")]
    pub network_container_type: NetworkContainerType,
    /// Decimal string form of the NC version
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "IPConfiguration")]
    pub ip_configuration: IPConfiguration,
    #[serde(rename = "NCStatus", default)]
    pub nc_status: String,
    #[serde(rename = "NetworkInterfaceInfo")]
    pub network_interface_info: NetworkInterfaceInfo,
}

/// Return envelope carried by every CNS response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "ReturnCode")]
    pub return_code: i32,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl Response {
    /// Whether CNS reported success
    pub fn is_success(&self) -> bool {
        self.return_code == 0
    }
}

/// Request to lease or release the IPs of a pod interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IPConfigsRequest {
    #[serde(rename = "desiredIPAddresses", default)]
    pub desired_ip_addresses: Vec<String>,
    #[serde(rename = "podInterfaceID")]
    pub pod_interface_id: String,
    #[serde(rename = "infraContainerID")]
    pub infra_container_id: String,
    #[serde(default)]
    pub orchestrator_context: serde_json::Value,
    #[serde(default)]
    pub ifname: String,
    #[serde(default)]
    pub secondary_interfaces_exist: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IPConfigsResponse {
    pub response: Response,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNetworkContainerResponse {
    #[serde(rename = "Response")]
    pub response: Response,
}

/// IPs bound to one interface of a container, as recorded in CNS state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IPInfo {
    #[serde(rename = "IPv4", default)]
    pub ipv4: Vec<IpNet>,
    #[serde(rename = "IPv6", default)]
    pub ipv6: Vec<IpNet>,
    /// Host endpoint ID, if one was stored when the endpoint was created
    #[serde(rename = "HnsEndpointID", default, skip_serializing_if = "String::is_empty")]
    pub hns_endpoint_id: String,
    #[serde(rename = "HostVethName", default, skip_serializing_if = "String::is_empty")]
    pub host_veth_name: String,
}

impl IPInfo {
    /// Stored host endpoint ID, `None` when CNS never recorded one
    pub fn endpoint_id(&self) -> Option<&str> {
        Some(self.hns_endpoint_id.as_str()).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    #[serde(rename = "PodName", default)]
    pub pod_name: String,
    #[serde(rename = "PodNamespace", default)]
    pub pod_namespace: String,
    #[serde(rename = "IfnameToIPMap", default)]
    pub ifname_to_ip_map: BTreeMap<String, IPInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEndpointResponse {
    pub response: Response,
    pub endpoint_info: EndpointInfo,
}
