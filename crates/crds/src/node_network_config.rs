//! NodeNetworkConfig CRD
//!
//! Per-node network configuration published by the control plane. The status carries
//! the network containers (NCs) allocated to the node; each one is a versioned
//! descriptor the node agent expands into a pool of secondary IPs.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[kube(
    group = "acn.azure.com",
    version = "v1alpha",
    kind = "NodeNetworkConfig",
    shortname = "nnc",
    namespaced,
    status = "NodeNetworkConfigStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct NodeNetworkConfigSpec {
    /// Number of IPs the node asks the control plane for
    #[serde(default)]
    pub requested_ip_count: i64,

    /// IPs the node is returning to the control plane
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ips_not_in_use: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeNetworkConfigStatus {
    /// Batch scaling parameters for dynamic allocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Scaler>,

    /// Network containers allocated to this node
    #[serde(default)]
    pub network_containers: Vec<NetworkContainer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scaler {
    #[serde(default)]
    pub batch_size: i64,
    #[serde(default)]
    pub release_threshold_percent: i64,
    #[serde(default)]
    pub request_threshold_percent: i64,
    #[serde(default)]
    pub max_ip_count: i64,
}

/// How IPs in a network container are handed to the node
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMode {
    /// IPs are requested and released in batches
    #[default]
    Dynamic,

    /// The whole prefix belongs to the node
    Static,
}

/// Network container type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NCType {
    /// Individually assigned secondary IPs
    #[default]
    Vnet,

    /// Primary prefix plus explicit CIDR block assignments
    VnetBlock,

    /// Overlay network
    Overlay,

    /// Any type this agent does not know; handled like `vnet`
    #[serde(other)]
    Unknown,
}

/// A single IP (or, for `vnetblock` containers, a CIDR block) assigned to the NC
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IPAssignment {
    #[serde(default)]
    pub name: String,
    pub ip: String,
}

/// Network container descriptor
///
/// Owned by the control plane and treated as read-only by the node. `version`
/// increases monotonically every time the control plane changes the container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkContainer {
    pub id: String,

    #[serde(default)]
    pub assignment_mode: AssignmentMode,

    #[serde(default, rename = "type")]
    pub nc_type: NCType,

    /// Primary IP or prefix of the NC, e.g. `10.0.0.0/30`
    #[serde(default, rename = "primaryIP")]
    pub primary_ip: String,

    #[serde(default)]
    pub subnet_name: String,

    /// Address space of the subnet the NC lives in, e.g. `10.0.0.0/16`
    #[serde(default)]
    pub subnet_address_space: String,

    #[serde(default)]
    pub ip_assignments: Vec<IPAssignment>,

    #[serde(default)]
    pub default_gateway: String,

    #[serde(default, rename = "defaultGatewayV6")]
    pub default_gateway_v6: String,

    #[serde(default)]
    pub mac_address: String,

    #[serde(default, rename = "nodeIP")]
    pub node_ip: String,

    #[serde(default)]
    pub version: i64,

    #[serde(default)]
    pub status: String,
}
