//! IMDS response models
//!
//! Only the fields the node agent reads are modelled.
//! See: https://learn.microsoft.com/en-us/azure/virtual-machines/instance-metadata-service

use serde::{Deserialize, Serialize};

/// Network interface entry of the network metadata document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub nc_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nc_id: String,
}

/// `/metadata/instance/network` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMetadata {
    #[serde(default)]
    pub interface: Vec<NetworkInterface>,
}
