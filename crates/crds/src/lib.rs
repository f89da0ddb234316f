//! Network container CRD Definitions
//!
//! Kubernetes Custom Resource Definitions published by the cluster control plane
//! and consumed by the node agent.

pub mod node_network_config;

pub use node_network_config::*;
