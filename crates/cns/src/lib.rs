//! CNS network container core
//!
//! Node-side handling of network containers (NCs): the IP pools the control plane
//! binds to a node and CNS leases out to pods.
//!
//! # Example
//!
//! ```no_run
//! use cns::{CnsClient, create_nc_request_from_static_nc};
//! use cns::CnsClientTrait;
//! use crds::NetworkContainer;
//!
//! # async fn example(nc: NetworkContainer) -> Result<(), Box<dyn std::error::Error>> {
//! let client = CnsClient::new("http://localhost:10090".to_string())?;
//!
//! // Expand the NC into its full secondary IP pool and hand it to CNS
//! let request = create_nc_request_from_static_nc(&nc)?;
//! client.create_or_update_network_container(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Inventory**: every address of the primary prefix and of `vnetblock` CIDR blocks
//! - **Endpoint teardown**: best-effort host endpoint removal ahead of IP release
//! - **Version skew**: compare built NC versions against IMDS

pub mod addrs;
pub mod client;
pub mod driver;
pub mod endpoint_manager;
pub mod error;
pub mod inventory;
pub mod models;
#[path = "trait.rs"]
pub mod cns_trait;
pub mod version;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use addrs::PrefixAddrs;
pub use client::CnsClient;
pub use cns_trait::CnsClientTrait;
pub use driver::EndpointDriver;
pub use endpoint_manager::EndpointManager;
pub use error::{CnsError, DriverError, TeardownError};
pub use inventory::{build_request, create_nc_request_from_static_nc, create_nc_requests_from_nnc};
pub use models::*;
pub use version::{VersionSkew, detect_version_skew};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockCnsClient, MockEndpointDriver};
