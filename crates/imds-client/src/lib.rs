//! IMDS Client
//!
//! Client for the Azure Instance Metadata Service, used by the node agent to learn the
//! VM's identity and the network container versions the host expects.
//!
//! # Example
//!
//! ```no_run
//! use imds_client::{ImdsClient, ImdsConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ImdsClient::new(ImdsConfig::default().with_retry_attempts(5))?;
//!
//! let vm_id = client.get_vm_unique_id().await?;
//! let versions = client.get_nc_versions().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Retry Logic**: bounded attempts with Fibonacci backoff
//! - **Typed errors**: status, decode and not-found failures stay distinguishable
//!   through the retry wrapper via `ImdsError::root_cause`

pub mod backoff;
pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod imds_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_RETRY_ATTEMPTS, ImdsClient, ImdsConfig};
pub use error::ImdsError;
pub use imds_trait::ImdsClientTrait;
pub use models::*;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockImdsClient;
