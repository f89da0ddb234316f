//! ImdsClient trait for mocking
//!
//! Lets the agent run against an in-memory metadata service in unit tests.

use crate::error::ImdsError;
use std::collections::HashMap;

/// Trait for IMDS client operations
#[async_trait::async_trait]
pub trait ImdsClientTrait: Send + Sync {
    async fn get_vm_unique_id(&self) -> Result<String, ImdsError>;
    async fn get_nc_versions(&self) -> Result<HashMap<String, String>, ImdsError>;
    async fn get_nc_version_by_id(&self, nc_id: &str) -> Result<Option<String>, ImdsError>;
}
