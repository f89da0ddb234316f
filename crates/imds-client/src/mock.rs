//! Mock ImdsClient for unit testing

use crate::error::ImdsError;
use crate::imds_trait::ImdsClientTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory metadata service
#[derive(Debug, Clone, Default)]
pub struct MockImdsClient {
    pub(crate) vm_unique_id: Arc<Mutex<String>>,
    pub(crate) nc_versions: Arc<Mutex<HashMap<String, String>>>,
    pub(crate) unavailable: Arc<Mutex<bool>>,
}

impl MockImdsClient {
    pub fn new(vm_unique_id: impl Into<String>) -> Self {
        Self {
            vm_unique_id: Arc::new(Mutex::new(vm_unique_id.into())),
            ..Default::default()
        }
    }

    /// Set the version IMDS reports for an NC (for test setup)
    pub fn set_nc_version(&self, nc_id: &str, version: &str) {
        self.nc_versions
            .lock()
            .unwrap()
            .insert(nc_id.to_string(), version.to_string());
    }

    /// Answer every query with a 503
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn check_available(&self) -> Result<(), ImdsError> {
        if *self.unavailable.lock().unwrap() {
            return Err(ImdsError::UnexpectedStatusCode(503));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ImdsClientTrait for MockImdsClient {
    async fn get_vm_unique_id(&self) -> Result<String, ImdsError> {
        self.check_available()?;
        let id = self.vm_unique_id.lock().unwrap().clone();
        if id.is_empty() {
            return Err(ImdsError::VmUniqueIdNotFound);
        }
        Ok(id)
    }

    async fn get_nc_versions(&self) -> Result<HashMap<String, String>, ImdsError> {
        self.check_available()?;
        Ok(self.nc_versions.lock().unwrap().clone())
    }

    async fn get_nc_version_by_id(&self, nc_id: &str) -> Result<Option<String>, ImdsError> {
        self.check_available()?;
        Ok(self.nc_versions.lock().unwrap().get(nc_id).cloned())
    }
}
