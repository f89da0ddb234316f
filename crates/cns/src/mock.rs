//! In-memory CNS and endpoint driver for unit testing
//!
//! Both mocks store state behind `Arc<Mutex<..>>` so a test can keep a clone around
//! and inspect what the code under test did.

use crate::cns_trait::CnsClientTrait;
use crate::driver::EndpointDriver;
use crate::error::{CnsError, DriverError};
use crate::models::*;
use ipnet::IpNet;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock CNS client
#[derive(Debug, Clone, Default)]
pub struct MockCnsClient {
    pub(crate) endpoints: Arc<Mutex<HashMap<String, EndpointInfo>>>,
    pub(crate) network_containers: Arc<Mutex<HashMap<String, CreateNetworkContainerRequest>>>,
    pub(crate) released: Arc<Mutex<Vec<IPConfigsRequest>>>,
    pub(crate) create_error: Arc<Mutex<Option<String>>>,
    pub(crate) get_endpoint_error: Arc<Mutex<Option<String>>>,
    pub(crate) release_error: Arc<Mutex<Option<String>>>,
}

impl MockCnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store endpoint state for a container (for test setup)
    pub fn add_endpoint(&self, container_id: &str, info: EndpointInfo) {
        self.endpoints
            .lock()
            .unwrap()
            .insert(container_id.to_string(), info);
    }

    /// Make every `create_or_update_network_container` call fail with the given message
    pub fn fail_create(&self, message: &str) {
        *self.create_error.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `get_endpoint` call fail with the given message
    pub fn fail_get_endpoint(&self, message: &str) {
        *self.get_endpoint_error.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `release_ips` call fail with the given message
    pub fn fail_release(&self, message: &str) {
        *self.release_error.lock().unwrap() = Some(message.to_string());
    }

    /// Requests passed to `release_ips`, successful or not
    pub fn released(&self) -> Vec<IPConfigsRequest> {
        self.released.lock().unwrap().clone()
    }

    /// Stored network container by ID
    pub fn network_container(&self, id: &str) -> Option<CreateNetworkContainerRequest> {
        self.network_containers.lock().unwrap().get(id).cloned()
    }
}

#[async_trait::async_trait]
impl CnsClientTrait for MockCnsClient {
    async fn create_or_update_network_container(
        &self,
        request: &CreateNetworkContainerRequest,
    ) -> Result<(), CnsError> {
        if let Some(message) = self.create_error.lock().unwrap().clone() {
            return Err(CnsError::Api { code: 1, message });
        }
        self.network_containers
            .lock()
            .unwrap()
            .insert(request.network_container_id.clone(), request.clone());
        Ok(())
    }

    async fn get_endpoint(&self, container_id: &str) -> Result<GetEndpointResponse, CnsError> {
        if let Some(message) = self.get_endpoint_error.lock().unwrap().clone() {
            return Err(CnsError::Api { code: 1, message });
        }
        self.endpoints
            .lock()
            .unwrap()
            .get(container_id)
            .cloned()
            .map(|endpoint_info| GetEndpointResponse {
                response: Response::default(),
                endpoint_info,
            })
            .ok_or_else(|| CnsError::NotFound(format!("endpoint {container_id}")))
    }

    async fn release_ips(&self, request: &IPConfigsRequest) -> Result<(), CnsError> {
        self.released.lock().unwrap().push(request.clone());
        match self.release_error.lock().unwrap().clone() {
            Some(message) => Err(CnsError::Api { code: 1, message }),
            None => Ok(()),
        }
    }
}

/// Mock host endpoint driver
#[derive(Debug, Clone, Default)]
pub struct MockEndpointDriver {
    /// endpoint ID -> IPv4/IPv6 addresses it carries
    pub(crate) endpoints: Arc<Mutex<HashMap<String, Vec<IpNet>>>>,
    pub(crate) lookups: Arc<Mutex<Vec<Vec<IpNet>>>>,
    pub(crate) deleted: Arc<Mutex<Vec<String>>>,
    pub(crate) lookup_error: Arc<Mutex<Option<String>>>,
    pub(crate) delete_error: Arc<Mutex<Option<String>>>,
}

impl MockEndpointDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint carrying the given addresses (for test setup)
    pub fn add_endpoint(&self, id: &str, addrs: Vec<IpNet>) {
        self.endpoints.lock().unwrap().insert(id.to_string(), addrs);
    }

    pub fn fail_lookup(&self, message: &str) {
        *self.lookup_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_delete(&self, message: &str) {
        *self.delete_error.lock().unwrap() = Some(message.to_string());
    }

    /// Addresses passed to `find_endpoint_by_ip`, IPv4 then IPv6, per call
    pub fn lookups(&self) -> Vec<Vec<IpNet>> {
        self.lookups.lock().unwrap().clone()
    }

    /// IDs passed to `delete_endpoint_by_id`, in call order
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EndpointDriver for MockEndpointDriver {
    async fn find_endpoint_by_ip(&self, ipv4: &[IpNet], ipv6: &[IpNet]) -> Result<String, DriverError> {
        let wanted: Vec<IpNet> = ipv4.iter().chain(ipv6).copied().collect();
        self.lookups.lock().unwrap().push(wanted.clone());

        if let Some(message) = self.lookup_error.lock().unwrap().clone() {
            return Err(DriverError::Driver(message));
        }
        self.endpoints
            .lock()
            .unwrap()
            .iter()
            .find(|(_, addrs)| wanted.iter().any(|w| addrs.iter().any(|a| a.addr() == w.addr())))
            .map(|(id, _)| id.clone())
            .ok_or_else(|| DriverError::NotFound(format!("{wanted:?}")))
    }

    async fn delete_endpoint_by_id(&self, id: &str) -> Result<(), DriverError> {
        self.deleted.lock().unwrap().push(id.to_string());
        if let Some(message) = self.delete_error.lock().unwrap().clone() {
            return Err(DriverError::Driver(message));
        }
        self.endpoints.lock().unwrap().remove(id);
        Ok(())
    }
}
