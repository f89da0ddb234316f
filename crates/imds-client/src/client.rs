//! IMDS API client
//!
//! Queries the Azure Instance Metadata Service for VM identity and the NC versions
//! the host has been programmed with. Every request carries the `Metadata: true`
//! header IMDS requires and asks for the JSON format of a pinned API version.

use crate::backoff::FibonacciBackoff;
use crate::error::ImdsError;
use crate::imds_trait::ImdsClientTrait;
use crate::models::NetworkMetadata;
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const VM_UNIQUE_ID_PROPERTY: &str = "vmId";
const COMPUTE_PATH: &str = "/metadata/instance/compute";
const NETWORK_PATH: &str = "/metadata/instance/network";
const API_VERSION: &str = "2021-01-01";
const METADATA_HEADER_KEY: &str = "Metadata";
const METADATA_HEADER_VALUE: &str = "true";

/// Default IMDS endpoint (link-local, reachable from every Azure VM)
pub const DEFAULT_ENDPOINT: &str = "http://169.254.169.254";
/// Default number of attempts per query
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ImdsConfig {
    pub endpoint: String,
    /// Attempts per query, including the first; 0 is treated as 1
    pub retry_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ImdsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ImdsConfig {
    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the number of attempts
    #[must_use]
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }
}

/// IMDS API client
#[derive(Debug, Clone)]
pub struct ImdsClient {
    client: Client,
    config: ImdsConfig,
}

impl ImdsClient {
    /// Create a new IMDS client
    pub fn new(config: ImdsConfig) -> Result<Self, ImdsError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ImdsConfig {
        &self.config
    }

    /// Run `op` until it succeeds or the attempt budget is spent
    async fn with_retries<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, ImdsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ImdsError>>,
    {
        let attempts = self.config.retry_attempts.max(1);
        let mut backoff = FibonacciBackoff::new(self.config.initial_backoff, self.config.max_backoff);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    let delay = backoff.next_backoff();
                    warn!(
                        "IMDS {} attempt {}/{} failed: {}, retrying in {:?}",
                        what, attempt, attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(ImdsError::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
            }
        }
    }

    fn metadata_url(&self, path: &str) -> Result<Url, ImdsError> {
        let joined = format!("{}{}", self.config.endpoint.trim_end_matches('/'), path);
        let mut url =
            Url::parse(&joined).map_err(|e| ImdsError::InvalidEndpoint(format!("{joined}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("api-version", API_VERSION)
            .append_pair("format", "json");
        Ok(url)
    }

    /// Fetch one metadata document as a JSON object
    async fn get_instance_metadata(&self, path: &str) -> Result<Map<String, Value>, ImdsError> {
        let url = self.metadata_url(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(METADATA_HEADER_KEY, METADATA_HEADER_VALUE)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ImdsError::UnexpectedStatusCode(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Unique ID of the VM the node runs on
    pub async fn get_vm_unique_id(&self) -> Result<String, ImdsError> {
        let vm_unique_id = self
            .with_retries("compute metadata", || async move {
                let compute = self.get_instance_metadata(COMPUTE_PATH).await?;
                match compute.get(VM_UNIQUE_ID_PROPERTY) {
                    Some(Value::String(id)) => Ok(id.clone()),
                    _ => Err(ImdsError::InvalidProperty(VM_UNIQUE_ID_PROPERTY)),
                }
            })
            .await?;

        if vm_unique_id.is_empty() {
            return Err(ImdsError::VmUniqueIdNotFound);
        }
        Ok(vm_unique_id)
    }

    /// NC ID -> NC version for every interface that carries an NC ID
    ///
    /// An NC whose version IMDS leaves empty is still listed, with an empty version.
    pub async fn get_nc_versions(&self) -> Result<HashMap<String, String>, ImdsError> {
        let network = self
            .with_retries("network metadata", || async move {
                let doc = self.get_instance_metadata(NETWORK_PATH).await?;
                Ok(serde_json::from_value::<NetworkMetadata>(Value::Object(doc))?)
            })
            .await?;
        debug!("Parsed IMDS network metadata: {:?}", network);

        Ok(network
            .interface
            .into_iter()
            .filter(|iface| !iface.nc_id.is_empty())
            .map(|iface| (iface.nc_id, iface.nc_version))
            .collect())
    }

    /// Version of one NC, `None` when IMDS does not list it
    pub async fn get_nc_version_by_id(&self, nc_id: &str) -> Result<Option<String>, ImdsError> {
        let mut versions = self.get_nc_versions().await?;
        Ok(versions.remove(nc_id))
    }
}

#[async_trait::async_trait]
impl ImdsClientTrait for ImdsClient {
    async fn get_vm_unique_id(&self) -> Result<String, ImdsError> {
        ImdsClient::get_vm_unique_id(self).await
    }

    async fn get_nc_versions(&self) -> Result<HashMap<String, String>, ImdsError> {
        ImdsClient::get_nc_versions(self).await
    }

    async fn get_nc_version_by_id(&self, nc_id: &str) -> Result<Option<String>, ImdsError> {
        ImdsClient::get_nc_version_by_id(self, nc_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_url() {
        let client = ImdsClient::new(ImdsConfig::default()).unwrap();
        let url = client.metadata_url(COMPUTE_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "http://169.254.169.254/metadata/instance/compute?api-version=2021-01-01&format=json"
        );
    }

    #[test]
    fn test_metadata_url_keeps_endpoint_path() {
        for endpoint in ["http://127.0.0.1:8080/imds", "http://127.0.0.1:8080/imds/"] {
            let client = ImdsClient::new(ImdsConfig::default().with_endpoint(endpoint)).unwrap();
            let url = client.metadata_url(NETWORK_PATH).unwrap();
            assert_eq!(url.path(), "/imds/metadata/instance/network");
            assert_eq!(url.query(), Some("api-version=2021-01-01&format=json"));
        }
    }

    #[test]
    fn test_invalid_endpoint() {
        let client = ImdsClient::new(ImdsConfig::default().with_endpoint("\u{7f}")).unwrap();
        assert!(matches!(
            client.metadata_url(COMPUTE_PATH),
            Err(ImdsError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = ImdsConfig::default().with_retry_attempts(5);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.retry_attempts, 5);
    }
}
