//! CNS API client
//!
//! Talks to the CNS REST API on the node. Every response carries a `Response`
//! envelope; a non-zero return code is surfaced as `CnsError::Api`.

use crate::cns_trait::CnsClientTrait;
use crate::error::CnsError;
use crate::models::{
    CreateNetworkContainerRequest, CreateNetworkContainerResponse, GetEndpointResponse,
    IPConfigsRequest, IPConfigsResponse, Response,
};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const CREATE_OR_UPDATE_NC_PATH: &[&str] = &["network", "createorupdatenetworkcontainer"];
const ENDPOINT_PATH: &[&str] = &["network", "endpoints"];
const RELEASE_IP_CONFIGS_PATH: &[&str] = &["network", "releaseipconfigs"];

/// CNS API client
#[derive(Debug, Clone)]
pub struct CnsClient {
    client: Client,
    base_url: String,
}

impl CnsClient {
    /// Create a new CNS client
    ///
    /// # Arguments
    /// * `base_url` - CNS base URL (e.g., "http://localhost:10090")
    pub fn new(base_url: String) -> Result<Self, CnsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(CnsError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one
    fn build_url(&self, segments: &[&str]) -> Result<Url, CnsError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CnsError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|()| CnsError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, CnsError> {
        debug!("GET {}", url);
        let path = url.path().to_string();

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CnsError::NotFound(path));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CnsError::UnexpectedStatus {
                method: "GET",
                path,
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, CnsError> {
        debug!("POST {}", url);
        let path = url.path().to_string();

        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(CnsError::UnexpectedStatus {
                method: "POST",
                path,
                status: status.as_u16(),
                body: body_text,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn check(response: Response) -> Result<(), CnsError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(CnsError::Api {
            code: response.return_code,
            message: response.message,
        })
    }
}

#[async_trait::async_trait]
impl CnsClientTrait for CnsClient {
    async fn create_or_update_network_container(
        &self,
        request: &CreateNetworkContainerRequest,
    ) -> Result<(), CnsError> {
        debug!(
            "Creating NC {} with {} secondary IPs",
            request.network_container_id,
            request.secondary_ip_configs.len()
        );
        let resp: CreateNetworkContainerResponse =
            self.post(self.build_url(CREATE_OR_UPDATE_NC_PATH)?, request).await?;
        check(resp.response)
    }

    async fn get_endpoint(&self, container_id: &str) -> Result<GetEndpointResponse, CnsError> {
        let mut segments = ENDPOINT_PATH.to_vec();
        segments.push(container_id);
        let url = self.build_url(&segments)?;
        let resp: GetEndpointResponse = self.get(url).await?;
        check(resp.response.clone())?;
        Ok(resp)
    }

    async fn release_ips(&self, request: &IPConfigsRequest) -> Result<(), CnsError> {
        let resp: IPConfigsResponse = self
            .post(self.build_url(RELEASE_IP_CONFIGS_PATH)?, request)
            .await?;
        check(resp.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_escapes_container_id() {
        let client = CnsClient::new("http://localhost:10090/".to_string()).unwrap();
        let mut segments = ENDPOINT_PATH.to_vec();
        segments.push("c1/../admin?x=1");
        let url = client.build_url(&segments).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:10090/network/endpoints/c1%2F..%2Fadmin%3Fx=1"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = CnsClient::new("http://localhost:10090/cns".to_string()).unwrap();
        let url = client.build_url(RELEASE_IP_CONFIGS_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:10090/cns/network/releaseipconfigs");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = CnsClient::new("not a url".to_string()).unwrap();
        assert!(matches!(
            client.build_url(RELEASE_IP_CONFIGS_PATH),
            Err(CnsError::InvalidUrl(_))
        ));
    }
}
