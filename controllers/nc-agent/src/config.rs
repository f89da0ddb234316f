//! Agent configuration from environment variables

use crate::error::AgentError;
use imds_client::{DEFAULT_ENDPOINT, DEFAULT_RETRY_ATTEMPTS, ImdsConfig};

const DEFAULT_NNC_NAMESPACE: &str = "kube-system";
const DEFAULT_CNS_URL: &str = "http://localhost:10090";

/// Runtime configuration of the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Node whose NodeNetworkConfig is reconciled; the NNC shares its name
    pub node_name: String,
    pub nnc_namespace: String,
    pub cns_url: String,
    pub imds_endpoint: String,
    pub imds_retry_attempts: u32,
}

impl AgentConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let node_name = lookup("NODE_NAME")
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                AgentError::InvalidConfig("NODE_NAME environment variable is required".to_string())
            })?;

        let imds_retry_attempts = match lookup("IMDS_RETRY_ATTEMPTS") {
            Some(raw) => raw.parse().map_err(|e| {
                AgentError::InvalidConfig(format!("IMDS_RETRY_ATTEMPTS '{raw}' is not a count: {e}"))
            })?,
            None => DEFAULT_RETRY_ATTEMPTS,
        };

        Ok(Self {
            node_name,
            nnc_namespace: lookup("NNC_NAMESPACE").unwrap_or_else(|| DEFAULT_NNC_NAMESPACE.to_string()),
            cns_url: lookup("CNS_URL").unwrap_or_else(|| DEFAULT_CNS_URL.to_string()),
            imds_endpoint: lookup("IMDS_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            imds_retry_attempts,
        })
    }

    /// IMDS client configuration derived from this config
    pub fn imds_config(&self) -> ImdsConfig {
        ImdsConfig::default()
            .with_endpoint(self.imds_endpoint.clone())
            .with_retry_attempts(self.imds_retry_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::from_lookup(lookup_from(&[("NODE_NAME", "aks-node-0")])).unwrap();

        assert_eq!(config.node_name, "aks-node-0");
        assert_eq!(config.nnc_namespace, "kube-system");
        assert_eq!(config.cns_url, "http://localhost:10090");
        assert_eq!(config.imds_endpoint, "http://169.254.169.254");
        assert_eq!(config.imds_retry_attempts, 3);
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::from_lookup(lookup_from(&[
            ("NODE_NAME", "aks-node-1"),
            ("NNC_NAMESPACE", "networking"),
            ("CNS_URL", "http://10.0.0.1:10090"),
            ("IMDS_ENDPOINT", "http://127.0.0.1:8080"),
            ("IMDS_RETRY_ATTEMPTS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.nnc_namespace, "networking");
        assert_eq!(config.cns_url, "http://10.0.0.1:10090");

        let imds = config.imds_config();
        assert_eq!(imds.endpoint, "http://127.0.0.1:8080");
        assert_eq!(imds.retry_attempts, 5);
    }

    #[test]
    fn test_node_name_required() {
        let err = AgentConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AgentError::InvalidConfig(ref msg) if msg.contains("NODE_NAME")));

        let err = AgentConfig::from_lookup(lookup_from(&[("NODE_NAME", "")])).unwrap_err();
        assert!(matches!(err, AgentError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_retry_attempts() {
        let err = AgentConfig::from_lookup(lookup_from(&[
            ("NODE_NAME", "aks-node-0"),
            ("IMDS_RETRY_ATTEMPTS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AgentError::InvalidConfig(ref msg) if msg.contains("many")));
    }
}
