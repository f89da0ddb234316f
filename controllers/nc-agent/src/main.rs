//! NC Agent
//!
//! Programs the network containers listed in the node's `NodeNetworkConfig`
//! into CNS and warns when IMDS reports a newer NC version than the one
//! programmed.

mod agent;
mod config;
mod error;

#[cfg(test)]
mod agent_test;

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::error::AgentError;
use anyhow::Context;
use cns::CnsClient;
use crds::NodeNetworkConfig;
use imds_client::ImdsClient;
use kube::{Api, Client};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting NC Agent");

    let config = AgentConfig::from_env()?;

    info!("Configuration:");
    info!("  Node: {}", config.node_name);
    info!("  NNC namespace: {}", config.nnc_namespace);
    info!("  CNS URL: {}", config.cns_url);
    info!("  IMDS endpoint: {}", config.imds_endpoint);

    let kube_client = Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;
    let api: Api<NodeNetworkConfig> = Api::namespaced(kube_client, &config.nnc_namespace);
    let nnc = api.get(&config.node_name).await.map_err(AgentError::from).with_context(|| {
        format!(
            "failed to read NodeNetworkConfig {}/{}",
            config.nnc_namespace, config.node_name
        )
    })?;

    let cns = CnsClient::new(config.cns_url.clone())?;
    let imds = ImdsClient::new(config.imds_config())?;

    let report = Agent::new(cns, imds).reconcile(&nnc).await?;
    info!(
        "Reconcile pass complete on VM {}: {} NCs programmed, {} behind IMDS",
        report.vm_unique_id,
        report.programmed.len(),
        report.skews.len()
    );

    Ok(())
}
