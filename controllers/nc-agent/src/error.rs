//! Agent-specific error types.
//!
//! Library errors from CNS, IMDS and the Kubernetes API are wrapped so the
//! reconcile pass has a single error type.

use cns::CnsError;
use imds_client::ImdsError;
use thiserror::Error;

/// Errors that can occur in the NC agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// CNS conversion or API error
    #[error("CNS error: {0}")]
    Cns(#[from] CnsError),

    /// Instance metadata error
    #[error("IMDS error: {0}")]
    Imds(#[from] ImdsError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
