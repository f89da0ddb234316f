//! IMDS client errors

use thiserror::Error;

/// Errors that can occur when querying IMDS
#[derive(Debug, Error)]
pub enum ImdsError {
    /// HTTP request/response error
    #[error("error querying IMDS: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured endpoint cannot be turned into a request URL
    #[error("unable to build path to IMDS metadata: {0}")]
    InvalidEndpoint(String),

    /// IMDS answered with something other than 200 OK
    #[error("imds returned an unexpected status code {0}")]
    UnexpectedStatusCode(u16),

    /// The response body was not the expected JSON document
    #[error("error decoding IMDS response as json: {0}")]
    Decode(#[from] serde_json::Error),

    /// The compute document carried an empty `vmId`
    #[error("vm unique ID not found")]
    VmUniqueIdNotFound,

    /// A property was missing or not a string
    #[error("unable to parse IMDS metadata, {0} property is not a string")]
    InvalidProperty(&'static str),

    /// Every attempt failed; `source` is the last failure
    #[error("exhausted retries querying IMDS after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ImdsError>,
    },
}

impl ImdsError {
    /// The underlying failure, looking through the retry wrapper
    pub fn root_cause(&self) -> &ImdsError {
        match self {
            ImdsError::RetriesExhausted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ImdsError::InvalidEndpoint(_))
    }
}
