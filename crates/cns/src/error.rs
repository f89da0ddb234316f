//! CNS errors

use thiserror::Error;

/// Errors raised while building network container requests or talking to CNS
#[derive(Debug, Error)]
pub enum CnsError {
    /// A CIDR block assigned to the network container could not be parsed
    #[error("invalid CIDR block: {cidr}")]
    InvalidCidr {
        cidr: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    /// The network container's primary IP is not a prefix
    #[error("invalid primary IP: {ip}")]
    InvalidPrimaryIp {
        ip: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    /// The network container's subnet address space is not a prefix
    #[error("invalid subnet address space: {subnet}")]
    InvalidSubnet {
        subnet: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    /// Converting one NC out of a NodeNetworkConfig failed
    #[error("failed to convert network container {nc_id}")]
    Conversion {
        nc_id: String,
        #[source]
        source: Box<CnsError>,
    },

    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CNS base URL cannot be used to build request URLs
    #[error("invalid CNS URL: {0}")]
    InvalidUrl(String),

    /// CNS answered with a non-success HTTP status
    #[error("{method} {path} failed: {status} - {body}")]
    UnexpectedStatus {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    /// CNS answered with a non-zero return code
    #[error("CNS API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading the endpoint state out of CNS failed
    #[error("failed to read the endpoint from CNS state")]
    EndpointState(#[source] Box<CnsError>),

    /// Releasing IPs back to CNS failed
    #[error("failed to release IP from CNS")]
    Release(#[source] Box<CnsError>),
}

/// Errors raised by the host endpoint driver
#[derive(Debug, Error)]
pub enum DriverError {
    /// No endpoint matched the lookup
    #[error("endpoint not found: {0}")]
    NotFound(String),

    /// The driver rejected or failed the operation
    #[error("endpoint driver error: {0}")]
    Driver(String),
}

/// Errors raised while tearing down the host endpoints of a container
///
/// These never reach callers of `release_ips`; they are logged and dropped.
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error(transparent)]
    State(#[from] CnsError),

    #[error("failed to find endpoint with IPs {ipv4:?} / {ipv6:?}")]
    Lookup {
        ipv4: Vec<String>,
        ipv6: Vec<String>,
        #[source]
        source: DriverError,
    },

    #[error("failed to delete endpoint with id {id}")]
    Delete {
        id: String,
        #[source]
        source: DriverError,
    },

    #[error("endpoint teardown timed out after {0:?}")]
    Timeout(std::time::Duration),
}
