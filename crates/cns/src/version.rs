//! NC version skew detection
//!
//! IMDS reports the NC version the host has been programmed with. When it is ahead
//! of the version a request was built from, the node is running on a stale
//! NodeNetworkConfig.

use crate::models::CreateNetworkContainerRequest;
use std::collections::HashMap;

/// An NC whose built request lags the version IMDS expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSkew {
    pub nc_id: String,
    pub built: i64,
    pub expected: i64,
}

/// Compare built requests against the NC versions reported by IMDS
///
/// NCs missing from IMDS, or with an empty or non-numeric version there, are
/// skipped, as are requests whose own version does not parse.
pub fn detect_version_skew(
    requests: &[CreateNetworkContainerRequest],
    imds_versions: &HashMap<String, String>,
) -> Vec<VersionSkew> {
    requests
        .iter()
        .filter_map(|req| {
            let built: i64 = req.version.parse().ok()?;
            let expected: i64 = imds_versions.get(&req.network_container_id)?.parse().ok()?;
            (expected > built).then(|| VersionSkew {
                nc_id: req.network_container_id.clone(),
                built,
                expected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, version: &str) -> CreateNetworkContainerRequest {
        CreateNetworkContainerRequest {
            network_container_id: id.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reports_only_lagging_ncs() {
        let requests = vec![
            request("nc-behind", "1"),
            request("nc-current", "2"),
            request("nc-ahead", "5"),
            request("nc-unknown", "1"),
            request("nc-empty", "1"),
        ];
        let imds: HashMap<String, String> = [
            ("nc-behind", "3"),
            ("nc-current", "2"),
            ("nc-ahead", "4"),
            ("nc-empty", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let skew = detect_version_skew(&requests, &imds);
        assert_eq!(
            skew,
            vec![VersionSkew {
                nc_id: "nc-behind".to_string(),
                built: 1,
                expected: 3,
            }]
        );
    }
}
