//! Unit tests for the agent reconcile pass

#[cfg(test)]
mod tests {
    use crate::agent::Agent;
    use crate::error::AgentError;
    use cns::{CnsError, MockCnsClient, VersionSkew};
    use crds::*;
    use imds_client::MockImdsClient;

    fn nc(id: &str, primary_ip: &str, version: i64) -> NetworkContainer {
        NetworkContainer {
            id: id.to_string(),
            assignment_mode: AssignmentMode::Static,
            primary_ip: primary_ip.to_string(),
            subnet_address_space: "10.0.0.0/16".to_string(),
            node_ip: "10.240.0.4".to_string(),
            version,
            ..Default::default()
        }
    }

    fn nnc(network_containers: Vec<NetworkContainer>) -> NodeNetworkConfig {
        let mut nnc = NodeNetworkConfig::new("aks-node-0", NodeNetworkConfigSpec::default());
        nnc.status = Some(NodeNetworkConfigStatus {
            network_containers,
            ..Default::default()
        });
        nnc
    }

    #[tokio::test]
    async fn test_programs_every_nc() {
        let cns = MockCnsClient::new();
        let agent = Agent::new(cns.clone(), MockImdsClient::new("vm-1"));

        let report = agent
            .reconcile(&nnc(vec![nc("nc-1", "10.0.0.0/30", 5), nc("nc-2", "10.0.1.0/31", 2)]))
            .await
            .unwrap();

        assert_eq!(report.vm_unique_id, "vm-1");
        assert_eq!(report.programmed, vec!["nc-1".to_string(), "nc-2".to_string()]);
        assert!(report.skews.is_empty());

        let stored = cns.network_container("nc-1").unwrap();
        assert_eq!(stored.version, "5");
        assert_eq!(stored.secondary_ip_configs.len(), 4);
        assert_eq!(cns.network_container("nc-2").unwrap().secondary_ip_configs.len(), 2);
    }

    #[tokio::test]
    async fn test_reports_version_skew() {
        let imds = MockImdsClient::new("vm-1");
        imds.set_nc_version("nc-1", "7");
        imds.set_nc_version("nc-2", "2");
        let agent = Agent::new(MockCnsClient::new(), imds);

        let report = agent
            .reconcile(&nnc(vec![nc("nc-1", "10.0.0.0/30", 5), nc("nc-2", "10.0.1.0/31", 2)]))
            .await
            .unwrap();

        assert_eq!(
            report.skews,
            vec![VersionSkew {
                nc_id: "nc-1".to_string(),
                built: 5,
                expected: 7,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_nnc() {
        let cns = MockCnsClient::new();
        let agent = Agent::new(cns.clone(), MockImdsClient::new("vm-1"));

        let report = agent.reconcile(&nnc(Vec::new())).await.unwrap();
        assert!(report.programmed.is_empty());

        let mut without_status = nnc(Vec::new());
        without_status.status = None;
        let report = agent.reconcile(&without_status).await.unwrap();
        assert!(report.programmed.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_nc_pushes_nothing() {
        let cns = MockCnsClient::new();
        let agent = Agent::new(cns.clone(), MockImdsClient::new("vm-1"));

        let err = agent
            .reconcile(&nnc(vec![nc("nc-1", "10.0.0.0/30", 5), nc("nc-bad", "not-an-ip", 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AgentError::Cns(CnsError::Conversion { ref nc_id, .. }) if nc_id == "nc-bad"
        ));
        assert!(cns.network_container("nc-1").is_none());
    }

    #[tokio::test]
    async fn test_push_failure_is_returned() {
        let cns = MockCnsClient::new();
        cns.fail_create("store full");
        let agent = Agent::new(cns, MockImdsClient::new("vm-1"));

        let err = agent
            .reconcile(&nnc(vec![nc("nc-1", "10.0.0.0/30", 5)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Cns(CnsError::Api { .. })));
    }

    #[tokio::test]
    async fn test_vm_identity_required() {
        let cns = MockCnsClient::new();
        let agent = Agent::new(cns.clone(), MockImdsClient::new(""));

        let err = agent
            .reconcile(&nnc(vec![nc("nc-1", "10.0.0.0/30", 5)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Imds(imds_client::ImdsError::VmUniqueIdNotFound)));
        assert!(cns.network_container("nc-1").is_none());
    }
}
