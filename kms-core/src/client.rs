use async_trait::async_trait;

use crate::host::Host;
use crate::status::ClusterStatus;

/// Control-plane operations a cluster bootstrap needs from a KMS server.
///
/// Every call names the hosts it may be routed to. An implementation is free to pick
/// any of them (and to fail over between them) but must not send the request elsewhere.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn cluster_status(&self, hosts: &[Host]) -> anyhow::Result<ClusterStatus>;

    async fn add_node(&self, hosts: &[Host], node: &Host) -> anyhow::Result<()>;
}
