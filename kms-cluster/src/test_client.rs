use ahash::{HashMap, HashSet};
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use parking_lot::Mutex;

use kms_core::client::ClusterClient;
use kms_core::host::Host;
use kms_core::status::{ClusterStatus, NodeStatus};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Call {
    Status(Vec<Host>),
    AddNode(Vec<Host>, Host),
}

/// In-memory cluster that records every request it receives.
///
/// Hosts without a scripted status report themselves as standalone.
#[derive(Debug, Default)]
pub(crate) struct TestClient {
    statuses: HashMap<Host, ClusterStatus>,
    failing_status: HashSet<Host>,
    hanging_status: HashSet<Host>,
    failing_add: HashSet<Host>,
    hanging_add: HashSet<Host>,
    calls: Mutex<Vec<Call>>,
}

impl TestClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cluster(mut self, host: &str, up: &[&str], down: &[&str]) -> Self {
        let status = ClusterStatus {
            nodes_up: up
                .iter()
                .map(|h| NodeStatus { host: Host::from(*h) })
                .collect(),
            nodes_down: down.iter().map(|h| Host::from(*h)).collect(),
        };
        self.statuses.insert(Host::from(host), status);
        self
    }

    pub(crate) fn fail_status(mut self, host: &str) -> Self {
        self.failing_status.insert(Host::from(host));
        self
    }

    pub(crate) fn hang_status(mut self, host: &str) -> Self {
        self.hanging_status.insert(Host::from(host));
        self
    }

    pub(crate) fn fail_add(mut self, host: &str) -> Self {
        self.failing_add.insert(Host::from(host));
        self
    }

    pub(crate) fn hang_add(mut self, host: &str) -> Self {
        self.hanging_add.insert(Host::from(host));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn probed(&self) -> Vec<Host> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Status(hosts) => hosts.into_iter().next(),
                Call::AddNode(..) => None,
            })
            .collect()
    }

    pub(crate) fn added(&self) -> Vec<Host> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Status(_) => None,
                Call::AddNode(_, node) => Some(node),
            })
            .collect()
    }
}

#[async_trait]
impl ClusterClient for TestClient {
    async fn cluster_status(&self, hosts: &[Host]) -> anyhow::Result<ClusterStatus> {
        self.calls.lock().push(Call::Status(hosts.to_vec()));
        let [host] = hosts else {
            bail!("status probe must target exactly one host, got {:?}", hosts);
        };
        if self.failing_status.contains(host) {
            return Err(anyhow!("{} is unreachable", host));
        }
        if self.hanging_status.contains(host) {
            std::future::pending::<()>().await;
        }
        let status = self
            .statuses
            .get(host)
            .cloned()
            .unwrap_or_else(|| ClusterStatus::standalone(host.clone()));
        Ok(status)
    }

    async fn add_node(&self, hosts: &[Host], node: &Host) -> anyhow::Result<()> {
        self.calls
            .lock()
            .push(Call::AddNode(hosts.to_vec(), node.clone()));
        if hosts.is_empty() {
            bail!("add node {} without target hosts", node);
        }
        if self.failing_add.contains(node) {
            return Err(anyhow!("{} is already part of another cluster", node));
        }
        if self.hanging_add.contains(node) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}
