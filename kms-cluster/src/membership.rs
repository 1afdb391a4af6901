use ahash::HashSet;
use itertools::Itertools;

use kms_core::host::Host;
use kms_core::status::ClusterStatus;

/// Hosts that already belong to the cluster every other endpoint is joined to.
///
/// Fixed once discovery finishes. Nodes added during convergence are not recorded here.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Membership {
    nodes: HashSet<Host>,
}

impl Membership {
    pub fn seed(host: Host) -> Self {
        let mut nodes = HashSet::default();
        nodes.insert(host);
        Self { nodes }
    }

    pub fn from_status(status: &ClusterStatus) -> Self {
        Self {
            nodes: status.hosts().cloned().collect(),
        }
    }

    pub fn contains(&self, host: &Host) -> bool {
        self.nodes.contains(host)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Routing targets for requests that have to reach the cluster, in a stable order.
    pub fn hosts(&self) -> Vec<Host> {
        self.nodes.iter().cloned().sorted().collect()
    }
}
