use serde::{Deserialize, Serialize};

use crate::host::Host;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub host: Host,
}

/// Cluster view reported by a single node.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterStatus {
    pub nodes_up: Vec<NodeStatus>,
    pub nodes_down: Vec<Host>,
}

impl ClusterStatus {
    pub fn standalone(host: Host) -> Self {
        Self {
            nodes_up: vec![NodeStatus { host }],
            nodes_down: vec![],
        }
    }

    pub fn size(&self) -> usize {
        self.nodes_up.len() + self.nodes_down.len()
    }

    /// A node that only knows about itself has not joined any multi-node cluster yet.
    pub fn is_standalone(&self) -> bool {
        self.size() == 1
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.nodes_up
            .iter()
            .map(|node| &node.host)
            .chain(self.nodes_down.iter())
    }
}
