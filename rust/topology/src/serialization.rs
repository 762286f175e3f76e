// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of an analyzed pipe tree.
//!
//! A snapshot is detached from the graph: every node carries its resolved
//! handle, so hosts can map results back onto drawing entities without the
//! graph in hand.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::PipeGraph;
use crate::keys::{NodeId, TreeIndex};
use crate::tree::{PipeTree, Role, TraversalOrder, TreeStats};

/// Serializable representation of a pipe tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub order: TraversalOrder,
    pub aggregated: bool,
    pub stats: TreeStats,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub index: TreeIndex,
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<TreeIndex>,
    pub children: Vec<TreeIndex>,
    pub depth: usize,
    pub role: Role,
    pub open_ended: bool,
    pub demand: f64,
    pub aggregated_load: f64,
    pub leaf_count: usize,
}

impl PipeTree {
    /// Creates a detached snapshot, nodes in pre-order.
    pub fn snapshot(&self, graph: &PipeGraph) -> TreeSnapshot {
        let nodes = self
            .preorder()
            .into_iter()
            .filter_map(|idx| self.node(idx))
            .map(|n| NodeSnapshot {
                index: n.index,
                node: n.node,
                handle: n.handle(graph).map(str::to_string),
                parent: n.parent,
                children: n.children.clone(),
                depth: n.depth,
                role: n.role,
                open_ended: n.open_ended,
                demand: n.demand,
                aggregated_load: n.aggregated_load,
                leaf_count: n.leaf_count,
            })
            .collect();

        TreeSnapshot {
            order: self.order(),
            aggregated: self.is_aggregated(),
            stats: self.stats(),
            nodes,
        }
    }
}

impl TreeSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Snapshot node carrying the given handle.
    pub fn find(&self, handle: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.handle.as_deref() == Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_loads;
    use crate::connectivity::{build_graph, ConnectivityConfig};
    use crate::segment::Segment;
    use crate::tree::{build_tree, RootSelector, TreeConfig};
    use std::collections::HashMap;

    fn snapshot() -> TreeSnapshot {
        let segments = vec![
            Segment::planar("riser", [0.0, 0.0], [0.0, 3.0]).unwrap(),
            Segment::planar("wc", [0.0, 3.0], [2.0, 3.0]).unwrap(),
        ];
        let mut graph = build_graph(segments, &ConnectivityConfig::default());
        let mut tree = build_tree(
            &mut graph,
            &RootSelector::Handle("riser".into()),
            &TreeConfig::default(),
        )
        .unwrap();
        let demands: HashMap<String, f64> = [("wc".to_string(), 4.9)].into_iter().collect();
        aggregate_loads(&mut tree, &graph, &demands).unwrap();
        tree.snapshot(&graph)
    }

    #[test]
    fn snapshot_carries_handles_and_loads() {
        let snap = snapshot();
        assert!(snap.aggregated);
        assert_eq!(snap.stats.leaves, 1);
        assert_eq!(snap.nodes[0].role, Role::Root);
        assert_eq!(snap.nodes[0].aggregated_load, 4.9);

        let wc = snap.find("wc").unwrap();
        assert_eq!(wc.role, Role::Leaf);
        assert_eq!(wc.parent, Some(TreeIndex(0)));
        assert_eq!(wc.demand, 4.9);
    }

    #[test]
    fn json_round_trip() {
        let snap = snapshot();
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"role\": \"leaf\""));
        assert!(!json.contains("\"parent\": null"));
        assert_eq!(TreeSnapshot::from_json(&json).unwrap(), snap);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            TreeSnapshot::from_json("{\"nodes\": 3}"),
            Err(Error::Serialization(_))
        ));
    }
}
