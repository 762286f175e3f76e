// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analysis results handed back to the host.

use pipenet_topology::{Strategy, TreeIndex, TreeSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Result of running the pipeline on one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Completed(AnalysisReport),
    /// Nothing to analyze; the host should leave the drawing untouched.
    NoOp { reason: String },
}

impl AnalysisOutcome {
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Completed(report) => Some(report),
            AnalysisOutcome::NoOp { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<AnalysisReport> {
        match self {
            AnalysisOutcome::Completed(report) => Some(report),
            AnalysisOutcome::NoOp { .. } => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, AnalysisOutcome::NoOp { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Recommended diameter for one tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub index: TreeIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Aggregated 15A-equivalent load through the node.
    pub load: f64,
    /// Load after the simultaneous-use rate.
    pub effective_load: f64,
    /// Diameter (mm); `None` when the node carries no load.
    pub diameter: Option<u32>,
}

/// A junction where three or more runs meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorJunction {
    pub index: TreeIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub degree: usize,
    pub load: f64,
}

/// Counts describing the graph and the extracted tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub strategy: Strategy,
    /// Graph nodes.
    pub nodes: usize,
    /// Graph edges.
    pub edges: usize,
    pub tree_nodes: usize,
    pub tree_edges: usize,
    pub leaves: usize,
    pub mids: usize,
    pub cycles_pruned: usize,
    /// Graph nodes not reachable from the root.
    pub unreached: usize,
    /// Graph nodes without any connection.
    pub isolated: usize,
    pub components: usize,
    pub max_depth: usize,
    /// Mid nodes with a physically free end.
    pub open_ended_mid: usize,
}

/// Full analysis of one pipe network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub tree: TreeSnapshot,
    /// Sizes in tree pre-order.
    pub node_sizes: Vec<NodeSize>,
    /// Final recommendation for the network's main.
    pub root_diameter: Option<u32>,
    pub total_load: f64,
    /// `None` when the tree has no demand-bearing node.
    pub average_leaf_load: Option<f64>,
    pub major_junctions: Vec<MajorJunction>,
    pub diagnostics: Diagnostics,
    /// Text rendering of the tree.
    #[serde(skip)]
    pub rendered: String,
}

impl AnalysisReport {
    /// Size entry for a handle.
    pub fn size_of(&self, handle: &str) -> Option<&NodeSize> {
        self.node_sizes
            .iter()
            .find(|s| s.handle.as_deref() == Some(handle))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Human readable summary printed under the rendered tree.
    pub fn summary(&self) -> String {
        let d = &self.diagnostics;
        let mut out = format!(
            "{} nodes, {} edges ({} in tree), {} leaves, {} mids, max depth {}\n",
            d.nodes, d.edges, d.tree_edges, d.leaves, d.mids, d.max_depth
        );
        if d.cycles_pruned > 0 {
            out.push_str(&format!("{} cycle edges pruned\n", d.cycles_pruned));
        }
        if d.unreached > 0 {
            out.push_str(&format!("{} nodes unreachable from root\n", d.unreached));
        }
        if d.open_ended_mid > 0 {
            out.push_str(&format!("{} open-ended mid nodes\n", d.open_ended_mid));
        }
        out.push_str(&format!("total load {:.2}", self.total_load));
        if let Some(avg) = self.average_leaf_load {
            out.push_str(&format!(", {:.2} per leaf", avg));
        }
        match self.root_diameter {
            Some(d) => out.push_str(&format!("\nmain diameter {} mm", d)),
            None => out.push_str("\nno load, main not sized"),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_outcome_is_tagged() {
        let outcome = AnalysisOutcome::NoOp {
            reason: "no segments".into(),
        };
        let json = outcome.to_json().unwrap();
        assert!(json.contains(r#""status": "no_op""#));
        assert!(json.contains("no segments"));
        assert!(outcome.is_noop());
        assert!(outcome.report().is_none());
    }
}
