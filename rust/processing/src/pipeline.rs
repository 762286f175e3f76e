// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end analysis: segments in, sized tree out.

use pipenet_sizing::SizingEngine;
use pipenet_topology::{
    aggregate_loads, build_graph, build_tree, render_tree, PipeGraph, PipeTree, Segment,
};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::{AnalysisOutcome, AnalysisReport, Diagnostics, MajorJunction, NodeSize};
use crate::request::AnalysisRequest;

/// Graph degree at which a node counts as a major junction.
const MAJOR_JUNCTION_DEGREE: usize = 3;

/// Runs analysis requests against one configuration.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    engine: SizingEngine,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let engine = SizingEngine::new(config.sizing.clone());
        Self { config, engine }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn engine(&self) -> &SizingEngine {
        &self.engine
    }

    /// Builds the graph, extracts the tree from the requested root,
    /// aggregates demand and sizes every loaded node.
    ///
    /// An empty selection or an unresolvable root is a no-op, not an error.
    /// Malformed geometry or demand fails before any result is produced.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
        if request.segments.is_empty() {
            tracing::info!("No segments selected, nothing to analyze");
            return Ok(AnalysisOutcome::NoOp {
                reason: "no segments selected".into(),
            });
        }

        let segments = request
            .segments
            .iter()
            .cloned()
            .map(|input| input.into_segment())
            .collect::<pipenet_topology::Result<Vec<Segment>>>()?;

        let mut graph = build_graph(segments, &self.config.connectivity());

        let mut tree = match build_tree(&mut graph, &request.root, &self.config.tree()) {
            Ok(tree) => tree,
            Err(pipenet_topology::Error::RootUnresolved(reason)) => {
                tracing::info!(reason = %reason, "Root not resolved, nothing to analyze");
                return Ok(AnalysisOutcome::NoOp { reason });
            }
            Err(e) => return Err(e.into()),
        };

        let total_load = aggregate_loads(&mut tree, &graph, &request.demands)?;
        tree.sort_children_by_load()?;

        let node_sizes = self.size_nodes(&tree, &graph, request);
        let root_diameter = node_sizes.first().and_then(|s| s.diameter);
        let leaf_count = tree.root().map_or(0, |r| r.leaf_count);
        let average_leaf_load = (leaf_count > 0).then(|| total_load / leaf_count as f64);
        let major_junctions = major_junctions(&tree, &graph);
        let diagnostics = diagnostics(&tree, &graph);

        tracing::info!(
            segments = graph.segments().len(),
            tree_nodes = diagnostics.tree_nodes,
            leaves = diagnostics.leaves,
            cycles_pruned = diagnostics.cycles_pruned,
            unreached = diagnostics.unreached,
            total_load = total_load,
            root_diameter = ?root_diameter,
            "Analysis completed"
        );

        Ok(AnalysisOutcome::Completed(AnalysisReport {
            tree: tree.snapshot(&graph),
            node_sizes,
            root_diameter,
            total_load,
            average_leaf_load,
            major_junctions,
            diagnostics,
            rendered: render_tree(&tree, &graph),
        }))
    }

    /// Sizes every tree node in pre-order, clamped to the node's minimum
    /// connection size when the request names one for its handle.
    fn size_nodes(
        &self,
        tree: &PipeTree,
        graph: &PipeGraph,
        request: &AnalysisRequest,
    ) -> Vec<NodeSize> {
        let curve = &self.engine.config().general_curve;
        tree.preorder()
            .into_iter()
            .filter_map(|idx| tree.node(idx))
            .map(|node| {
                let handle = node.handle(graph);
                let min_connection =
                    handle.and_then(|h| request.min_connection_sizes.get(h).copied());
                let load = node.aggregated_load;
                NodeSize {
                    index: node.index,
                    handle: handle.map(str::to_string),
                    load,
                    effective_load: load * curve.rate(load),
                    diameter: self.engine.size_for_load(load, min_connection),
                }
            })
            .collect()
    }
}

/// Runs a single request with the given configuration.
pub fn analyze(request: &AnalysisRequest, config: &AnalysisConfig) -> Result<AnalysisOutcome> {
    Analyzer::new(config.clone()).analyze(request)
}

fn major_junctions(tree: &PipeTree, graph: &PipeGraph) -> Vec<MajorJunction> {
    tree.major_nodes(graph, MAJOR_JUNCTION_DEGREE)
        .into_iter()
        .filter_map(|idx| tree.node(idx))
        .map(|node| MajorJunction {
            index: node.index,
            handle: node.handle(graph).map(str::to_string),
            degree: graph.degree(node.node),
            load: node.aggregated_load,
        })
        .collect()
}

fn diagnostics(tree: &PipeTree, graph: &PipeGraph) -> Diagnostics {
    let stats = tree.stats();
    Diagnostics {
        strategy: graph.strategy(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        tree_nodes: stats.nodes,
        tree_edges: stats.edges,
        leaves: stats.leaves,
        mids: stats.mids,
        cycles_pruned: stats.cycles_pruned,
        unreached: stats.unreached,
        isolated: graph.isolated_nodes().len(),
        components: graph.connected_components().len(),
        max_depth: stats.max_depth,
        open_ended_mid: stats.open_ended_mid,
    }
}
