// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Undirected connectivity graph over a pipe selection.
//!
//! The graph owns the segments, the nodes and the adjacency relation. What a
//! node *is* depends on the [`Strategy`] that built it:
//! - **Explicit-node**: nodes are junction points (clusters of coincident
//!   endpoints and intersections), edges are the segments themselves.
//! - **Line-as-node**: nodes are the segments, edges are endpoint contacts
//!   between two segments.
//!
//! Adjacency is a non-owning relation: nodes refer to each other only through
//! [`NodeId`]s held in the graph's adjacency lists.

use std::collections::VecDeque;

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::connectivity::Strategy;
use crate::keys::{EdgeId, NodeId};
use crate::segment::Segment;
use crate::tolerance::{EndConnectivity, Tolerance};

/// What a graph node stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeAnchor {
    /// A cluster of coincident endpoints or intersection points.
    Junction { position: Point3<f64> },
    /// A whole segment, with per-end contact flags.
    Segment {
        segment: usize,
        ends: EndConnectivity,
    },
}

/// A node in the pipe graph.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: NodeId,
    pub anchor: NodeAnchor,
    /// Traversal flag; only meaningful during a single tree build.
    pub(crate) visited: bool,
}

/// What a graph edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// The segment at this position runs between the two junctions.
    Segment(usize),
    /// The two segment-nodes share a coincident endpoint.
    Contact,
}

/// An undirected edge in the pipe graph.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// Connectivity graph built from one selection of segments.
#[derive(Debug)]
pub struct PipeGraph {
    strategy: Strategy,
    tolerance: Tolerance,
    segments: Vec<Segment>,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    /// Adjacency list: node index → list of (neighbor, edge).
    adjacency: Vec<Vec<(NodeId, EdgeId)>>,
    handle_to_segment: FxHashMap<String, usize>,
}

impl PipeGraph {
    /// Creates an empty graph that will hold `segments`.
    pub(crate) fn with_segments(
        strategy: Strategy,
        tolerance: Tolerance,
        segments: Vec<Segment>,
    ) -> Self {
        let mut handle_to_segment = FxHashMap::default();
        for (i, seg) in segments.iter().enumerate() {
            // First occurrence wins for duplicate handles.
            handle_to_segment.entry(seg.handle().to_string()).or_insert(i);
        }
        Self {
            strategy,
            tolerance,
            segments,
            nodes: Vec::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
            handle_to_segment,
        }
    }

    // =========================================================================
    // Graph mutation
    // =========================================================================

    pub(crate) fn push_node(&mut self, anchor: NodeAnchor) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode {
            id,
            anchor,
            visited: false,
        });
        self.adjacency.push(Vec::new());
        id
    }

    /// Records an edge. A self-loop (zero-length segment) is kept as an edge
    /// but stays out of adjacency, so it adds no degree and closes no cycle.
    pub(crate) fn push_edge(&mut self, source: NodeId, target: NodeId, kind: EdgeKind) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(GraphEdge {
            id,
            source,
            target,
            kind,
        });
        if source == target {
            return id;
        }
        self.adjacency[source.0].push((target, id));
        self.adjacency[target.0].push((source, id));
        id
    }

    pub(crate) fn record_contact(&mut self, node: NodeId, contact: EndConnectivity) {
        if let Some(GraphNode {
            anchor: NodeAnchor::Segment { ends, .. },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            ends.merge(contact);
        }
    }

    // =========================================================================
    // Traversal flags
    // =========================================================================

    /// Clears every `visited` flag. Must run before each traversal.
    pub fn reset_traversal(&mut self) {
        for node in &mut self.nodes {
            node.visited = false;
        }
    }

    pub(crate) fn mark_visited(&mut self, id: NodeId) {
        self.nodes[id.0].visited = true;
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.visited)
    }

    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visited).count()
    }

    // =========================================================================
    // Graph accessors
    // =========================================================================

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(id.0)
    }

    /// Returns the (neighbor, edge) pairs of a node, in insertion order.
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, EdgeId)] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the degree (number of incident edge ends) of a node.
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Returns nodes with no incident edges.
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| self.degree(n.id) == 0)
            .map(|n| n.id)
            .collect()
    }

    /// Returns the per-end contact flags of a segment-node.
    pub fn end_connectivity(&self, id: NodeId) -> Option<EndConnectivity> {
        match self.node(id)?.anchor {
            NodeAnchor::Segment { ends, .. } => Some(ends),
            NodeAnchor::Junction { .. } => None,
        }
    }

    /// Returns the external handle a node stands for.
    ///
    /// Only segment-nodes have one; junctions are identified through the
    /// segment edge that reached them.
    pub fn node_handle(&self, id: NodeId) -> Option<&str> {
        match self.node(id)?.anchor {
            NodeAnchor::Segment { segment, .. } => self.segments.get(segment).map(Segment::handle),
            NodeAnchor::Junction { .. } => None,
        }
    }

    /// Returns the handle of the segment an edge stands for.
    pub fn edge_handle(&self, id: EdgeId) -> Option<&str> {
        match self.edge(id)?.kind {
            EdgeKind::Segment(segment) => self.segments.get(segment).map(Segment::handle),
            EdgeKind::Contact => None,
        }
    }

    /// Returns the segment index carrying the given handle.
    pub fn segment_index(&self, handle: &str) -> Option<usize> {
        self.handle_to_segment.get(handle).copied()
    }

    /// Resolves a segment handle to a node.
    ///
    /// Line-as-node graphs return the segment's own node; explicit-node graphs
    /// return the junction at the segment's start point.
    pub fn node_for_handle(&self, handle: &str) -> Option<NodeId> {
        let segment = self.segment_index(handle)?;
        match self.strategy {
            Strategy::LineAsNode => self
                .nodes
                .iter()
                .find(|n| {
                    matches!(n.anchor, NodeAnchor::Segment { segment: s, .. } if s == segment)
                })
                .map(|n| n.id),
            Strategy::ExplicitNode => self
                .edges
                .iter()
                .find(|e| e.kind == EdgeKind::Segment(segment))
                .map(|e| e.source),
        }
    }

    /// Distance from `p` to a node: to the junction point, or to the closest
    /// point on the segment.
    pub fn distance_to(&self, id: NodeId, p: &Point3<f64>) -> Option<f64> {
        match &self.node(id)?.anchor {
            NodeAnchor::Junction { position } => Some((position - p).norm()),
            NodeAnchor::Segment { segment, .. } => {
                self.segments.get(*segment).map(|s| s.distance_to_point(p))
            }
        }
    }

    /// Finds the node nearest to `p`. Ties go to the node that comes first in
    /// iteration order.
    pub fn nearest_node(&self, p: &Point3<f64>) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for node in &self.nodes {
            let Some(distance) = self.distance_to(node.id, p) else {
                continue;
            };
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((node.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    // =========================================================================
    // Connected components
    // =========================================================================

    /// Returns connected components as lists of node ids.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let n = self.node_count();
        let mut seen = vec![false; n];
        let mut components = Vec::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }

            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            seen[start] = true;
            queue.push_back(NodeId(start));

            while let Some(node) = queue.pop_front() {
                component.push(node);
                for &(neighbor, _) in self.neighbors(node) {
                    if !seen[neighbor.0] {
                        seen[neighbor.0] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            components.push(component);
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junction_graph() -> PipeGraph {
        let segments = vec![
            Segment::planar("a", [0.0, 0.0], [1.0, 0.0]).unwrap(),
            Segment::planar("b", [1.0, 0.0], [2.0, 0.0]).unwrap(),
        ];
        let mut g =
            PipeGraph::with_segments(Strategy::ExplicitNode, Tolerance::default(), segments);
        let n0 = g.push_node(NodeAnchor::Junction {
            position: Point3::new(0.0, 0.0, 0.0),
        });
        let n1 = g.push_node(NodeAnchor::Junction {
            position: Point3::new(1.0, 0.0, 0.0),
        });
        let n2 = g.push_node(NodeAnchor::Junction {
            position: Point3::new(2.0, 0.0, 0.0),
        });
        g.push_node(NodeAnchor::Junction {
            position: Point3::new(9.0, 9.0, 0.0),
        });
        g.push_edge(n0, n1, EdgeKind::Segment(0));
        g.push_edge(n1, n2, EdgeKind::Segment(1));
        g
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = junction_graph();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(NodeId(1)), 2);
        assert_eq!(g.neighbors(NodeId(0)), &[(NodeId(1), EdgeId(0))]);
        assert_eq!(g.neighbors(NodeId(2)), &[(NodeId(1), EdgeId(1))]);
        assert_eq!(g.isolated_nodes(), vec![NodeId(3)]);
    }

    #[test]
    fn handles_resolve_through_edges() {
        let g = junction_graph();
        assert_eq!(g.node_handle(NodeId(0)), None);
        assert_eq!(g.edge_handle(EdgeId(1)), Some("b"));
        assert_eq!(g.node_for_handle("b"), Some(NodeId(1)));
        assert_eq!(g.node_for_handle("zz"), None);
    }

    #[test]
    fn nearest_node_prefers_first_on_ties() {
        let g = junction_graph();
        assert_eq!(g.nearest_node(&Point3::new(0.5, 0.0, 0.0)), Some(NodeId(0)));
        assert_eq!(g.nearest_node(&Point3::new(8.0, 8.0, 0.0)), Some(NodeId(3)));
    }

    #[test]
    fn visited_flags_reset() {
        let mut g = junction_graph();
        g.mark_visited(NodeId(2));
        assert!(g.is_visited(NodeId(2)));
        assert_eq!(g.visited_count(), 1);
        g.reset_traversal();
        assert_eq!(g.visited_count(), 0);
    }

    #[test]
    fn components_split_isolated_nodes() {
        let g = junction_graph();
        let components = g.connected_components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(components[1], vec![NodeId(3)]);
    }

    #[test]
    fn empty_graph_has_no_nearest_node() {
        let g = PipeGraph::with_segments(Strategy::LineAsNode, Tolerance::default(), Vec::new());
        assert!(g.is_empty());
        assert_eq!(g.nearest_node(&Point3::origin()), None);
    }
}
