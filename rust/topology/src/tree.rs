// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooted tree extraction and role classification.
//!
//! A [`PipeTree`] is an acyclic view over a [`PipeGraph`], discovered from a
//! chosen root. Tree nodes live in a flat arena indexed by [`TreeIndex`];
//! parents are plain indices, so there are no ownership cycles. Arena order
//! is discovery order, which means every child has a higher index than its
//! parent.
//!
//! Edges that lead back to an already visited node are pruned. This keeps
//! one branch of every cycle and discards the other.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::connectivity::Strategy;
use crate::error::{Error, Result};
use crate::graph::PipeGraph;
use crate::keys::{EdgeId, NodeId, TreeIndex};
use crate::segment::Coords;

/// How the tree root is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootSelector {
    /// The node nearest to a picked point.
    Point(Coords),
    /// The node standing for the segment with this handle.
    Handle(String),
    /// An explicit graph node.
    Node(NodeId),
}

/// Order in which the graph is explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// Tree extraction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub order: TraversalOrder,
    /// Fail instead of descending past this depth.
    pub max_depth: Option<usize>,
}

/// Topological role of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Root,
    Mid,
    Leaf,
}

impl Role {
    /// Marker glyph used by the text renderer.
    pub fn marker(self) -> char {
        match self {
            Role::Root => '●',
            Role::Mid => '◆',
            Role::Leaf => '■',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Root => "Root",
            Role::Mid => "Mid",
            Role::Leaf => "Leaf",
        }
    }
}

/// One node of the extracted tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub index: TreeIndex,
    /// Graph node this tree node stands for.
    pub node: NodeId,
    /// Graph edge through which the node was discovered (`None` for the root).
    pub via_edge: Option<EdgeId>,
    pub parent: Option<TreeIndex>,
    pub children: Vec<TreeIndex>,
    pub depth: usize,
    pub role: Role,
    /// Physical open-end test on the underlying graph node.
    pub open_ended: bool,
    /// Own demand; only set on demand-bearing (childless) nodes.
    pub demand: f64,
    /// Sum of demands in the subtree rooted here.
    pub aggregated_load: f64,
    /// Number of demand-bearing nodes in the subtree rooted here.
    pub leaf_count: usize,
}

impl TreeNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// A node carries demand iff it has no children.
    pub fn is_demand_bearing(&self) -> bool {
        self.children.is_empty()
    }

    /// External handle of this node.
    ///
    /// Segment-nodes carry their own handle; junctions borrow the handle of
    /// the segment edge that reached them. An explicit-node root has none.
    pub fn handle<'g>(&self, graph: &'g PipeGraph) -> Option<&'g str> {
        graph
            .node_handle(self.node)
            .or_else(|| self.via_edge.and_then(|e| graph.edge_handle(e)))
    }
}

/// Summary counts of an extracted tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub edges: usize,
    pub leaves: usize,
    pub mids: usize,
    pub max_depth: usize,
    pub cycles_pruned: usize,
    pub unreached: usize,
    /// Mid nodes that physically have a free end but carry no demand.
    pub open_ended_mid: usize,
}

/// Rooted, acyclic view over a pipe graph.
#[derive(Debug, Clone, Default)]
pub struct PipeTree {
    nodes: Vec<TreeNode>,
    order: TraversalOrder,
    cycles_pruned: usize,
    unreached: usize,
    pub(crate) aggregated: bool,
}

impl PipeTree {
    fn push(
        &mut self,
        node: NodeId,
        via_edge: Option<EdgeId>,
        parent: Option<TreeIndex>,
        depth: usize,
        open_ended: bool,
    ) -> TreeIndex {
        let index = TreeIndex(self.nodes.len());
        self.nodes.push(TreeNode {
            index,
            node,
            via_edge,
            parent,
            children: Vec::new(),
            depth,
            role: Role::Root,
            open_ended,
            demand: 0.0,
            aggregated_load: 0.0,
            leaf_count: 0,
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(index);
        }
        index
    }

    fn assign_roles(&mut self) {
        for node in &mut self.nodes {
            node.role = match (node.parent, node.children.is_empty()) {
                (None, _) => Role::Root,
                (Some(_), true) => Role::Leaf,
                (Some(_), false) => Role::Mid,
            };
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    pub fn node(&self, index: TreeIndex) -> Option<&TreeNode> {
        self.nodes.get(index.0)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [TreeNode] {
        &mut self.nodes
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Number of distinct graph edges discarded because they closed a cycle.
    pub fn cycles_pruned(&self) -> usize {
        self.cycles_pruned
    }

    /// Number of graph nodes not reachable from the root.
    pub fn unreached(&self) -> usize {
        self.unreached
    }

    pub fn is_aggregated(&self) -> bool {
        self.aggregated
    }

    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter().filter(|n| n.role == Role::Leaf)
    }

    /// Total load at the root, or 0 for an empty tree.
    pub fn total_load(&self) -> f64 {
        self.root().map_or(0.0, |r| r.aggregated_load)
    }

    /// Returns node indices in pre-order, following the current child order.
    pub fn preorder(&self) -> Vec<TreeIndex> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<TreeIndex> = self.root().map(|r| r.index).into_iter().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.nodes[idx.0].children.iter().rev().copied());
        }
        out
    }

    /// Reorders every child list by descending aggregated load.
    ///
    /// The sort is stable, so equal loads keep discovery order.
    pub fn sort_children_by_load(&mut self) -> Result<()> {
        if !self.aggregated {
            return Err(Error::LoadsNotAggregated);
        }
        let loads: Vec<f64> = self.nodes.iter().map(|n| n.aggregated_load).collect();
        for node in &mut self.nodes {
            node.children
                .sort_by(|a, b| loads[b.0].total_cmp(&loads[a.0]));
        }
        Ok(())
    }

    /// Tree nodes whose graph node has at least `min_degree` connections,
    /// heaviest first.
    pub fn major_nodes(&self, graph: &PipeGraph, min_degree: usize) -> Vec<TreeIndex> {
        let mut major: Vec<&TreeNode> = self
            .nodes
            .iter()
            .filter(|n| graph.degree(n.node) >= min_degree)
            .collect();
        major.sort_by(|a, b| b.aggregated_load.total_cmp(&a.aggregated_load));
        major.into_iter().map(|n| n.index).collect()
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            edges: self.nodes.len().saturating_sub(1),
            cycles_pruned: self.cycles_pruned,
            unreached: self.unreached,
            ..TreeStats::default()
        };
        for node in &self.nodes {
            match node.role {
                Role::Leaf => stats.leaves += 1,
                Role::Mid => {
                    stats.mids += 1;
                    if node.open_ended {
                        stats.open_ended_mid += 1;
                    }
                }
                Role::Root => {}
            }
            stats.max_depth = stats.max_depth.max(node.depth);
        }
        stats
    }
}

/// Resolves a root selector to a graph node.
pub fn resolve_root(graph: &PipeGraph, selector: &RootSelector) -> Result<NodeId> {
    if graph.is_empty() {
        return Err(Error::RootUnresolved("graph is empty".into()));
    }
    match selector {
        RootSelector::Point(coords) => {
            if !coords.is_finite() {
                return Err(Error::NonFinitePickPoint);
            }
            graph
                .nearest_node(&coords.to_point())
                .ok_or_else(|| Error::RootUnresolved("no node near pick point".into()))
        }
        RootSelector::Handle(handle) => graph
            .node_for_handle(handle)
            .ok_or_else(|| Error::RootUnresolved(format!("no segment with handle {handle:?}"))),
        RootSelector::Node(id) => graph
            .node(*id)
            .map(|n| n.id)
            .ok_or_else(|| Error::RootUnresolved(format!("no node with id {id}"))),
    }
}

/// Physical open-end test for a graph node.
fn open_ended(graph: &PipeGraph, id: NodeId) -> bool {
    match graph.strategy() {
        Strategy::LineAsNode => graph
            .end_connectivity(id)
            .map_or(true, |ends| ends.is_open_ended()),
        Strategy::ExplicitNode => graph.degree(id) <= 1,
    }
}

/// Extracts the rooted tree reachable from `selector`.
///
/// All traversal flags on `graph` are reset first. An unresolvable root
/// fails before anything is visited.
pub fn build_tree(
    graph: &mut PipeGraph,
    selector: &RootSelector,
    config: &TreeConfig,
) -> Result<PipeTree> {
    let root = resolve_root(graph, selector)?;
    graph.reset_traversal();

    let mut tree = PipeTree {
        order: config.order,
        ..PipeTree::default()
    };
    let mut pruned: FxHashSet<EdgeId> = FxHashSet::default();

    graph.mark_visited(root);
    let root_index = tree.push(root, None, None, 0, open_ended(graph, root));

    match config.order {
        TraversalOrder::DepthFirst => {
            depth_first(graph, &mut tree, root_index, config.max_depth, &mut pruned)?
        }
        TraversalOrder::BreadthFirst => {
            breadth_first(graph, &mut tree, root_index, config.max_depth, &mut pruned)?
        }
    }

    tree.cycles_pruned = pruned.len();
    tree.unreached = graph.node_count() - graph.visited_count();
    tree.assign_roles();

    tracing::debug!(
        root = %root,
        order = ?config.order,
        nodes = tree.len(),
        cycles_pruned = tree.cycles_pruned,
        unreached = tree.unreached,
        "Tree extracted"
    );
    if tree.cycles_pruned > 0 {
        tracing::info!(
            cycles_pruned = tree.cycles_pruned,
            "Cycle edges discarded during traversal"
        );
    }

    Ok(tree)
}

/// Outcome of examining one neighbour of a tree node.
enum Step {
    Descend(TreeIndex),
    Skip,
}

/// Handles one (neighbour, edge) pair seen from tree node `from`.
fn visit(
    graph: &mut PipeGraph,
    tree: &mut PipeTree,
    from: TreeIndex,
    (neighbor, edge): (NodeId, EdgeId),
    max_depth: Option<usize>,
    pruned: &mut FxHashSet<EdgeId>,
) -> Result<Step> {
    let parent_node = tree.nodes[from.0].parent.map(|p| tree.nodes[p.0].node);
    if parent_node == Some(neighbor) {
        return Ok(Step::Skip);
    }
    if graph.is_visited(neighbor) {
        pruned.insert(edge);
        return Ok(Step::Skip);
    }

    let depth = tree.nodes[from.0].depth + 1;
    if let Some(limit) = max_depth {
        if depth > limit {
            return Err(Error::DepthLimitExceeded(limit));
        }
    }

    graph.mark_visited(neighbor);
    let open = open_ended(graph, neighbor);
    Ok(Step::Descend(tree.push(
        neighbor,
        Some(edge),
        Some(from),
        depth,
        open,
    )))
}

/// Iterative depth-first traversal.
///
/// Each stack frame keeps a cursor into its node's neighbour list, so the
/// discovery order is exactly that of the recursive formulation.
fn depth_first(
    graph: &mut PipeGraph,
    tree: &mut PipeTree,
    root: TreeIndex,
    max_depth: Option<usize>,
    pruned: &mut FxHashSet<EdgeId>,
) -> Result<()> {
    let mut stack: Vec<(TreeIndex, usize)> = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (current, cursor) = *top;
        top.1 += 1;

        let node = tree.nodes[current.0].node;
        let Some(&pair) = graph.neighbors(node).get(cursor) else {
            stack.pop();
            continue;
        };

        if let Step::Descend(child) = visit(graph, tree, current, pair, max_depth, pruned)? {
            stack.push((child, 0));
        }
    }

    Ok(())
}

fn breadth_first(
    graph: &mut PipeGraph,
    tree: &mut PipeTree,
    root: TreeIndex,
    max_depth: Option<usize>,
    pruned: &mut FxHashSet<EdgeId>,
) -> Result<()> {
    let mut queue = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        let node = tree.nodes[current.0].node;
        let neighbors = graph.neighbors(node).to_vec();
        for pair in neighbors {
            if let Step::Descend(child) = visit(graph, tree, current, pair, max_depth, pruned)? {
                queue.push_back(child);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::{build_graph, ConnectivityConfig, IntersectionMode};
    use crate::segment::Segment;
    use crate::tolerance::Tolerance;

    fn seg(h: &str, a: [f64; 2], b: [f64; 2]) -> Segment {
        Segment::planar(h, a, b).unwrap()
    }

    fn graph(segments: Vec<Segment>, strategy: Strategy) -> PipeGraph {
        build_graph(
            segments,
            &ConnectivityConfig {
                tolerance: Tolerance::new(0.01).unwrap(),
                strategy,
                intersections: IntersectionMode::None,
            },
        )
    }

    fn triangle() -> Vec<Segment> {
        vec![
            seg("A", [0.0, 0.0], [10.0, 0.0]),
            seg("B", [10.0, 0.0], [5.0, 8.0]),
            seg("C", [5.0, 8.0], [0.0, 0.0]),
        ]
    }

    fn by_handle(handle: &str) -> RootSelector {
        RootSelector::Handle(handle.into())
    }

    #[test]
    fn triangle_depth_first_keeps_one_leaf() {
        let mut g = graph(triangle(), Strategy::LineAsNode);
        let tree = build_tree(&mut g, &by_handle("A"), &TreeConfig::default()).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.leaves, 1);
        assert_eq!(stats.cycles_pruned, 1);
        assert_eq!(stats.max_depth, 2);

        let leaf = tree.leaves().next().unwrap();
        assert_eq!(leaf.handle(&g), Some("C"));
        assert_eq!(tree.root().unwrap().role, Role::Root);
    }

    #[test]
    fn triangle_breadth_first_keeps_two_leaves() {
        let mut g = graph(triangle(), Strategy::LineAsNode);
        let config = TreeConfig {
            order: TraversalOrder::BreadthFirst,
            max_depth: None,
        };
        let tree = build_tree(&mut g, &by_handle("A"), &config).unwrap();
        let stats = tree.stats();
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.leaves, 2);
        assert_eq!(stats.cycles_pruned, 1);
        assert_eq!(stats.max_depth, 1);
    }

    #[test]
    fn cyclic_grid_terminates_and_visits_each_node_once() {
        // Square with both diagonals meeting only at corners.
        let segments = vec![
            seg("s0", [0.0, 0.0], [1.0, 0.0]),
            seg("s1", [1.0, 0.0], [1.0, 1.0]),
            seg("s2", [1.0, 1.0], [0.0, 1.0]),
            seg("s3", [0.0, 1.0], [0.0, 0.0]),
            seg("d0", [0.0, 0.0], [1.0, 1.0]),
        ];
        for strategy in [Strategy::ExplicitNode, Strategy::LineAsNode] {
            for order in [TraversalOrder::DepthFirst, TraversalOrder::BreadthFirst] {
                let mut g = graph(segments.clone(), strategy);
                let config = TreeConfig {
                    order,
                    max_depth: None,
                };
                let tree = build_tree(&mut g, &by_handle("s0"), &config).unwrap();
                assert_eq!(tree.len(), g.node_count());
                assert_eq!(g.visited_count(), g.node_count());
                assert_eq!(tree.unreached(), 0);

                let mut seen: Vec<NodeId> = tree.nodes().iter().map(|n| n.node).collect();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), tree.len());
                assert!(tree.cycles_pruned() > 0);
            }
        }
    }

    #[test]
    fn explicit_node_tree_borrows_segment_handles() {
        let segments = vec![
            seg("a", [0.0, 0.0], [1.0, 0.0]),
            seg("b", [1.0, 0.0], [2.0, 0.0]),
        ];
        let mut g = graph(segments, Strategy::ExplicitNode);
        let tree = build_tree(&mut g, &by_handle("a"), &TreeConfig::default()).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root().unwrap().handle(&g), None);
        let handles: Vec<_> = tree
            .preorder()
            .iter()
            .map(|&i| tree.node(i).unwrap().handle(&g))
            .collect();
        assert_eq!(handles, vec![None, Some("a"), Some("b")]);
        assert_eq!(tree.stats().leaves, 1);
    }

    #[test]
    fn isolated_root_is_root_and_open_ended() {
        let segments = vec![
            seg("alone", [0.0, 0.0], [1.0, 0.0]),
            seg("other", [5.0, 5.0], [6.0, 5.0]),
        ];
        let mut g = graph(segments, Strategy::LineAsNode);
        let tree = build_tree(&mut g, &by_handle("alone"), &TreeConfig::default()).unwrap();
        assert_eq!(tree.len(), 1);
        let root = tree.root().unwrap();
        assert_eq!(root.role, Role::Root);
        assert!(root.open_ended);
        assert!(root.is_demand_bearing());
        assert_eq!(tree.unreached(), 1);
    }

    #[test]
    fn zero_length_stub_closes_no_cycle() {
        let segments = vec![
            seg("a", [0.0, 0.0], [1.0, 0.0]),
            seg("z", [1.0, 0.0], [1.0, 0.0]),
        ];
        let mut g = graph(segments, Strategy::ExplicitNode);
        let tree = build_tree(&mut g, &by_handle("a"), &TreeConfig::default()).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.cycles_pruned(), 0);
        let end = tree.node(TreeIndex(1)).unwrap();
        assert_eq!(end.role, Role::Leaf);
        assert!(end.open_ended);
    }

    #[test]
    fn roots_resolve_by_point_and_node() {
        let mut g = graph(triangle(), Strategy::LineAsNode);
        let near_b = RootSelector::Point(Coords::Planar([9.0, 3.0]));
        assert_eq!(resolve_root(&g, &near_b).unwrap(), NodeId(1));
        assert_eq!(resolve_root(&g, &RootSelector::Node(NodeId(2))).unwrap(), NodeId(2));

        let tree = build_tree(&mut g, &near_b, &TreeConfig::default()).unwrap();
        assert_eq!(tree.root().unwrap().handle(&g), Some("B"));
    }

    #[test]
    fn unresolvable_roots_fail_before_traversal() {
        let mut g = graph(triangle(), Strategy::LineAsNode);
        assert!(matches!(
            build_tree(&mut g, &by_handle("missing"), &TreeConfig::default()),
            Err(Error::RootUnresolved(_))
        ));
        assert_eq!(g.visited_count(), 0);
        assert!(matches!(
            resolve_root(&g, &RootSelector::Node(NodeId(7))),
            Err(Error::RootUnresolved(_))
        ));
        assert!(matches!(
            resolve_root(&g, &RootSelector::Point(Coords::Planar([f64::NAN, 0.0]))),
            Err(Error::NonFinitePickPoint)
        ));

        let empty = graph(Vec::new(), Strategy::ExplicitNode);
        assert!(matches!(
            resolve_root(&empty, &RootSelector::Point(Coords::Planar([0.0, 0.0]))),
            Err(Error::RootUnresolved(_))
        ));
    }

    #[test]
    fn depth_guard_stops_long_chains() {
        let segments: Vec<Segment> = (0..6)
            .map(|i| seg(&format!("c{i}"), [i as f64, 0.0], [i as f64 + 1.0, 0.0]))
            .collect();
        let mut g = graph(segments, Strategy::LineAsNode);
        let config = TreeConfig {
            order: TraversalOrder::DepthFirst,
            max_depth: Some(3),
        };
        assert!(matches!(
            build_tree(&mut g, &by_handle("c0"), &config),
            Err(Error::DepthLimitExceeded(3))
        ));

        let relaxed = TreeConfig {
            max_depth: Some(5),
            ..config
        };
        let tree = build_tree(&mut g, &by_handle("c0"), &relaxed).unwrap();
        assert_eq!(tree.stats().max_depth, 5);
    }

    #[test]
    fn rebuilding_resets_visited_flags() {
        let mut g = graph(triangle(), Strategy::LineAsNode);
        let first = build_tree(&mut g, &by_handle("A"), &TreeConfig::default()).unwrap();
        let second = build_tree(&mut g, &by_handle("C"), &TreeConfig::default()).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
        assert_eq!(second.root().unwrap().handle(&g), Some("C"));
    }

    #[test]
    fn tee_branch_counts_open_ended_mid() {
        let segments = vec![
            seg("riser", [0.0, 0.0], [0.0, 5.0]),
            seg("main", [0.0, 5.0], [10.0, 5.0]),
            seg("branch", [5.0, 5.0], [5.0, 9.0]),
            seg("tail", [10.0, 5.0], [10.0, 0.0]),
            seg("spur", [10.0, 5.0], [14.0, 5.0]),
            seg("stub", [-3.0, 0.0], [0.0, 0.0]),
        ];
        let mut g = graph(segments, Strategy::LineAsNode);
        let tree = build_tree(&mut g, &by_handle("stub"), &TreeConfig::default()).unwrap();
        let stats = tree.stats();
        // stub → riser → main → tail → spur; the spur closes the loop at
        // (10, 5) and `branch` starts mid-span, so it touches nothing.
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.unreached, 1);
        assert_eq!(stats.mids, 3);
        assert_eq!(stats.leaves, 1);
        assert_eq!(stats.cycles_pruned, 1);
        // `tail` has children yet its far end is free.
        assert_eq!(stats.open_ended_mid, 1);
    }

    #[test]
    fn sorting_requires_aggregation() {
        let mut g = graph(triangle(), Strategy::LineAsNode);
        let mut tree = build_tree(&mut g, &by_handle("A"), &TreeConfig::default()).unwrap();
        assert!(matches!(
            tree.sort_children_by_load(),
            Err(Error::LoadsNotAggregated)
        ));
    }

    #[test]
    fn selectors_use_tagged_json() {
        let handle: RootSelector = serde_json::from_str(r#"{"handle":"1A"}"#).unwrap();
        assert_eq!(handle, by_handle("1A"));
        let point: RootSelector = serde_json::from_str(r#"{"point":[1.0,2.0]}"#).unwrap();
        assert_eq!(point, RootSelector::Point(Coords::Planar([1.0, 2.0])));
        let node: RootSelector = serde_json::from_str(r#"{"node":4}"#).unwrap();
        assert_eq!(node, RootSelector::Node(NodeId(4)));
    }
}
