// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PipeNet Topology
//!
//! Connectivity inference and load propagation for plumbing networks drawn
//! as loose line segments.
//!
//! The pipeline runs in four steps:
//!
//! 1. [`build_graph`] infers connectivity purely from endpoint coincidence
//!    under a [`Tolerance`], using either the explicit-node or the
//!    line-as-node [`Strategy`].
//! 2. [`build_tree`] roots the graph at a picked point, handle or node and
//!    extracts an acyclic [`PipeTree`], pruning edges that close cycles and
//!    classifying every node as [`Role::Root`], [`Role::Mid`] or
//!    [`Role::Leaf`].
//! 3. [`aggregate_loads`] assigns per-handle demand to childless nodes and
//!    sums it up towards the root.
//! 4. [`PipeTree::sort_children_by_load`], [`render_tree`] and
//!    [`PipeTree::snapshot`] present the result.
//!
//! ```
//! use std::collections::HashMap;
//! use pipenet_topology::{
//!     aggregate_loads, build_graph, build_tree, ConnectivityConfig, RootSelector, Segment,
//!     TreeConfig,
//! };
//!
//! let segments = vec![
//!     Segment::planar("riser", [0.0, 0.0], [0.0, 3.0]).unwrap(),
//!     Segment::planar("wc", [0.0, 3.0], [2.0, 3.0]).unwrap(),
//!     Segment::planar("lav", [0.0, 3.0], [-2.0, 3.0]).unwrap(),
//! ];
//! let mut graph = build_graph(segments, &ConnectivityConfig::default());
//! let mut tree = build_tree(
//!     &mut graph,
//!     &RootSelector::Handle("riser".into()),
//!     &TreeConfig::default(),
//! )
//! .unwrap();
//!
//! let demands: HashMap<String, f64> =
//!     [("wc".to_string(), 4.9), ("lav".to_string(), 1.0)].into_iter().collect();
//! let total = aggregate_loads(&mut tree, &graph, &demands).unwrap();
//! assert_eq!(tree.len(), 3);
//! assert!(total > 0.0);
//! ```

pub mod aggregate;
pub mod connectivity;
pub mod error;
pub mod graph;
pub mod keys;
pub mod render;
pub mod segment;
pub mod serialization;
pub mod spatial;
pub mod tolerance;
pub mod tree;

pub use aggregate::{aggregate_loads, DemandSource};
pub use connectivity::{build_graph, intersect, ConnectivityConfig, IntersectionMode, Strategy};
pub use error::{Error, Result};
pub use graph::{EdgeKind, GraphEdge, GraphNode, NodeAnchor, PipeGraph};
pub use keys::{EdgeId, NodeId, TreeIndex};
pub use render::render_tree;
pub use segment::{Coords, Segment, SegmentInput};
pub use serialization::{NodeSnapshot, TreeSnapshot};
pub use spatial::SpatialIndex;
pub use tolerance::{EndConnectivity, Tolerance, DEFAULT_EPSILON};
pub use tree::{
    build_tree, resolve_root, PipeTree, Role, RootSelector, TraversalOrder, TreeConfig, TreeNode,
    TreeStats,
};
