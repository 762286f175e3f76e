// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connectivity resolution: turning loose segments into a [`PipeGraph`].
//!
//! Two strategies are supported and kept behaviorally distinct:
//!
//! - [`Strategy::ExplicitNode`] clusters endpoints (and optionally pairwise
//!   intersection points) into junctions, then adds one edge per segment
//!   between its start and end junctions. Edge `i` always stands for
//!   segment `i`.
//! - [`Strategy::LineAsNode`] makes every segment a node and links two
//!   segment-nodes when any pair of their endpoints coincide. Each node also
//!   records which of its own ends touched something.
//!
//! Both are quadratic in the number of segments.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::graph::{EdgeKind, NodeAnchor, PipeGraph};
use crate::keys::NodeId;
use crate::segment::Segment;
use crate::spatial::SpatialIndex;
use crate::tolerance::{EndConnectivity, Tolerance};

/// How graph nodes are derived from segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Junction points are nodes, segments are edges.
    ExplicitNode,
    /// Segments are nodes, endpoint contacts are edges.
    #[default]
    LineAsNode,
}

/// Which pairwise intersection points become junctions (explicit-node only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntersectionMode {
    /// No intersection pass; only endpoints become junctions.
    None,
    /// Intersections that lie on both segments, up to the tolerance.
    #[default]
    Bounded,
    /// Intersections of the infinite lines through both segments.
    Extended,
}

/// Connectivity resolution settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub tolerance: Tolerance,
    pub strategy: Strategy,
    pub intersections: IntersectionMode,
}

/// Builds the connectivity graph for a segment selection.
///
/// An empty selection yields an empty graph.
pub fn build_graph(segments: Vec<Segment>, config: &ConnectivityConfig) -> PipeGraph {
    let graph = match config.strategy {
        Strategy::ExplicitNode => {
            build_explicit_node(segments, config.tolerance, config.intersections)
        }
        Strategy::LineAsNode => build_line_as_node(segments, config.tolerance),
    };

    tracing::debug!(
        strategy = ?config.strategy,
        epsilon = config.tolerance.epsilon(),
        segments = graph.segments().len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Connectivity graph built"
    );

    graph
}

fn build_explicit_node(
    segments: Vec<Segment>,
    tolerance: Tolerance,
    mode: IntersectionMode,
) -> PipeGraph {
    let mut points = Vec::new();
    if mode != IntersectionMode::None {
        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                if let Some(p) = intersect(&segments[i], &segments[j], tolerance, mode) {
                    points.push(p);
                }
            }
        }
    }
    let intersections = points.len();
    let ends: Vec<(Point3<f64>, Point3<f64>)> =
        segments.iter().map(|s| (*s.start(), *s.end())).collect();

    let mut graph = PipeGraph::with_segments(Strategy::ExplicitNode, tolerance, segments);
    let mut index = SpatialIndex::new(tolerance);

    for p in points {
        junction_at(&mut graph, &mut index, p);
    }

    let mut endpoints = Vec::with_capacity(ends.len());
    for (start, end) in ends {
        let a = junction_at(&mut graph, &mut index, start);
        let b = junction_at(&mut graph, &mut index, end);
        endpoints.push((a, b));
    }

    for (i, (a, b)) in endpoints.into_iter().enumerate() {
        graph.push_edge(a, b, EdgeKind::Segment(i));
    }

    tracing::trace!(intersections, junctions = index.len(), "Junctions clustered");
    graph
}

/// Returns the existing junction coincident with `p`, or creates one.
fn junction_at(graph: &mut PipeGraph, index: &mut SpatialIndex, p: Point3<f64>) -> NodeId {
    if let Some(id) = index.find_near(&p) {
        return id;
    }
    let id = graph.push_node(NodeAnchor::Junction { position: p });
    index.insert(id, p);
    id
}

fn build_line_as_node(segments: Vec<Segment>, tolerance: Tolerance) -> PipeGraph {
    let mut contacts = Vec::new();
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a, b) = (&segments[i], &segments[j]);
            if tolerance.segments_connected(a, b) {
                contacts.push((
                    i,
                    j,
                    tolerance.end_contacts(a, b),
                    tolerance.end_contacts(b, a),
                ));
            }
        }
    }

    let count = segments.len();
    let mut graph = PipeGraph::with_segments(Strategy::LineAsNode, tolerance, segments);
    for segment in 0..count {
        graph.push_node(NodeAnchor::Segment {
            segment,
            ends: EndConnectivity::default(),
        });
    }

    for (i, j, ci, cj) in contacts {
        let (a, b) = (NodeId(i), NodeId(j));
        graph.push_edge(a, b, EdgeKind::Contact);
        graph.record_contact(a, ci);
        graph.record_contact(b, cj);
    }

    graph
}

/// Intersection point of two segments under the given mode.
///
/// Computes the closest points between the two carrier lines and accepts them
/// when they coincide under the tolerance. Parallel, collinear and degenerate
/// (zero-length) pairs have no intersection.
pub fn intersect(
    a: &Segment,
    b: &Segment,
    tolerance: Tolerance,
    mode: IntersectionMode,
) -> Option<Point3<f64>> {
    if mode == IntersectionMode::None {
        return None;
    }

    let d1 = a.end() - a.start();
    let d2 = b.end() - b.start();
    let r = a.start() - b.start();
    let aa = d1.dot(&d1);
    let ee = d2.dot(&d2);
    if aa <= f64::EPSILON || ee <= f64::EPSILON {
        return None;
    }

    let bb = d1.dot(&d2);
    let c = d1.dot(&r);
    let f = d2.dot(&r);
    let denom = aa * ee - bb * bb;
    if denom <= 1e-12 * aa * ee {
        return None;
    }

    let s = (bb * f - c * ee) / denom;
    let t = (bb * s + f) / ee;

    if mode == IntersectionMode::Bounded {
        let slack_a = tolerance.epsilon() / aa.sqrt();
        let slack_b = tolerance.epsilon() / ee.sqrt();
        let within = |u: f64, slack: f64| u >= -slack && u <= 1.0 + slack;
        if !within(s, slack_a) || !within(t, slack_b) {
            return None;
        }
    }

    let p = a.start() + d1 * s;
    let q = b.start() + d2 * t;
    tolerance.coincident(&p, &q).then_some(p)
}
