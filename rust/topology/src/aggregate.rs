// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Post-order load aggregation.
//!
//! Childless tree nodes carry demand looked up by their external handle;
//! every other node's load is the sum of its children. The root's load is
//! therefore the sum of all terminal demands.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{Error, Result};
use crate::graph::PipeGraph;
use crate::tree::PipeTree;

/// Supplies per-handle demand values.
pub trait DemandSource {
    /// Demand for a handle, or `None` when nothing was supplied.
    fn demand(&self, handle: &str) -> Option<f64>;
}

impl<S: BuildHasher> DemandSource for HashMap<String, f64, S> {
    fn demand(&self, handle: &str) -> Option<f64> {
        self.get(handle).copied()
    }
}

impl DemandSource for BTreeMap<String, f64> {
    fn demand(&self, handle: &str) -> Option<f64> {
        self.get(handle).copied()
    }
}

/// Aggregates demand bottom-up and returns the root's total load.
///
/// Missing demand counts as zero; non-finite demand is rejected before any
/// node is updated.
pub fn aggregate_loads<D>(tree: &mut PipeTree, graph: &PipeGraph, demands: &D) -> Result<f64>
where
    D: DemandSource + ?Sized,
{
    let mut own = Vec::with_capacity(tree.len());
    for node in tree.nodes() {
        if !node.is_demand_bearing() {
            own.push(0.0);
            continue;
        }
        let Some(handle) = node.handle(graph) else {
            own.push(0.0);
            continue;
        };
        let value = demands.demand(handle).unwrap_or(0.0);
        if !value.is_finite() {
            return Err(Error::NonFiniteDemand {
                handle: handle.to_string(),
                value,
            });
        }
        own.push(value);
    }

    let nodes = tree.nodes_mut();
    // Children always sit after their parent in the arena.
    for i in (0..nodes.len()).rev() {
        let (load, leaves) = if nodes[i].is_demand_bearing() {
            (own[i], 1)
        } else {
            nodes[i].children.iter().fold((0.0, 0), |(load, leaves), c| {
                (load + nodes[c.0].aggregated_load, leaves + nodes[c.0].leaf_count)
            })
        };
        let node = &mut nodes[i];
        node.demand = own[i];
        node.aggregated_load = load;
        node.leaf_count = leaves;
    }
    tree.aggregated = true;

    let total = tree.total_load();
    tracing::debug!(
        nodes = tree.len(),
        leaves = tree.root().map_or(0, |r| r.leaf_count),
        total_load = total,
        "Loads aggregated"
    );
    Ok(total)
}
