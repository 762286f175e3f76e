// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hash for tolerance-based junction lookup.
//!
//! Points are bucketed by [`Tolerance::bin_key`], so two coincident points
//! are at most one bin apart along each axis. A lookup therefore only
//! compares against the 27 bins around the query point instead of every
//! junction found so far.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::keys::NodeId;
use crate::tolerance::{BinKey, Tolerance};

/// A grid of epsilon-sized bins holding junction positions.
#[derive(Debug)]
pub struct SpatialIndex {
    tolerance: Tolerance,
    grid: FxHashMap<BinKey, Vec<(NodeId, Point3<f64>)>>,
}

impl SpatialIndex {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            grid: FxHashMap::default(),
        }
    }

    /// Records a junction at the given position.
    pub fn insert(&mut self, id: NodeId, position: Point3<f64>) {
        let key = self.tolerance.bin_key(&position);
        self.grid.entry(key).or_default().push((id, position));
    }

    /// Finds the junction coincident with `p`.
    ///
    /// When several junctions qualify, the one created first wins, so the
    /// result does not depend on hash iteration order.
    pub fn find_near(&self, p: &Point3<f64>) -> Option<NodeId> {
        let (cx, cy, cz) = self.tolerance.bin_key(p);
        let mut best: Option<NodeId> = None;

        // Search 3x3x3 neighborhood
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(bucket) = self.grid.get(&key) else {
                        continue;
                    };
                    for (id, position) in bucket {
                        if self.tolerance.coincident(position, p)
                            && best.map_or(true, |b| *id < b)
                        {
                            best = Some(*id);
                        }
                    }
                }
            }
        }

        best
    }

    pub fn len(&self) -> usize {
        self.grid.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_point_within_tolerance() {
        let mut index = SpatialIndex::new(Tolerance::new(0.01).unwrap());
        index.insert(NodeId(0), Point3::new(0.0, 0.0, 0.0));
        index.insert(NodeId(1), Point3::new(10.0, 10.0, 10.0));

        assert_eq!(index.find_near(&Point3::new(0.0, 0.0, 0.0)), Some(NodeId(0)));
        assert_eq!(index.find_near(&Point3::new(0.005, 0.0, 0.0)), Some(NodeId(0)));
        assert_eq!(index.find_near(&Point3::new(1.0, 0.0, 0.0)), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn matches_across_bin_boundaries() {
        let mut index = SpatialIndex::new(Tolerance::new(0.01).unwrap());
        // Just below a bin edge; the query sits just above it.
        index.insert(NodeId(4), Point3::new(0.0099, 0.0, 0.0));
        assert_eq!(index.find_near(&Point3::new(0.0101, 0.0, 0.0)), Some(NodeId(4)));
        assert_eq!(index.find_near(&Point3::new(-0.00005, 0.0, 0.0)), Some(NodeId(4)));
    }

    #[test]
    fn earliest_junction_wins() {
        let mut index = SpatialIndex::new(Tolerance::new(1.0).unwrap());
        index.insert(NodeId(3), Point3::new(0.6, 0.0, 0.0));
        index.insert(NodeId(1), Point3::new(-0.6, 0.0, 0.0));
        assert_eq!(index.find_near(&Point3::origin()), Some(NodeId(1)));
    }

    #[test]
    fn far_coordinates_clamp_to_edge_bins() {
        let mut index = SpatialIndex::new(Tolerance::default());
        index.insert(NodeId(0), Point3::new(1e13, 5.0, 0.0));
        index.insert(NodeId(1), Point3::new(-1e13, 9.0, 0.0));

        assert_eq!(index.find_near(&Point3::new(1e13, 5.0, 0.0)), Some(NodeId(0)));
        assert_eq!(index.find_near(&Point3::new(-1e13, 9.0, 0.0)), Some(NodeId(1)));
        assert_eq!(index.find_near(&Point3::new(1e13, 9.0, 0.0)), None);
    }

    #[test]
    fn empty_index() {
        let index = SpatialIndex::new(Tolerance::default());
        assert!(index.is_empty());
        assert_eq!(index.find_near(&Point3::origin()), None);
    }
}
