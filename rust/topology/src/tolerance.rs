// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coincidence tests under a fixed tolerance.
//!
//! Two points are the same pipe junction when their distance is strictly
//! below epsilon. The tolerance is unit-scale dependent (drawing units), so
//! it is carried as a value rather than a global constant. Points closer than
//! epsilon but distinct at a stricter tolerance are merged deterministically;
//! there is no retry at a finer scale.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::segment::Segment;

/// Default coincidence tolerance in drawing units.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Hash key of an epsilon-sized spatial bin.
pub type BinKey = (i64, i64, i64);

/// Coincidence tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance {
    epsilon: f64,
}

impl Tolerance {
    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Error::InvalidTolerance(epsilon));
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// True iff the Euclidean distance between `a` and `b` is below epsilon.
    pub fn coincident(&self, a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < self.epsilon
    }

    /// True iff any endpoint of `a` coincides with any endpoint of `b`.
    ///
    /// Callers must not pass the same segment twice; self-coincidence is
    /// meaningless for connectivity.
    pub fn segments_connected(&self, a: &Segment, b: &Segment) -> bool {
        self.end_contacts(a, b).any()
    }

    /// Reports which of `segment`'s own endpoints touch an endpoint of `other`.
    pub fn end_contacts(&self, segment: &Segment, other: &Segment) -> EndConnectivity {
        let touches = |p: &Point3<f64>| {
            self.coincident(p, other.start()) || self.coincident(p, other.end())
        };
        EndConnectivity {
            start_connected: touches(segment.start()),
            end_connected: touches(segment.end()),
        }
    }

    /// Truncates a point to its epsilon-sized bin.
    pub fn bin_key(&self, p: &Point3<f64>) -> BinKey {
        (
            (p.x / self.epsilon).floor() as i64,
            (p.y / self.epsilon).floor() as i64,
            (p.z / self.epsilon).floor() as i64,
        )
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = Error;

    fn try_from(epsilon: f64) -> Result<Self> {
        Self::new(epsilon)
    }
}

impl From<Tolerance> for f64 {
    fn from(t: Tolerance) -> Self {
        t.epsilon
    }
}

/// Which ends of a segment touch another selected segment.
///
/// Tracked per end rather than derived from the neighbour count: a segment in
/// the middle of a T-junction can have many neighbours and still one free end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndConnectivity {
    pub start_connected: bool,
    pub end_connected: bool,
}

impl EndConnectivity {
    pub fn any(&self) -> bool {
        self.start_connected || self.end_connected
    }

    /// Accumulates contacts found against another segment.
    pub fn merge(&mut self, other: EndConnectivity) {
        self.start_connected |= other.start_connected;
        self.end_connected |= other.end_connected;
    }

    /// True when the segment touches nothing at either end.
    pub fn is_isolated(&self) -> bool {
        !self.any()
    }

    /// Physical-leaf test: at least one end is free.
    ///
    /// For a segment with neighbours this is exactly `start XOR end`. An
    /// isolated segment has two free ends and also qualifies.
    pub fn is_open_ended(&self) -> bool {
        !(self.start_connected && self.end_connected)
    }
}
