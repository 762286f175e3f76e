// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipe run segments and their host-facing input form.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Endpoint coordinates as supplied by a host: `[x, y]` or `[x, y, z]`.
///
/// Planar coordinates are lifted to `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coords {
    Spatial([f64; 3]),
    Planar([f64; 2]),
}

impl Coords {
    pub fn to_point(self) -> Point3<f64> {
        match self {
            Coords::Spatial([x, y, z]) => Point3::new(x, y, z),
            Coords::Planar([x, y]) => Point3::new(x, y, 0.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Coords::Spatial(c) => c.iter().all(|v| v.is_finite()),
            Coords::Planar(c) => c.iter().all(|v| v.is_finite()),
        }
    }
}

impl From<[f64; 2]> for Coords {
    fn from(c: [f64; 2]) -> Self {
        Coords::Planar(c)
    }
}

impl From<[f64; 3]> for Coords {
    fn from(c: [f64; 3]) -> Self {
        Coords::Spatial(c)
    }
}

/// A segment as it arrives from the host selection, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentInput {
    pub handle: String,
    pub start: Coords,
    pub end: Coords,
}

impl SegmentInput {
    pub fn into_segment(self) -> Result<Segment> {
        Segment::new(self.handle, self.start.to_point(), self.end.to_point())
    }
}

/// An immutable straight pipe run between two endpoints.
///
/// The `handle` is opaque to the core and only used to correlate results
/// back to the host's drawing entity. Zero-length segments are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    handle: String,
    start: Point3<f64>,
    end: Point3<f64>,
}

impl Segment {
    /// Creates a segment, rejecting non-finite coordinates.
    pub fn new(handle: impl Into<String>, start: Point3<f64>, end: Point3<f64>) -> Result<Self> {
        let handle = handle.into();
        let finite = start.iter().chain(end.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(Error::NonFiniteCoordinate { handle });
        }
        Ok(Self { handle, start, end })
    }

    /// Creates a segment in the `z = 0` plane.
    pub fn planar(handle: impl Into<String>, start: [f64; 2], end: [f64; 2]) -> Result<Self> {
        Self::new(
            handle,
            Point3::new(start[0], start[1], 0.0),
            Point3::new(end[0], end[1], 0.0),
        )
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn start(&self) -> &Point3<f64> {
        &self.start
    }

    pub fn end(&self) -> &Point3<f64> {
        &self.end
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns the point on the segment (not its extension) closest to `p`.
    pub fn closest_point(&self, p: &Point3<f64>) -> Point3<f64> {
        let dir = self.end - self.start;
        let len_sq = dir.norm_squared();
        if len_sq == 0.0 {
            return self.start;
        }
        let t = ((p - self.start).dot(&dir) / len_sq).clamp(0.0, 1.0);
        self.start + dir * t
    }

    pub fn distance_to_point(&self, p: &Point3<f64>) -> f64 {
        (self.closest_point(p) - p).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_non_finite_coordinates() {
        let err = Segment::planar("A1", [0.0, f64::NAN], [1.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinate { handle } if handle == "A1"));

        assert!(Segment::new(
            "A2",
            Point3::new(0.0, 0.0, f64::INFINITY),
            Point3::origin()
        )
        .is_err());
    }

    #[test]
    fn zero_length_segment_is_valid() {
        let seg = Segment::planar("Z", [3.0, 3.0], [3.0, 3.0]).unwrap();
        assert_eq!(seg.length(), 0.0);
        assert_eq!(seg.closest_point(&Point3::new(10.0, 0.0, 0.0)), *seg.start());
    }

    #[test]
    fn closest_point_is_clamped_to_segment() {
        let seg = Segment::planar("S", [0.0, 0.0], [10.0, 0.0]).unwrap();

        let inside = seg.closest_point(&Point3::new(4.0, 3.0, 0.0));
        assert_relative_eq!(inside.x, 4.0);
        assert_relative_eq!(inside.y, 0.0);

        let beyond = seg.closest_point(&Point3::new(15.0, 1.0, 0.0));
        assert_relative_eq!(beyond.x, 10.0);
        assert_relative_eq!(seg.distance_to_point(&Point3::new(15.0, 0.0, 0.0)), 5.0);
    }

    #[test]
    fn planar_and_spatial_inputs_deserialize() {
        let json = r#"{"handle":"1F3","start":[0.0,1.0],"end":[2.0,3.0,4.0]}"#;
        let input: SegmentInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.start, Coords::Planar([0.0, 1.0]));
        assert_eq!(input.end, Coords::Spatial([2.0, 3.0, 4.0]));

        let seg = input.into_segment().unwrap();
        assert_eq!(seg.handle(), "1F3");
        assert_eq!(seg.start().z, 0.0);
        assert_eq!(seg.end().z, 4.0);
    }
}
