// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flow-rate based diameter selection.
//!
//! Each row of a [`FlowTable`] says that flows from `flow_min` up to
//! `max_flow` (litres per minute) are carried by a pipe of `diameter` mm.
//! Lookups go both ways: flow → diameter and diameter → maximum flow.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::{LookupTable, Overflow};

/// One diameter band of a flow table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowRow {
    pub flow_min: f64,
    pub diameter: u32,
    pub max_flow: f64,
}

/// Validated flow bands, ordered by increasing flow and diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FlowRow>", into = "Vec<FlowRow>")]
pub struct FlowTable {
    rows: Vec<FlowRow>,
    by_flow: LookupTable<u32>,
    by_diameter: LookupTable<f64>,
}

impl FlowTable {
    pub fn new(rows: Vec<FlowRow>) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if !(row.flow_min.is_finite() && row.max_flow.is_finite()) {
                return Err(Error::InvalidFlowRow {
                    index,
                    reason: "flows must be finite",
                });
            }
            if row.max_flow < row.flow_min {
                return Err(Error::InvalidFlowRow {
                    index,
                    reason: "max flow lies below the band's minimum flow",
                });
            }
            if index > 0 && rows[index - 1].diameter >= row.diameter {
                return Err(Error::InvalidFlowRow {
                    index,
                    reason: "diameters must increase with flow",
                });
            }
        }

        let by_flow = LookupTable::new(rows.iter().map(|r| (r.flow_min, r.diameter)).collect())?;
        let last_max = rows.last().map_or(f64::NAN, |r| r.max_flow);
        let by_flow = by_flow.with_overflow(Overflow::UpTo(last_max))?;
        let by_diameter =
            LookupTable::new(rows.iter().map(|r| (f64::from(r.diameter), r.max_flow)).collect())?;

        Ok(Self {
            rows,
            by_flow,
            by_diameter,
        })
    }

    pub fn rows(&self) -> &[FlowRow] {
        &self.rows
    }

    /// Diameter for a flow.
    ///
    /// Without interpolation the band containing the flow is used. With
    /// interpolation the diameter is linear between band starts and rounded
    /// half-to-even; the last band keeps its own diameter. Negative flows and
    /// flows above the last band's maximum are out of range.
    pub fn diameter_for_flow(&self, flow: f64, interpolate: bool) -> Option<u32> {
        if flow.is_nan() || flow < 0.0 {
            return None;
        }
        if !interpolate {
            return self.by_flow.lookup_floor(flow);
        }
        // Interpolation shares the floor lookup's range check.
        self.by_flow.lookup_floor(flow)?;
        self.by_flow
            .lookup_interpolated(flow)
            .map(|d| d.round_ties_even() as u32)
    }

    /// Maximum flow a diameter can carry.
    ///
    /// Exact diameters return their band's maximum. With interpolation, a
    /// diameter between two bands gets a linear estimate rounded to 0.1.
    pub fn max_flow_for_diameter(&self, diameter: u32, interpolate: bool) -> Option<f64> {
        let d = f64::from(diameter);
        if let Some(flow) = self.by_diameter.lookup_exact(d) {
            return Some(flow);
        }
        if !interpolate || d < self.by_diameter.first_key() || d > self.by_diameter.last_key() {
            return None;
        }
        self.by_diameter
            .lookup_interpolated(d)
            .map(|f| (f * 10.0).round_ties_even() / 10.0)
    }
}

impl Default for FlowTable {
    fn default() -> Self {
        let rows = [
            (0.0, 15, 8.3),
            (8.4, 20, 17.1),
            (17.2, 25, 31.7),
            (31.8, 32, 59.0),
            (59.1, 40, 86.0),
            (86.1, 50, 158.0),
            (158.1, 65, 290.0),
            (290.1, 80, 440.0),
            (440.1, 100, 860.0),
            (860.1, 125, 1440.0),
            (1440.1, 150, 2220.0),
            (2220.1, 200, 4420.0),
            (4420.1, 250, 7600.0),
            (7600.1, 300, 12000.0),
            (12000.1, 350, 15600.0),
        ];
        let rows: Vec<FlowRow> = rows
            .into_iter()
            .map(|(flow_min, diameter, max_flow)| FlowRow {
                flow_min,
                diameter,
                max_flow,
            })
            .collect();
        Self {
            by_flow: LookupTable::from_sorted(
                rows.iter().map(|r| (r.flow_min, r.diameter)).collect(),
                Overflow::UpTo(15600.0),
            ),
            by_diameter: LookupTable::from_sorted(
                rows.iter().map(|r| (f64::from(r.diameter), r.max_flow)).collect(),
                Overflow::Reject,
            ),
            rows,
        }
    }
}

impl TryFrom<Vec<FlowRow>> for FlowTable {
    type Error = Error;

    fn try_from(rows: Vec<FlowRow>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<FlowTable> for Vec<FlowRow> {
    fn from(table: FlowTable) -> Self {
        table.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_lookup_without_interpolation() {
        let t = FlowTable::default();
        assert_eq!(t.diameter_for_flow(0.0, false), Some(15));
        assert_eq!(t.diameter_for_flow(50.0, false), Some(32));
        assert_eq!(t.diameter_for_flow(100.0, false), Some(50));
        assert_eq!(t.diameter_for_flow(15600.0, false), Some(350));
        assert_eq!(t.diameter_for_flow(20000.0, false), None);
        assert_eq!(t.diameter_for_flow(-1.0, false), None);
    }

    #[test]
    fn interpolated_flow_rounds_to_whole_millimetres() {
        let t = FlowTable::default();
        // 50 + (120 - 86.1) / 72 * 15 = 57.0625
        assert_eq!(t.diameter_for_flow(120.0, true), Some(57));
        assert_eq!(t.diameter_for_flow(86.1, true), Some(50));
        assert_eq!(t.diameter_for_flow(13000.0, true), Some(350));
        assert_eq!(t.diameter_for_flow(20000.0, true), None);
    }

    #[test]
    fn max_flow_by_diameter() {
        let t = FlowTable::default();
        assert_eq!(t.max_flow_for_diameter(50, false), Some(158.0));
        assert_eq!(t.max_flow_for_diameter(57, false), None);
        // 158 + 7/15 * 132 = 219.6
        assert_eq!(t.max_flow_for_diameter(57, true), Some(219.6));
        assert_eq!(t.max_flow_for_diameter(10, true), None);
        assert_eq!(t.max_flow_for_diameter(400, true), None);
    }

    #[test]
    fn default_matches_validated_construction() {
        let rebuilt = FlowTable::new(FlowTable::default().rows().to_vec()).unwrap();
        assert_eq!(rebuilt, FlowTable::default());
    }

    #[test]
    fn rejects_inconsistent_rows() {
        let rows = vec![
            FlowRow {
                flow_min: 0.0,
                diameter: 20,
                max_flow: 10.0,
            },
            FlowRow {
                flow_min: 10.1,
                diameter: 15,
                max_flow: 20.0,
            },
        ];
        assert!(matches!(
            FlowTable::new(rows),
            Err(Error::InvalidFlowRow { index: 1, .. })
        ));
        assert!(FlowTable::new(Vec::new()).is_err());
    }

    #[test]
    fn serializes_as_row_list() {
        let json = r#"[{"flow_min": 0, "diameter": 15, "max_flow": 8.3},
                       {"flow_min": 8.4, "diameter": 20, "max_flow": 17.1}]"#;
        let t: FlowTable = serde_json::from_str(json).unwrap();
        assert_eq!(t.diameter_for_flow(17.1, false), Some(20));
        assert_eq!(t.diameter_for_flow(17.2, false), None);
    }
}
