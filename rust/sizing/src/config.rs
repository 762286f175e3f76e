// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Injectable sizing configuration.

use serde::{Deserialize, Serialize};

use crate::connection::ConnectionTables;
use crate::error::{Error, Result};
use crate::flow::FlowTable;
use crate::simultaneity::StepCurve;
use crate::table::{LookupTable, Overflow};

/// Tables and curves driving the sizing engine.
///
/// Every field defaults to the standard tables, so a JSON document only
/// needs to name what it overrides. All tables are validated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Effective load → diameter (mm), evaluated with a ceiling lookup.
    pub capacity_table: LookupTable<u32>,
    pub flush_valve_curve: StepCurve,
    pub general_curve: StepCurve,
    /// Interpolate flow-table lookups instead of using whole bands.
    pub interpolation_enabled: bool,
    pub flow_table: FlowTable,
    pub connection: ConnectionTables,
}

impl SizingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Standard effective-load capacity table.
    pub fn standard_capacity_table() -> LookupTable<u32> {
        LookupTable::from_sorted(
            vec![
                (1.0, 15),
                (2.6, 20),
                (4.9, 25),
                (9.2, 32),
                (14.5, 40),
                (30.0, 50),
                (53.0, 65),
                (84.6, 80),
                (178.0, 100),
                (280.0, 125),
                (452.0, 150),
            ],
            Overflow::Reject,
        )
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            capacity_table: Self::standard_capacity_table(),
            flush_valve_curve: StepCurve::flush_valve(),
            general_curve: StepCurve::general(),
            interpolation_enabled: false,
            flow_table: FlowTable::default(),
            connection: ConnectionTables::default(),
        }
    }
}
