// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diameter selection from fixture loads.

use serde::{Deserialize, Serialize};

use crate::config::SizingConfig;
use crate::error::{Error, Result};
use crate::fixtures::{FixtureGroup, FixtureKind, FixtureLoad};

/// Every intermediate of a sizing calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub gen_load_sum: f64,
    pub gen_rate: f64,
    pub gen_effective: f64,
    pub fv_load_sum: f64,
    pub fv_qty_sum: u32,
    pub fv_rate: f64,
    pub fv_effective: f64,
    pub total_effective: f64,
    /// Largest fixture connection size in the group, if any was given.
    pub min_connection: Option<u32>,
    /// Recommended main diameter (mm); `None` when there is no load.
    pub main_size: Option<u32>,
}

/// Sizing engine over an injected [`SizingConfig`].
#[derive(Debug, Clone, Default)]
pub struct SizingEngine {
    config: SizingConfig,
}

impl SizingEngine {
    pub fn new(config: SizingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Diameter for an effective load, never smaller than `min_connection`.
    ///
    /// Loads beyond the capacity table get its largest diameter.
    pub fn determine_size(&self, effective: f64, min_connection: Option<u32>) -> Option<u32> {
        if effective.is_nan() || effective <= 0.0 {
            return None;
        }
        let size = self.config.capacity_table.lookup_ceiling(effective)?;
        Some(min_connection.map_or(size, |min| size.max(min)))
    }

    /// Sizes a branch carrying an already aggregated general load.
    pub fn size_for_load(&self, load: f64, min_connection: Option<u32>) -> Option<u32> {
        let effective = load * self.config.general_curve.rate(load);
        self.determine_size(effective, min_connection)
    }

    /// Splits fixtures into flush-valve and general groups, applies each
    /// group's simultaneity rate and sizes the main for the summed effective
    /// load.
    pub fn calculate(&self, fixtures: &[FixtureLoad]) -> Result<SizingResult> {
        let mut result = SizingResult::default();

        for fixture in fixtures {
            if !fixture.unit_load.is_finite() || fixture.unit_load < 0.0 {
                return Err(Error::InvalidLoad(fixture.unit_load));
            }
            if fixture.quantity == 0 {
                continue;
            }
            match fixture.group {
                FixtureGroup::FlushValve => {
                    result.fv_load_sum += fixture.total_load();
                    result.fv_qty_sum = result.fv_qty_sum.saturating_add(fixture.quantity);
                }
                FixtureGroup::General => result.gen_load_sum += fixture.total_load(),
            }
            if let Some(size) = fixture.connection_size {
                result.min_connection = Some(result.min_connection.map_or(size, |m| m.max(size)));
            }
        }

        result.fv_rate = self
            .config
            .flush_valve_curve
            .rate(f64::from(result.fv_qty_sum));
        result.gen_rate = self.config.general_curve.rate(result.gen_load_sum);
        result.fv_effective = result.fv_load_sum * result.fv_rate;
        result.gen_effective = result.gen_load_sum * result.gen_rate;
        result.total_effective = result.fv_effective + result.gen_effective;
        result.main_size = self.determine_size(result.total_effective, result.min_connection);

        tracing::debug!(
            fv_qty = result.fv_qty_sum,
            fv_effective = result.fv_effective,
            gen_effective = result.gen_effective,
            total_effective = result.total_effective,
            main_size = ?result.main_size,
            "Sizing calculated"
        );

        Ok(result)
    }

    /// Sizes a main for counts of catalogue fixtures.
    pub fn size_for_counts(&self, counts: &[(FixtureKind, u32)]) -> Result<SizingResult> {
        let fixtures: Vec<FixtureLoad> = counts
            .iter()
            .map(|&(kind, qty)| FixtureLoad::of(kind, qty))
            .collect();
        self.calculate(&fixtures)
    }

    /// Diameter for a flow rate, interpolating when configured to.
    pub fn diameter_for_flow(&self, flow: f64) -> Option<u32> {
        self.config
            .flow_table
            .diameter_for_flow(flow, self.config.interpolation_enabled)
    }

    pub fn max_flow_for_diameter(&self, diameter: u32) -> Option<f64> {
        self.config
            .flow_table
            .max_flow_for_diameter(diameter, self.config.interpolation_enabled)
    }

    /// Branch diameter for `count` connections of `diameter` mm.
    pub fn connection_diameter(
        &self,
        group: FixtureGroup,
        diameter: u32,
        count: u32,
    ) -> Option<u32> {
        self.config
            .connection
            .connection_diameter(group, diameter, count)
    }
}
