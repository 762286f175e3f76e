// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Branch sizing from a count of identical connections.
//!
//! A branch feeding `count` connections of one diameter carries
//! `equivalent(diameter) × count × percent(count) / 100` 15A-equivalents,
//! which is then mapped to a branch diameter by a floor lookup.

use serde::{Deserialize, Serialize};

use crate::fixtures::FixtureGroup;
use crate::table::{LookupTable, Overflow};

/// Tables used by [`ConnectionTables::connection_diameter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionTables {
    /// Connection diameter (mm) → 15A-equivalent load.
    pub equivalent: LookupTable<f64>,
    /// Water-closet count → simultaneous use percentage.
    pub water_closet_percent: LookupTable<f64>,
    /// General fixture count → simultaneous use percentage.
    pub general_percent: LookupTable<f64>,
    /// Simultaneous load → branch diameter (floor lookup).
    pub same_use: LookupTable<u32>,
}

impl ConnectionTables {
    pub fn equivalent_load(&self, diameter: u32) -> Option<f64> {
        self.equivalent.lookup_exact(f64::from(diameter))
    }

    /// Percentage of `count` connections expected to be in use at once.
    ///
    /// Only tabulated counts have a percentage.
    pub fn simultaneous_percent(&self, group: FixtureGroup, count: u32) -> Option<f64> {
        let table = match group {
            FixtureGroup::FlushValve => &self.water_closet_percent,
            FixtureGroup::General => &self.general_percent,
        };
        table.lookup_exact(f64::from(count))
    }

    /// Branch diameter for `count` connections of `diameter` mm.
    pub fn connection_diameter(
        &self,
        group: FixtureGroup,
        diameter: u32,
        count: u32,
    ) -> Option<u32> {
        let equivalent = self.equivalent_load(diameter)?;
        let percent = self.simultaneous_percent(group, count)?;
        let simultaneous = equivalent * f64::from(count) * percent / 100.0;
        if simultaneous <= 0.0 {
            return None;
        }
        self.same_use.lookup_floor(simultaneous)
    }
}

fn counts(pairs: &[(u32, f64)]) -> Vec<(f64, f64)> {
    pairs.iter().map(|&(n, p)| (f64::from(n), p)).collect()
}

impl Default for ConnectionTables {
    fn default() -> Self {
        let equivalent = counts(&[
            (15, 1.0),
            (20, 2.6),
            (25, 4.9),
            (32, 9.2),
            (40, 14.5),
            (50, 30.0),
            (65, 53.0),
            (80, 84.6),
            (100, 178.0),
            (125, 280.0),
            (150, 452.0),
        ]);
        let water_closet_percent = counts(&[
            (1, 100.0),
            (2, 100.0),
            (3, 82.5),
            (4, 65.0),
            (5, 60.0),
            (6, 55.0),
            (7, 50.0),
            (8, 45.0),
            (9, 43.75),
            (10, 42.5),
            (11, 41.25),
            (12, 40.0),
            (13, 38.75),
            (14, 37.5),
            (15, 36.25),
            (16, 35.0),
            (17, 33.75),
            (18, 32.5),
            (19, 31.25),
            (20, 30.0),
            (21, 28.75),
            (22, 27.5),
            (23, 26.25),
            (24, 25.0),
            (32, 19.0),
            (40, 17.0),
            (50, 15.0),
            (70, 12.0),
            (100, 10.0),
        ]);
        let general_percent = counts(&[
            (1, 100.0),
            (2, 100.0),
            (3, 90.0),
            (4, 80.0),
            (5, 77.5),
            (6, 75.0),
            (7, 72.5),
            (8, 70.0),
            (9, 66.25),
            (10, 62.5),
            (11, 58.75),
            (12, 55.0),
            (13, 53.75),
            (14, 52.5),
            (15, 51.25),
            (16, 50.0),
            (17, 49.75),
            (18, 49.5),
            (19, 49.25),
            (20, 49.0),
            (21, 48.75),
            (22, 48.5),
            (23, 48.25),
            (24, 48.0),
            (32, 45.0),
            (40, 40.0),
            (50, 38.0),
            (70, 35.0),
            (100, 33.0),
        ]);
        let same_use = vec![
            (0.0, 15),
            (1.01, 20),
            (2.61, 25),
            (4.91, 32),
            (9.21, 40),
            (14.51, 50),
            (30.01, 65),
            (53.01, 80),
            (84.61, 100),
            (178.01, 125),
            (280.01, 150),
        ];

        Self {
            equivalent: LookupTable::from_sorted(equivalent, Overflow::Reject),
            water_closet_percent: LookupTable::from_sorted(water_closet_percent, Overflow::Reject),
            general_percent: LookupTable::from_sorted(general_percent, Overflow::Reject),
            same_use: LookupTable::from_sorted(same_use, Overflow::Saturate),
        }
    }
}
