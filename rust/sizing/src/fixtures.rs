// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Standard fixture catalogue.
//!
//! Loads are expressed in 15A-equivalents: the flow of one 15 mm branch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Simultaneity group a fixture is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureGroup {
    /// Flush-valve water closets; simultaneity depends on their quantity.
    FlushValve,
    /// Everything else; simultaneity depends on the summed load.
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureKind {
    WaterCloset,
    Urinal,
    Lavatory,
    ServiceSink,
    Shower,
    Bathtub,
    KitchenSink,
}

impl FixtureKind {
    pub const ALL: [FixtureKind; 7] = [
        FixtureKind::WaterCloset,
        FixtureKind::Urinal,
        FixtureKind::Lavatory,
        FixtureKind::ServiceSink,
        FixtureKind::Shower,
        FixtureKind::Bathtub,
        FixtureKind::KitchenSink,
    ];

    pub fn group(self) -> FixtureGroup {
        match self {
            FixtureKind::WaterCloset => FixtureGroup::FlushValve,
            _ => FixtureGroup::General,
        }
    }

    /// Equivalent load of one fixture.
    pub fn unit_load(self) -> f64 {
        match self {
            FixtureKind::WaterCloset => 4.9,
            FixtureKind::ServiceSink | FixtureKind::Bathtub => 2.6,
            FixtureKind::Urinal
            | FixtureKind::Lavatory
            | FixtureKind::Shower
            | FixtureKind::KitchenSink => 1.0,
        }
    }

    /// Nominal connection diameter in mm.
    pub fn connection_size(self) -> u32 {
        match self {
            FixtureKind::WaterCloset => 25,
            FixtureKind::ServiceSink | FixtureKind::Bathtub => 20,
            FixtureKind::Urinal
            | FixtureKind::Lavatory
            | FixtureKind::Shower
            | FixtureKind::KitchenSink => 15,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FixtureKind::WaterCloset => "water-closet",
            FixtureKind::Urinal => "urinal",
            FixtureKind::Lavatory => "lavatory",
            FixtureKind::ServiceSink => "service-sink",
            FixtureKind::Shower => "shower",
            FixtureKind::Bathtub => "bathtub",
            FixtureKind::KitchenSink => "kitchen-sink",
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FixtureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let kind = match normalized.as_str() {
            "wc" | "toilet" => FixtureKind::WaterCloset,
            "lav" | "basin" => FixtureKind::Lavatory,
            "tub" => FixtureKind::Bathtub,
            other => {
                return FixtureKind::ALL
                    .into_iter()
                    .find(|k| k.name() == other)
                    .ok_or_else(|| Error::UnknownFixture(s.to_string()))
            }
        };
        Ok(kind)
    }
}

/// A group of identical fixtures fed by one branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixtureLoad {
    pub group: FixtureGroup,
    /// Equivalent load of one fixture.
    pub unit_load: f64,
    pub quantity: u32,
    /// Minimum pipe size the fixture connection requires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_size: Option<u32>,
}

impl FixtureLoad {
    /// Catalogue entry for `quantity` fixtures of one kind.
    pub fn of(kind: FixtureKind, quantity: u32) -> Self {
        Self {
            group: kind.group(),
            unit_load: kind.unit_load(),
            quantity,
            connection_size: Some(kind.connection_size()),
        }
    }

    pub fn total_load(&self) -> f64 {
        self.unit_load * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_values() {
        let wc = FixtureLoad::of(FixtureKind::WaterCloset, 3);
        assert_eq!(wc.group, FixtureGroup::FlushValve);
        assert_eq!(wc.connection_size, Some(25));
        assert!((wc.total_load() - 14.7).abs() < 1e-12);

        assert_eq!(FixtureKind::Bathtub.unit_load(), 2.6);
        assert_eq!(FixtureKind::ServiceSink.connection_size(), 20);
        assert!(FixtureKind::ALL
            .iter()
            .filter(|k| **k != FixtureKind::WaterCloset)
            .all(|k| k.group() == FixtureGroup::General));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("wc".parse::<FixtureKind>().unwrap(), FixtureKind::WaterCloset);
        assert_eq!("Kitchen_Sink".parse::<FixtureKind>().unwrap(), FixtureKind::KitchenSink);
        assert_eq!("lav".parse::<FixtureKind>().unwrap(), FixtureKind::Lavatory);
        for kind in FixtureKind::ALL {
            assert_eq!(kind.to_string().parse::<FixtureKind>().unwrap(), kind);
        }
        assert!(matches!(
            "bidet".parse::<FixtureKind>(),
            Err(Error::UnknownFixture(name)) if name == "bidet"
        ));
    }
}
