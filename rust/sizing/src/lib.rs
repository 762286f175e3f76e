// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PipeNet Sizing
//!
//! Translates aggregated fixture demand into standard pipe diameters.
//!
//! Demand is expressed in 15A-equivalent loads. A [`SizingEngine`] applies
//! simultaneous-use rates ([`StepCurve`]) per fixture group, sums the
//! effective loads and picks a diameter from a capacity [`LookupTable`].
//! Flow-based sizing ([`FlowTable`]) and count-based branch sizing
//! ([`ConnectionTables`]) are available alongside.
//!
//! All tables are injected through [`SizingConfig`], whose `Default` holds
//! the standard tables.
//!
//! ```
//! use pipenet_sizing::{FixtureKind, SizingEngine};
//!
//! let engine = SizingEngine::default();
//! let result = engine.size_for_counts(&[(FixtureKind::WaterCloset, 3)]).unwrap();
//! assert_eq!(result.main_size, Some(40));
//! ```

pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod flow;
pub mod simultaneity;
pub mod table;

pub use config::SizingConfig;
pub use connection::ConnectionTables;
pub use engine::{SizingEngine, SizingResult};
pub use error::{Error, Result};
pub use fixtures::{FixtureGroup, FixtureKind, FixtureLoad};
pub use flow::{FlowRow, FlowTable};
pub use simultaneity::{Bound, StepCurve};
pub use table::{LookupTable, Overflow};
