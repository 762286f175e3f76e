// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PipeNet Processing
//!
//! The analysis pipeline shared by hosts: an [`AnalysisRequest`] carrying
//! selected segments, a root and per-handle demand goes in, and an
//! [`AnalysisOutcome`] comes out, holding either a sized tree report or the
//! reason nothing was done.
//!
//! ```
//! use pipenet_processing::{Analyzer, AnalysisRequest};
//!
//! let request = AnalysisRequest::from_json(r#"{
//!     "segments": [
//!         {"handle": "main", "start": [0, 0], "end": [0, 3]},
//!         {"handle": "wc", "start": [0, 3], "end": [2, 3]}
//!     ],
//!     "root": {"handle": "main"},
//!     "demands": {"wc": 4.9}
//! }"#).unwrap();
//!
//! let outcome = Analyzer::default().analyze(&request).unwrap();
//! let report = outcome.report().unwrap();
//! assert_eq!(report.total_load, 4.9);
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod request;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use pipeline::{analyze, Analyzer};
pub use report::{AnalysisOutcome, AnalysisReport, Diagnostics, MajorJunction, NodeSize};
pub use request::AnalysisRequest;
