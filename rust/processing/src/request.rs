// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-supplied analysis requests.

use pipenet_topology::{RootSelector, SegmentInput};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A selection of pipe segments to analyze from a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub segments: Vec<SegmentInput>,
    pub root: RootSelector,
    /// Demand (15A-equivalent load) per segment handle.
    #[serde(default)]
    pub demands: FxHashMap<String, f64>,
    /// Smallest diameter (mm) a segment may be sized to.
    #[serde(default)]
    pub min_connection_sizes: FxHashMap<String, u32>,
}

impl AnalysisRequest {
    pub fn new(segments: Vec<SegmentInput>, root: RootSelector) -> Self {
        Self {
            segments,
            root,
            demands: FxHashMap::default(),
            min_connection_sizes: FxHashMap::default(),
        }
    }

    pub fn with_demand(mut self, handle: impl Into<String>, demand: f64) -> Self {
        self.demands.insert(handle.into(), demand);
        self
    }

    pub fn with_min_connection(mut self, handle: impl Into<String>, diameter: u32) -> Self {
        self.min_connection_sizes.insert(handle.into(), diameter);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
