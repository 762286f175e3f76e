// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for sizing operations.

/// Result type alias for sizing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building sizing configuration or evaluating loads.
///
/// Lookups themselves never fail: out-of-range inputs yield `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("lookup table must have at least one entry")]
    EmptyTable,

    #[error("table key at position {index} is not finite")]
    NonFiniteKey { index: usize },

    #[error("table keys must be strictly increasing (position {index})")]
    UnsortedKeys { index: usize },

    #[error("upper limit {limit} lies below the last table key {last_key}")]
    InvalidUpperLimit { limit: f64, last_key: f64 },

    #[error("simultaneity curve must have at least one step")]
    EmptyCurve,

    #[error("simultaneity thresholds must be finite and strictly increasing (step {index})")]
    InvalidThreshold { index: usize },

    #[error("simultaneity rate {rate} is outside (0, 1]")]
    InvalidRate { rate: f64 },

    #[error("simultaneity rates must not increase with load (step {index})")]
    IncreasingRate { index: usize },

    #[error("flow table row {index} is inconsistent: {reason}")]
    InvalidFlowRow { index: usize, reason: &'static str },

    #[error("fixture load must be finite and non-negative, got {0}")]
    InvalidLoad(f64),

    #[error("unknown fixture: {0}")]
    UnknownFixture(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
