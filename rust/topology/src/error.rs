// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology operations.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, traversing or aggregating a pipe
/// network.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A segment endpoint contains NaN or an infinite coordinate.
    #[error("segment {handle:?} has a non-finite coordinate")]
    NonFiniteCoordinate { handle: String },

    /// A pick point contains NaN or an infinite coordinate.
    #[error("pick point has a non-finite coordinate")]
    NonFinitePickPoint,

    /// The coincidence tolerance must be a finite, strictly positive length.
    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    /// The root selection did not resolve to any node of the graph.
    #[error("root could not be resolved: {0}")]
    RootUnresolved(String),

    /// The traversal went deeper than the configured depth guard.
    #[error("traversal exceeded the depth limit of {0}")]
    DepthLimitExceeded(usize),

    /// A supplied demand value is NaN or infinite.
    #[error("demand for {handle:?} is not finite: {value}")]
    NonFiniteDemand { handle: String, value: f64 },

    /// Children were sorted by load before loads were aggregated.
    #[error("children can only be sorted by load after aggregation")]
    LoadsNotAggregated,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
