// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the analysis pipeline.

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("topology error: {0}")]
    Topology(#[from] pipenet_topology::Error),

    #[error("sizing error: {0}")]
    Sizing(#[from] pipenet_sizing::Error),

    /// Request or report (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
