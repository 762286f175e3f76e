// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Index types for the graph and tree arenas.
//!
//! Nodes and edges live in flat `Vec` arenas owned by a
//! [`PipeGraph`](crate::PipeGraph), and tree nodes in the arena of a
//! [`PipeTree`](crate::PipeTree). Relations between them are stored as these
//! typed indices rather than references, so cyclic pipe networks never create
//! ownership cycles.

use serde::{Deserialize, Serialize};

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Returns the raw arena position.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }
    };
}

arena_index! {
    /// Identifier of a graph node (a junction point or a whole segment,
    /// depending on the connectivity strategy).
    NodeId
}

arena_index! {
    /// Identifier of a graph edge.
    EdgeId
}

arena_index! {
    /// Position of a node inside a [`PipeTree`](crate::PipeTree) arena.
    TreeIndex
}
