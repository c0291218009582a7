//! The error type shared by every tree in this crate.

use thiserror::Error;

/// Result alias for tree operations that can fail.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

/// Everything that can go wrong when asking a tree for something.
///
/// None of these leave a tree half-modified: each is detected before any
/// node is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `min` or `max` was asked of a tree with no nodes. There is no value to
    /// return and a default would be indistinguishable from a real element.
    #[error("the tree is empty")]
    EmptyTree,

    /// A traversal order was requested by a name or code that doesn't map to
    /// any [`TraversalOrder`][crate::TraversalOrder].
    #[error("unknown traversal type: {0}")]
    UnknownTraversal(String),

    /// `copy_to` was given a destination that can't hold every element from
    /// the requested start index onwards.
    #[error("destination has room for {available} elements but {needed} are required")]
    InsufficientSpace {
        /// How many elements the tree holds.
        needed: usize,
        /// How many slots remain in the destination after the start index.
        available: usize,
    },
}
