use thiserror::Error;

/// Error returned by [`OrderedMap::validate`](crate::OrderedMap::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A node's cached subtree size does not match its children.
    #[error("subtree size is {found}, expected {expected}")]
    SizeMismatch {
        /// One plus the cached sizes of the children.
        expected: usize,
        /// Size cached in the node.
        found: usize,
    },
    /// In-order traversal found a key not greater than the one before it.
    #[error("key at in-order position {position} is out of order")]
    Unordered {
        /// Zero-based position of the offending key in ascending iteration.
        position: usize,
    },
}
