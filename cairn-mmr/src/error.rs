use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for accumulator operations.
///
/// Every failure is a synchronous precondition violation; none is transient
/// and none leaves the accumulator's `width`/`size`/`root` partially updated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested position exceeds the node-index upper bound.
    #[error("position {pos} out of range (size {size})")]
    PositionOutOfRange {
        /// The offending position.
        pos: u64,
        /// The node-index upper bound it was checked against.
        size: u64,
    },
    /// Inclusion proofs can only be built for leaves.
    #[error("position {0} is not a leaf")]
    NotALeaf(u64),
    /// No peak covers the given position; the supplied width and position
    /// do not belong to the same accumulator state.
    #[error("no peak covers position {0}")]
    PeakNotFound(u64),
    /// The supplied peak list length does not match the population count of
    /// the width. Signals a malformed or tampered proof.
    #[error("expected {expected} peaks, got {actual}")]
    PeakCountMismatch {
        /// Population count of the width.
        expected: usize,
        /// Length of the supplied peak list.
        actual: usize,
    },
    /// The store is missing a node the structure requires.
    #[error("store is missing node at position {0}")]
    InconsistentStore(u64),
    /// A fresh leaf position was already populated. Node entries are
    /// write-once; this indicates a corrupted store or index scheme.
    #[error("position {0} is already occupied")]
    PositionOccupied(u64),
    /// Child derivation was requested for a leaf. Indicates a corrupted
    /// index scheme and is treated as fatal, not recoverable.
    #[error("position {0} has no children")]
    NotAParent(u64),
    /// Structurally malformed proof (wrong sibling count).
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    /// Serialization or deserialization failure.
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// A failure propagated from the store backend.
    #[error("store error: {0}")]
    StoreError(String),
}
