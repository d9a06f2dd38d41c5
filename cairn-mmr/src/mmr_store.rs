use cairn_hash::Felt;

use crate::Result;

/// Read access to the node store.
///
/// Positions are 1-based. An absent entry means "not yet materialized",
/// which is distinct from a stored zero hash.
pub trait NodeStoreReadOps {
    /// Retrieve the hash stored at `pos`, if any.
    fn node_at_position(&self, pos: u64) -> Result<Option<Felt>>;
}

/// Write access to the node store.
///
/// Entries are write-once for the lifetime of the accumulator: the engine
/// only inserts at fresh positions, and archived hashes must remain valid
/// forever for proofs built against earlier roots.
pub trait NodeStoreWriteOps {
    /// Persist `hash` at position `pos`.
    fn insert(&mut self, pos: u64, hash: Felt) -> Result<()>;
}
