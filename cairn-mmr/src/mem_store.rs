use std::{cell::RefCell, collections::BTreeMap};

use cairn_hash::Felt;

use crate::{NodeStoreReadOps, NodeStoreWriteOps, Result};

/// In-memory node store backed by a `BTreeMap`.
///
/// Useful for tests and ephemeral computation. The store traits are
/// implemented on `&MemStore` so one store can back an accumulator while
/// remaining readable from the outside.
#[derive(Clone)]
pub struct MemStore(RefCell<BTreeMap<u64, Felt>>);

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    fn new() -> Self {
        MemStore(RefCell::new(Default::default()))
    }

    /// Number of populated positions.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// `true` if no position is populated.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl NodeStoreReadOps for &MemStore {
    fn node_at_position(&self, pos: u64) -> Result<Option<Felt>> {
        Ok(self.0.borrow().get(&pos).copied())
    }
}

impl NodeStoreWriteOps for &MemStore {
    fn insert(&mut self, pos: u64, hash: Felt) -> Result<()> {
        self.0.borrow_mut().insert(pos, hash);
        Ok(())
    }
}
