mod test_mmr;

use crate::{Blake3FieldHasher, MemStore, Mmr};

/// 256-bit digest from a counter (test convenience).
pub(crate) fn digest_from_u32(i: u32) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest[..4].copy_from_slice(&i.to_le_bytes());
    digest
}

/// Append `count` counter digests into a fresh store.
///
/// Returns the populated store, the final width, and the positions assigned
/// to each leaf in append order.
pub(crate) fn build_mmr(count: u32) -> (MemStore, u64, Vec<u64>) {
    let store = MemStore::default();
    let mut positions = Vec::with_capacity(count as usize);
    let width;
    {
        let mut mmr = Mmr::new(&store, Blake3FieldHasher);
        for i in 0..count {
            positions.push(mmr.append(digest_from_u32(i)).expect("append"));
        }
        width = mmr.width();
    }
    (store, width, positions)
}
