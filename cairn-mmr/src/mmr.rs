//! The accumulator engine: append, lazy node materialization, peak bagging.

use cairn_hash::{Blake3FieldHasher, Felt, FieldHasher};

use crate::{
    helper::{children, is_leaf, leaf_position, peak_count, peak_positions, size_for_width},
    proof::Proof,
    Error, NodeStoreReadOps, NodeStoreWriteOps, Result,
};

/// An append-only Merkle Mountain Range over a pluggable node store and hash
/// backend.
///
/// `S` is the backing store (implements [`NodeStoreReadOps`] and/or
/// [`NodeStoreWriteOps`]); `H` is the hash backend. Appending is the only
/// mutation: leaves are hashed with their assigned position, missing internal
/// nodes are materialized bottom-up with memoization, and the root is
/// recomputed by bagging the peaks with the forest size.
///
/// Mutation is serialized through `&mut self`; readers take `&self` and see
/// a committed state, since `width`/`size`/`root` are only updated after
/// every fallible step of an append has passed.
pub struct Mmr<S, H = Blake3FieldHasher> {
    store: S,
    hasher: H,
    width: u64,
    size: u64,
    root: Felt,
}

impl<S, H> Mmr<S, H> {
    /// Create a new empty accumulator.
    pub fn new(store: S, hasher: H) -> Self {
        Mmr {
            store,
            hasher,
            width: 0,
            size: 0,
            root: Felt::ZERO,
        }
    }

    /// Number of leaves appended so far.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Total node count (leaves + internal) of the current forest.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The current root commitment. [`Felt::ZERO`] while empty.
    pub fn root(&self) -> Felt {
        self.root
    }

    /// `true` if no leaf has been appended.
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Reference to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reference to the hash backend.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<S: NodeStoreReadOps, H: FieldHasher> Mmr<S, H> {
    /// Re-open an accumulator over an already-populated store, given the
    /// leaf count it was built to.
    ///
    /// `size` and `root` are recomputed from the stored peaks; a missing
    /// peak fails with [`Error::InconsistentStore`].
    pub fn open(width: u64, store: S, hasher: H) -> Result<Self> {
        let mut mmr = Mmr {
            store,
            hasher,
            width,
            size: size_for_width(width),
            root: Felt::ZERO,
        };
        let peaks = mmr.peaks()?;
        mmr.root = bag_peaks(&mmr.hasher, width, &peaks)?;
        Ok(mmr)
    }

    /// Hash stored at `pos`, or `None` if not yet materialized.
    pub fn node_hash(&self, pos: u64) -> Result<Option<Felt>> {
        self.store.node_at_position(pos)
    }

    /// The current peak hashes, tallest mountain first.
    pub fn peaks(&self) -> Result<Vec<Felt>> {
        let positions = peak_positions(self.width);
        let mut peaks = Vec::with_capacity(positions.len());
        for pos in positions {
            let hash = self
                .store
                .node_at_position(pos)?
                .ok_or(Error::InconsistentStore(pos))?;
            peaks.push(hash);
        }
        Ok(peaks)
    }

    /// Build an inclusion proof for the leaf at `leaf_pos`.
    ///
    /// Fails for positions beyond the current size and for internal nodes.
    /// The returned [`Proof`] carries the root and width it was built
    /// against, the full peak set, and the sibling hashes ordered from the
    /// leaf-adjacent level up to the covering peak.
    pub fn proof(&self, leaf_pos: u64) -> Result<Proof> {
        if leaf_pos == 0 || leaf_pos > self.size {
            return Err(Error::PositionOutOfRange {
                pos: leaf_pos,
                size: self.size,
            });
        }
        if !is_leaf(leaf_pos) {
            return Err(Error::NotALeaf(leaf_pos));
        }
        let peaks = self.peaks()?;
        let peak_pos = peak_positions(self.width)
            .into_iter()
            .find(|&pos| pos >= leaf_pos)
            .ok_or(Error::PeakNotFound(leaf_pos))?;

        // Walk down from the covering peak, recording the hash of whichever
        // child the target is not under.
        let mut siblings = Vec::new();
        let mut pos = peak_pos;
        while pos != leaf_pos {
            let (left, right) = children(pos)?;
            let (next, sibling) = if leaf_pos <= left {
                (left, right)
            } else {
                (right, left)
            };
            let hash = self
                .store
                .node_at_position(sibling)?
                .ok_or(Error::InconsistentStore(sibling))?;
            siblings.push(hash);
            pos = next;
        }
        siblings.reverse();

        Ok(Proof::new(self.root, self.width, peaks, siblings))
    }
}

impl<S: NodeStoreReadOps + NodeStoreWriteOps, H: FieldHasher> Mmr<S, H> {
    /// Append a leaf digest and return the position assigned to it.
    ///
    /// The digest is reduced into the hash backend's field, bound to its
    /// position with a two-ary hash, and stored at a fresh position. Any
    /// internal nodes the new forest shape requires are materialized
    /// bottom-up; nodes from earlier appends are reused, never recomputed.
    /// Finally the root is rebuilt by bagging the peaks.
    ///
    /// `width`, `size` and `root` are committed only after every fallible
    /// step, so a failed append leaves the accumulator state unchanged
    /// (node-store writes are position-addressed and idempotent).
    pub fn append(&mut self, digest: [u8; 32]) -> Result<u64> {
        let value = self.hasher.digest_to_field(digest);
        let width = self.width + 1;
        let pos = leaf_position(width);
        if self.store.node_at_position(pos)?.is_some() {
            return Err(Error::PositionOccupied(pos));
        }
        let leaf = self.hasher.hash2(self.hasher.from_u64(pos), value);
        self.store.insert(pos, leaf)?;

        let size = size_for_width(width);
        let positions = peak_positions(width);
        let mut peaks = Vec::with_capacity(positions.len());
        for peak_pos in positions {
            peaks.push(self.get_or_create(peak_pos, size)?);
        }
        let root = bag_peaks(&self.hasher, width, &peaks)?;

        self.width = width;
        self.size = size;
        self.root = root;
        Ok(pos)
    }

    // Memoized bottom-up materialization of the node at `pos`. Recursion
    // depth is bounded by the mountain height (log2 of the width).
    fn get_or_create(&mut self, pos: u64, size: u64) -> Result<Felt> {
        if pos > size {
            return Err(Error::PositionOutOfRange { pos, size });
        }
        if let Some(hash) = self.store.node_at_position(pos)? {
            return Ok(hash);
        }
        let (left_pos, right_pos) = children(pos)?;
        let left = self.get_or_create(left_pos, size)?;
        let right = self.get_or_create(right_pos, size)?;
        let parent = self
            .hasher
            .hash3(self.hasher.from_u64(pos), left, right);
        self.store.insert(pos, parent)?;
        Ok(parent)
    }
}

/// Fold the peak hashes and the forest size into the root commitment.
///
/// Seeding the fold with the size and hashing it in again at the end ties
/// the root to the exact leaf count, so two widths with coincidentally equal
/// peak sets cannot collide. Width zero bags to [`Felt::ZERO`]; a peak list
/// whose length is not the population count of the width is rejected.
pub(crate) fn bag_peaks<H: FieldHasher>(hasher: &H, width: u64, peaks: &[Felt]) -> Result<Felt> {
    if width == 0 {
        return Ok(Felt::ZERO);
    }
    let expected = peak_count(width) as usize;
    if peaks.len() != expected {
        return Err(Error::PeakCountMismatch {
            expected,
            actual: peaks.len(),
        });
    }
    let size = hasher.from_u64(size_for_width(width));
    let mut acc = size;
    for peak in peaks {
        acc = hasher.hash2(acc, *peak);
    }
    Ok(hasher.hash2(size, acc))
}
