//! Inclusion proofs and their stateless verification.

use bincode::{Decode, Encode};
use cairn_hash::{Felt, FieldHasher};

use crate::{
    helper::{children, peak_positions, size_for_width},
    mmr::bag_peaks,
    Error, Result,
};

/// Decode size cap; a crafted length header must not drive allocations.
const MAX_PROOF_BYTES: usize = 1024 * 1024;

/// A self-describing inclusion proof.
///
/// Carries the root and width it was built against, the full ordered peak
/// set, and the sibling hashes from the leaf-adjacent level up to the
/// covering peak. The proved position and the leaf's value digest travel
/// separately and are supplied at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Proof {
    root: Felt,
    width: u64,
    peaks: Vec<Felt>,
    siblings: Vec<Felt>,
}

impl Proof {
    /// Construct a proof from its parts.
    pub fn new(root: Felt, width: u64, peaks: Vec<Felt>, siblings: Vec<Felt>) -> Self {
        Proof {
            root,
            width,
            peaks,
            siblings,
        }
    }

    /// The root commitment this proof was built against.
    pub fn root(&self) -> Felt {
        self.root
    }

    /// The leaf count this proof was built against.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// The full peak set, tallest mountain first.
    pub fn peaks(&self) -> &[Felt] {
        &self.peaks
    }

    /// Sibling hashes, leaf-adjacent level first.
    pub fn siblings(&self) -> &[Felt] {
        &self.siblings
    }

    /// Verify that the leaf at `leaf_pos` with value `digest` is included
    /// under this proof's root. Pure; see [`verify_inclusion`].
    pub fn verify<H: FieldHasher>(
        &self,
        hasher: &H,
        leaf_pos: u64,
        digest: [u8; 32],
    ) -> Result<bool> {
        verify_inclusion(
            hasher,
            self.root,
            self.width,
            leaf_pos,
            digest,
            &self.peaks,
            &self.siblings,
        )
    }

    /// Serialize this proof to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::InvalidData(format!("failed to encode proof: {}", e)))
    }

    /// Deserialize a proof from bytes.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_PROOF_BYTES>();
        let (proof, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::InvalidData(format!("failed to decode proof: {}", e)))?;
        Ok(proof)
    }
}

/// Verify an inclusion proof with no access to stored state.
///
/// Reconstructs positions and hashes purely from the inputs: the supplied
/// peaks must bag to `root`, and recomputing hashes from the leaf up its
/// re-derived descent path must land on the covering peak.
///
/// Structural defects — an out-of-range position, a peak list that does not
/// match the width, no covering peak, the wrong number of siblings — are
/// errors. Authentication defects — peaks that do not bag to `root`, or a
/// recomputed hash that misses the covering peak — return `Ok(false)`, so
/// callers can branch on untrusted input without exceptional control flow.
pub fn verify_inclusion<H: FieldHasher>(
    hasher: &H,
    root: Felt,
    width: u64,
    leaf_pos: u64,
    digest: [u8; 32],
    peaks: &[Felt],
    siblings: &[Felt],
) -> Result<bool> {
    let size = size_for_width(width);
    if leaf_pos == 0 || leaf_pos > size {
        return Err(Error::PositionOutOfRange {
            pos: leaf_pos,
            size,
        });
    }
    if bag_peaks(hasher, width, peaks)? != root {
        return Ok(false);
    }

    let positions = peak_positions(width);
    let covering = positions
        .iter()
        .position(|&pos| pos >= leaf_pos)
        .ok_or(Error::PeakNotFound(leaf_pos))?;
    let peak_pos = positions[covering];
    let target_peak = peaks[covering];

    // Re-derive the descent path by index arithmetic alone, using the same
    // child-selection rule as the proof builder.
    let mut path = vec![peak_pos];
    let mut pos = peak_pos;
    while pos != leaf_pos {
        let (left, right) = children(pos)?;
        pos = if leaf_pos <= left { left } else { right };
        path.push(pos);
    }
    if siblings.len() != path.len() - 1 {
        return Err(Error::InvalidProof(format!(
            "expected {} siblings, got {}",
            path.len() - 1,
            siblings.len()
        )));
    }

    // Recompute bottom-up. The previous path entry tells which child the
    // running hash was, which decides the operand order at each ancestor.
    let value = hasher.digest_to_field(digest);
    let mut node = hasher.hash2(hasher.from_u64(leaf_pos), value);
    for (level, sibling) in siblings.iter().enumerate() {
        let ancestor = path[path.len() - 2 - level];
        let below = path[path.len() - 1 - level];
        let (_, right) = children(ancestor)?;
        node = if right == below {
            hasher.hash3(hasher.from_u64(ancestor), *sibling, node)
        } else {
            hasher.hash3(hasher.from_u64(ancestor), node, *sibling)
        };
    }
    Ok(node == target_peak)
}
