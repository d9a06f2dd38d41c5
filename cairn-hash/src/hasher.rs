//! The fixed-arity keyed hash contract and its default Blake3 backend.
//!
//! Hash domain separation:
//! - Two-ary:   `blake3(0x02 || a || b)`
//! - Three-ary: `blake3(0x03 || a || b || c)`
//!
//! The arity tags prevent a crafted two-ary input from colliding with a
//! three-ary compression of overlapping bytes. Outputs are reduced into the
//! Goldilocks prime field so every hash input and output lives in the same
//! algebraic domain.

use crate::Felt;

/// Goldilocks prime: p = 2^64 − 2^32 + 1.
pub const GOLDILOCKS_PRIME: u64 = 0xFFFF_FFFF_0000_0001;

/// Domain tag for two-ary compression.
const TAG_HASH2: u8 = 0x02;
/// Domain tag for three-ary compression.
const TAG_HASH3: u8 = 0x03;

/// Fixed-arity keyed hashing over field elements.
///
/// The accumulator uses the same construction end to end: leaves are
/// `hash2(position, value)`, branches are `hash3(position, left, right)`,
/// and the root is a chained `hash2` fold over the peaks. Implementations
/// must agree on arity and field semantics to stay interoperable with any
/// verifier mirroring the construction.
pub trait FieldHasher {
    /// Two-ary compression.
    fn hash2(&self, a: Felt, b: Felt) -> Felt;

    /// Three-ary compression.
    fn hash3(&self, a: Felt, b: Felt, c: Felt) -> Felt;

    /// Reduce a raw 256-bit digest into the field.
    fn digest_to_field(&self, digest: [u8; 32]) -> Felt;

    /// Embed a machine integer into the field.
    fn from_u64(&self, value: u64) -> Felt;
}

/// Arity-tagged Blake3 compression reduced into the Goldilocks field.
///
/// A substitutable default: any backend with two- and three-ary compression
/// over a prime field fits the [`FieldHasher`] contract; this one reuses the
/// Blake3 hashing already in the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3FieldHasher;

impl Blake3FieldHasher {
    fn compress(tag: u8, parts: &[&Felt]) -> Felt {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[tag]);
        for part in parts {
            hasher.update(part.as_bytes());
        }
        reduce_digest(hasher.finalize().as_bytes())
    }
}

impl FieldHasher for Blake3FieldHasher {
    fn hash2(&self, a: Felt, b: Felt) -> Felt {
        Self::compress(TAG_HASH2, &[&a, &b])
    }

    fn hash3(&self, a: Felt, b: Felt, c: Felt) -> Felt {
        Self::compress(TAG_HASH3, &[&a, &b, &c])
    }

    fn digest_to_field(&self, digest: [u8; 32]) -> Felt {
        reduce_digest(&digest)
    }

    fn from_u64(&self, value: u64) -> Felt {
        Felt::from_u64(value % GOLDILOCKS_PRIME)
    }
}

/// Interpret 32 big-endian bytes as an integer and reduce it mod p.
fn reduce_digest(digest: &[u8; 32]) -> Felt {
    let mut acc: u64 = 0;
    for limb in digest.chunks_exact(8) {
        let limb = u64::from_be_bytes(limb.try_into().expect("chunks_exact yields 8 bytes"));
        acc = fold_limb(acc, limb);
    }
    Felt::from_u64(acc)
}

/// One Horner step: `(acc · 2^64 + limb) mod p`.
fn fold_limb(acc: u64, limb: u64) -> u64 {
    ((((acc as u128) << 64) | limb as u128) % GOLDILOCKS_PRIME as u128) as u64
}
