//! Field-element hashing for the Cairn accumulator.
//!
//! The accumulator core never touches a concrete hash permutation. It works
//! against a small contract:
//!
//! - [`Felt`] — a field element encoded as 32 big-endian bytes.
//! - [`FieldHasher`] — fixed-arity keyed hashing over field elements, plus
//!   the 256-bit-digest-to-field reduction.
//! - [`Blake3FieldHasher`] — the default backend: arity-tagged Blake3
//!   compression reduced into the Goldilocks prime field.
//!
//! Any backend with the same arities and field semantics can be substituted
//! without touching the accumulator.

#![warn(missing_docs)]

mod felt;
mod hasher;

pub use felt::{Felt, FeltParseError};
pub use hasher::{Blake3FieldHasher, FieldHasher, GOLDILOCKS_PRIME};
