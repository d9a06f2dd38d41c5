//! Merkle Mountain Range (MMR) — an append-only authenticated accumulator.
//!
//! The accumulator commits to an ever-growing sequence of 256-bit leaf
//! digests under a single field-element root and produces succinct inclusion
//! proofs for any previously appended leaf. Every hash binds the position of
//! the node it covers, and the root binds the exact leaf count, so proofs
//! cannot be replayed at the wrong index or against the wrong width.
//!
//! # Core types
//!
//! - [`Mmr`] — the accumulator (append, root, peaks, proof, open).
//! - [`Proof`] — self-describing inclusion proof (verify, encode, decode).
//! - [`verify_inclusion`] — the stateless verifier behind [`Proof::verify`].
//!
//! # Store traits
//!
//! - [`NodeStoreReadOps`] — read a node hash by position.
//! - [`NodeStoreWriteOps`] — persist a node hash at a position.
//! - [`MemStore`] — in-memory store for tests and ephemeral computation.
//!
//! # Example
//!
//! ```
//! use cairn_mmr::{Blake3FieldHasher, MemStore, Mmr};
//!
//! let store = MemStore::default();
//! let mut mmr = Mmr::new(&store, Blake3FieldHasher);
//!
//! let pos = mmr.append([1u8; 32])?;
//! mmr.append([2u8; 32])?;
//!
//! let proof = mmr.proof(pos)?;
//! assert!(proof.verify(&Blake3FieldHasher, pos, [1u8; 32])?);
//! # Ok::<(), cairn_mmr::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
/// Position arithmetic for the 1-based flat index space.
pub(crate) mod helper;
/// In-memory node store.
pub mod mem_store;
mod mmr;
mod mmr_store;
mod proof;
#[cfg(test)]
mod tests;

pub use cairn_hash::{Blake3FieldHasher, Felt, FieldHasher};
pub use error::{Error, Result};
pub use helper::{
    children, height_at, is_leaf, leaf_position, peak_count, peak_positions, size_for_width,
};
pub use mem_store::MemStore;
pub use mmr::Mmr;
pub use mmr_store::{NodeStoreReadOps, NodeStoreWriteOps};
pub use proof::{verify_inclusion, Proof};
