//! 32-byte big-endian field element encoding.

use core::fmt;

use bincode::{Decode, Encode};
use thiserror::Error;

/// A field element encoded as 32 big-endian bytes.
///
/// The encoding is backend-agnostic: a backend over a small field leaves the
/// high bytes zero, a backend over a 256-bit field uses all of them. Equality
/// and ordering are byte-wise, so two elements compare equal only if their
/// canonical encodings match.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Felt([u8; 32]);

/// Errors from parsing a [`Felt`] from text.
#[derive(Debug, Error, PartialEq)]
pub enum FeltParseError {
    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// Decoded byte length was not 32.
    #[error("expected 32 bytes, got {0}")]
    BadLength(usize),
}

impl Felt {
    /// The zero element. Also the root of an empty accumulator.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Wrap raw big-endian bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Big-endian encoding of a machine integer. No field reduction is
    /// performed; backends reduce before encoding.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// The low 64 bits of the encoding.
    pub fn low_u64(&self) -> u64 {
        u64::from_be_bytes(self.0[24..32].try_into().expect("8-byte slice"))
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The raw bytes by value.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, FeltParseError> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| FeltParseError::BadLength(v.len()))?;
        Ok(Self(bytes))
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `true` for the zero element.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Felt({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Felt {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Felt {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
