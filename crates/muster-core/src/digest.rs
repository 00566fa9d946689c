//! 32-byte digest newtype used for roots, leaves, and derived identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte hash digest.
///
/// Wraps the raw array so digests, identities, and identifiers cannot be
/// confused with arbitrary byte buffers at API boundaries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// The all-zero digest.
    pub const ZERO: Hash32 = Hash32([0u8; 32]);

    /// Construct from a raw 32-byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short prefix keeps log lines readable
        write!(f, "Hash32({}..)", &self.to_hex()[..8])
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Hash32> for [u8; 32] {
    fn from(digest: Hash32) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Hash32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let digest = Hash32([0xab; 32]);
        assert_eq!(digest.to_string(), "ab".repeat(32));
    }

    #[test]
    fn debug_is_abbreviated() {
        let digest = Hash32([0xcd; 32]);
        assert_eq!(format!("{digest:?}"), "Hash32(cdcdcdcd..)");
    }
}
