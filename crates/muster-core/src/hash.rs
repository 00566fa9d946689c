//! Pinned synchronous hash for commitments and identifier derivation
//!
//! Every digest in the system flows through this module. The algorithm is
//! selected once here; call sites use `hash()` or `hasher()` and never name
//! the algorithm directly, so swapping it is a one-line change.
//!
//! Current algorithm: **SHA-256** (32-byte output).

use crate::Hash32;
use sha2::{Digest, Sha256};

/// Hash arbitrary bytes to a 32-byte digest.
pub fn hash(data: &[u8]) -> Hash32 {
    let mut h = Sha256::new();
    h.update(data);
    Hash32(h.finalize().into())
}

/// Incremental hasher for multi-part input.
///
/// Useful when a digest covers several fields without an intermediate
/// allocation for the concatenation.
#[derive(Debug, Default)]
pub struct Hasher {
    inner: Sha256,
}

impl Hasher {
    /// Create a fresh hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Feed more bytes into the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the 32-byte digest.
    pub fn finalize(self) -> Hash32 {
        Hash32(self.inner.finalize().into())
    }
}

/// Create an incremental hasher.
pub fn hasher() -> Hasher {
    Hasher::new()
}
