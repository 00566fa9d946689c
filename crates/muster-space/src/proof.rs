//! Inclusion proofs and their verification
//!
//! Verification is a pure function over `(root, leaf value, leaf index,
//! sibling path)`: it touches no tree state, so any holder of a root can
//! check a proof offline.

use crate::tree::{combine, leaf_hash, MAX_TREE_DEPTH};
use muster_core::Hash32;
use serde::{Deserialize, Serialize};

/// Why a deserialized proof failed structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofDefect {
    /// More siblings than the maximum tree depth allows.
    PathTooLong,
    /// Leaf index at or past the claimed leaf count.
    IndexBeyondCount,
    /// Claimed leaf count of zero alongside a non-trivial path or index.
    EmptyTreeMismatch,
}

/// An inclusion proof for one leaf.
///
/// `siblings` is ordered leaf-to-root. `leaf_index` and `leaf_count`
/// describe the tree the proof was generated against; both participate in
/// verification (`leaf_index` decides left/right combination order at each
/// level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Sibling hashes from the leaf's level up to just below the root.
    pub siblings: Vec<Hash32>,
    /// Zero-based index of the proven leaf.
    pub leaf_index: u64,
    /// Leaf count of the tree at proof generation time.
    pub leaf_count: u64,
}

impl MerkleProof {
    /// Check structural invariants, typically after deserialization.
    pub fn validate(&self) -> Result<(), ProofDefect> {
        if self.siblings.len() > MAX_TREE_DEPTH {
            return Err(ProofDefect::PathTooLong);
        }
        if self.leaf_count == 0 {
            if !self.siblings.is_empty() || self.leaf_index != 0 {
                return Err(ProofDefect::EmptyTreeMismatch);
            }
        } else if self.leaf_index >= self.leaf_count {
            return Err(ProofDefect::IndexBeyondCount);
        }
        Ok(())
    }
}

/// Verify an inclusion proof against a root.
///
/// Recomputes the path from `leaf_value` upward, using the bit pattern of
/// `leaf_index` to decide combination order at each level, and compares the
/// result to `root`. Returns `false` for structurally invalid proofs, an
/// index that contradicts the proof, or any hash mismatch; it never errors.
pub fn verify_proof(
    root: &Hash32,
    leaf_value: &[u8],
    leaf_index: u64,
    proof: &MerkleProof,
) -> bool {
    if proof.validate().is_err() || proof.leaf_index != leaf_index {
        return false;
    }

    let mut current = leaf_hash(leaf_value);
    let mut idx = leaf_index;
    for sibling in &proof.siblings {
        current = if idx % 2 == 0 {
            combine(&current, sibling)
        } else {
            combine(sibling, &current)
        };
        idx /= 2;
    }
    current == *root
}
