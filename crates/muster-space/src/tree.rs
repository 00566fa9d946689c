//! Append-only Merkle tree with incremental root maintenance
//!
//! The tree is stored as an arena of levels rather than a pointer-linked
//! structure: `levels[0]` is the ordered leaf-hash sequence and `levels[k]`
//! holds the interior nodes `k` levels up. Appending a leaf recomputes only
//! the `O(log n)` nodes on its path to the root; the rest of the arena is
//! untouched.
//!
//! # Hashing policy
//!
//! These choices are fixed because they determine proof compatibility:
//!
//! - Leaf commitment: `H(value)`.
//! - Interior node: `H(left || right)`.
//! - A node without a right sibling is paired with a duplicate of itself,
//!   `H(x || x)`, at every level.
//! - The root of an empty tree is [`EMPTY_ROOT`], the digest of the empty
//!   byte string.
//!
//! `H` is the workspace-pinned hash (`muster_core::hash`).

use muster_core::{hash::hash, Error, Hash32, Result};
use serde::{Deserialize, Serialize};

/// Root of the empty tree: SHA-256 of the empty byte string.
pub const EMPTY_ROOT: Hash32 = Hash32([
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9,
    0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52,
    0xb8, 0x55,
]);

/// Maximum tree depth (supports up to 2^64 leaves in principle; in practice
/// bounds proof sizes and rejects malformed proofs).
pub const MAX_TREE_DEPTH: usize = 64;

/// Combine two sibling digests into their parent.
pub(crate) fn combine(left: &Hash32, right: &Hash32) -> Hash32 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    hash(&buf)
}

/// Commit a leaf value.
pub(crate) fn leaf_hash(value: &[u8]) -> Hash32 {
    hash(value)
}

/// Arena-backed append-only Merkle tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentTree {
    // levels[k] has ceil(n / 2^k) nodes for k below the top; the top level
    // has exactly one node (the root) once any leaf exists.
    levels: Vec<Vec<Hash32>>,
}

impl CommitmentTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed leaves.
    pub fn leaf_count(&self) -> u64 {
        self.levels.first().map_or(0, |leaves| leaves.len() as u64)
    }

    /// Current root. [`EMPTY_ROOT`] while no leaf has been committed.
    pub fn root(&self) -> Hash32 {
        match self.levels.last() {
            Some(top) => top[0],
            None => EMPTY_ROOT,
        }
    }

    /// Append a leaf value, returning its zero-based index.
    ///
    /// Recomputes only the nodes on the new leaf's path to the root.
    pub fn insert(&mut self, value: &[u8]) -> u64 {
        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        let index = self.levels[0].len();
        self.levels[0].push(leaf_hash(value));

        let mut idx = index;
        let mut level = 0;
        while self.levels[level].len() > 1 {
            let parent_idx = idx / 2;
            let lo = parent_idx * 2;
            let left = self.levels[level][lo];
            let right = self.levels[level].get(lo + 1).copied().unwrap_or(left);
            let parent = combine(&left, &right);

            if level + 1 == self.levels.len() {
                self.levels.push(Vec::new());
            }
            let next = &mut self.levels[level + 1];
            if parent_idx == next.len() {
                next.push(parent);
            } else {
                next[parent_idx] = parent;
            }
            idx = parent_idx;
            level += 1;
        }

        index as u64
    }

    /// Ordered sibling hashes from leaf `index` to the root.
    ///
    /// A node without a right sibling contributes a duplicate of itself, per
    /// the fixed padding policy, so the path always verifies with the plain
    /// index-parity walk.
    pub fn proof_path(&self, index: u64) -> Result<Vec<Hash32>> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(Error::index_out_of_range(index, leaf_count));
        }

        let mut siblings = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut idx = index as usize;
        // All levels below the top contribute one sibling each.
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = idx ^ 1;
            let sibling = level.get(sibling_idx).copied().unwrap_or(level[idx]);
            siblings.push(sibling);
            idx /= 2;
        }
        Ok(siblings)
    }

    /// Recompute the root from scratch over the full leaf sequence.
    ///
    /// Cross-check for the incremental path; quadratic in total work if
    /// called per insertion, so production reads use [`Self::root`].
    pub fn recompute_root(&self) -> Hash32 {
        let Some(leaves) = self.levels.first() else {
            return EMPTY_ROOT;
        };
        if leaves.is_empty() {
            return EMPTY_ROOT;
        }
        let mut current: Vec<Hash32> = leaves.clone();
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                next.push(combine(&left, &right));
            }
            current = next;
        }
        current[0]
    }
}
