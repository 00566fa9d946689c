//! Muster space - per-regiment Merkle commitment trees
//!
//! Owns the lifecycle of one append-only Merkle tree per regiment: space
//! creation, leaf insertion with incremental root maintenance, and inclusion
//! proof generation/verification. Authorization decisions are delegated to
//! the registry through its read-only [`muster_registry::RegimentAccess`]
//! seam; this crate never mutates registry state.

#![forbid(unsafe_code)]

mod proof;
mod space;
mod tree;

pub use proof::{verify_proof, MerkleProof, ProofDefect};
pub use space::{MerkleSpace, Space};
pub use tree::{CommitmentTree, EMPTY_ROOT, MAX_TREE_DEPTH};
