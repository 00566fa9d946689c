//! Property tests for Merkle proof soundness
//!
//! For any leaf sequence: every leaf's proof verifies against the current
//! root, the incremental root matches a from-scratch recomputation, and any
//! single-byte corruption of the value or the sibling path is detected.

use muster_core::Hash32;
use muster_space::{verify_proof, CommitmentTree, MerkleProof};
use proptest::prelude::*;

fn arb_leaves() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 1..40)
}

fn build(leaves: &[Vec<u8>]) -> CommitmentTree {
    let mut tree = CommitmentTree::new();
    for leaf in leaves {
        tree.insert(leaf);
    }
    tree
}

fn proof_for(tree: &CommitmentTree, index: u64) -> MerkleProof {
    let siblings = tree.proof_path(index).unwrap_or_default();
    MerkleProof {
        siblings,
        leaf_index: index,
        leaf_count: tree.leaf_count(),
    }
}

proptest! {
    /// Every inserted leaf verifies against the root it was committed under.
    #[test]
    fn all_leaves_verify(leaves in arb_leaves()) {
        let tree = build(&leaves);
        let root = tree.root();
        for (index, value) in leaves.iter().enumerate() {
            let proof = proof_for(&tree, index as u64);
            prop_assert!(verify_proof(&root, value, index as u64, &proof));
        }
    }

    /// The incremental root equals a full recomputation over the leaf arena.
    #[test]
    fn incremental_root_is_exact(leaves in arb_leaves()) {
        let tree = build(&leaves);
        prop_assert_eq!(tree.root(), tree.recompute_root());
    }

    /// Corrupting one byte of the proven value breaks verification.
    #[test]
    fn corrupted_value_fails(
        leaves in arb_leaves(),
        pick in any::<prop::sample::Index>(),
        byte_pick in any::<prop::sample::Index>(),
    ) {
        let tree = build(&leaves);
        let root = tree.root();
        let index = pick.index(leaves.len());
        let proof = proof_for(&tree, index as u64);

        let mut corrupted = leaves[index].clone();
        if corrupted.is_empty() {
            corrupted.push(0x01);
        } else {
            let at = byte_pick.index(corrupted.len());
            corrupted[at] ^= 0x01;
        }
        prop_assert!(!verify_proof(&root, &corrupted, index as u64, &proof));
    }

    /// Corrupting any sibling hash breaks verification.
    #[test]
    fn corrupted_sibling_fails(
        leaves in arb_leaves(),
        pick in any::<prop::sample::Index>(),
        sibling_pick in any::<prop::sample::Index>(),
    ) {
        let tree = build(&leaves);
        let root = tree.root();
        let index = pick.index(leaves.len());
        let proof = proof_for(&tree, index as u64);
        prop_assume!(!proof.siblings.is_empty());

        let at = sibling_pick.index(proof.siblings.len());
        let mut tampered = proof.clone();
        let mut bytes = *tampered.siblings[at].as_bytes();
        bytes[0] ^= 0x01;
        tampered.siblings[at] = Hash32::from_bytes(bytes);
        prop_assert!(!verify_proof(&root, &leaves[index], index as u64, &tampered));
    }

    /// Roots are a pure function of the ordered leaf sequence.
    #[test]
    fn roots_are_deterministic(leaves in arb_leaves()) {
        prop_assert_eq!(build(&leaves).root(), build(&leaves).root());
    }
}
