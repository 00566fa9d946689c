//! Integration tests for commitment spaces against a live registry

#![allow(clippy::expect_used)]

use muster_core::{Error, FixedClock, IdentityId, RegimentId, RegistryConfig};
use muster_events::{Event, EventLog};
use muster_registry::RegimentRegistry;
use muster_space::{verify_proof, MerkleSpace, EMPTY_ROOT};

fn identity(seed: u8) -> IdentityId {
    IdentityId::from_seed(seed)
}

/// Registry with one regiment: manager A (seed 1), initial members [A].
fn fixture() -> (RegimentRegistry, MerkleSpace, EventLog, RegimentId) {
    let config = RegistryConfig::new(10, 20, 5).expect("valid config");
    let mut registry =
        RegimentRegistry::with_clock(config, identity(0), FixedClock::new(1_700_000_000))
            .expect("valid registry");
    let mut log = EventLog::new();
    let regiment_id = registry
        .create_regiment(&mut log, identity(1), &[identity(1)], false)
        .expect("create regiment");
    (registry, MerkleSpace::new(), log, regiment_id)
}

#[test]
fn create_space_requires_a_known_regiment() {
    let (registry, mut spaces, mut log, _) = fixture();
    let unknown = RegimentId::derive(&identity(42), 0, 0);
    let err = spaces
        .create_space(&mut log, &registry, unknown, identity(1))
        .expect_err("unknown regiment");
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn create_space_succeeds_exactly_once() {
    let (registry, mut spaces, mut log, regiment_id) = fixture();
    spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect("first creation");
    assert_eq!(spaces.root(regiment_id).expect("root"), EMPTY_ROOT);
    assert_eq!(spaces.leaf_count(regiment_id).expect("count"), 0);

    let err = spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect_err("second creation");
    assert!(matches!(err, Error::AlreadyExists { .. }));
}

#[test]
fn manager_admin_and_stranger_authorization() {
    let (mut registry, mut spaces, mut log, regiment_id) = fixture();
    let manager = identity(1);
    let admin = identity(2);
    let stranger = identity(3);
    registry
        .add_admins(&mut log, regiment_id, &[admin], manager)
        .expect("grant admin");
    assert_eq!(
        registry.regiment_info(regiment_id).expect("info").admins,
        vec![admin]
    );

    // An unrelated identity cannot create the space; the admin can.
    let err = spaces
        .create_space(&mut log, &registry, regiment_id, stranger)
        .expect_err("stranger");
    assert!(matches!(err, Error::Unauthorized { .. }));
    spaces
        .create_space(&mut log, &registry, regiment_id, admin)
        .expect("admin creates");

    // Insertion follows the same rule.
    let err = spaces
        .insert_leaf(&mut log, &registry, regiment_id, b"L0", stranger)
        .expect_err("stranger insert");
    assert!(matches!(err, Error::Unauthorized { .. }));
    spaces
        .insert_leaf(&mut log, &registry, regiment_id, b"L0", manager)
        .expect("manager inserts");
}

#[test]
fn insertion_grows_the_tree_and_moves_the_root() {
    let (registry, mut spaces, mut log, regiment_id) = fixture();
    spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect("create space");

    let mut roots = vec![spaces.root(regiment_id).expect("root")];
    for (expected_index, value) in [b"L0".as_slice(), b"L1", b"L2"].iter().enumerate() {
        let index = spaces
            .insert_leaf(&mut log, &registry, regiment_id, value, identity(1))
            .expect("insert");
        assert_eq!(index, expected_index as u64);
        let root = spaces.root(regiment_id).expect("root");
        assert!(!roots.contains(&root), "root must change on insertion");
        roots.push(root);
    }
    assert_eq!(spaces.leaf_count(regiment_id).expect("count"), 3);

    // Deterministic: a fresh space over the same sequence ends at the same root.
    let (registry2, mut spaces2, mut log2, regiment2) = fixture();
    spaces2
        .create_space(&mut log2, &registry2, regiment2, identity(1))
        .expect("create space");
    for value in [b"L0".as_slice(), b"L1", b"L2"] {
        spaces2
            .insert_leaf(&mut log2, &registry2, regiment2, value, identity(1))
            .expect("insert");
    }
    assert_eq!(
        spaces.root(regiment_id).expect("root"),
        spaces2.root(regiment2).expect("root")
    );
}

#[test]
fn every_leaf_proves_against_the_current_root() {
    let (registry, mut spaces, mut log, regiment_id) = fixture();
    spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect("create space");

    let values: Vec<Vec<u8>> = (0u32..7).map(|i| format!("leaf-{i}").into_bytes()).collect();
    for value in &values {
        spaces
            .insert_leaf(&mut log, &registry, regiment_id, value, identity(1))
            .expect("insert");
    }

    let root = spaces.root(regiment_id).expect("root");
    for (index, value) in values.iter().enumerate() {
        let proof = spaces.proof(regiment_id, index as u64).expect("proof");
        assert!(verify_proof(&root, value, index as u64, &proof));
    }
}

#[test]
fn tampering_with_value_or_siblings_breaks_verification() {
    let (registry, mut spaces, mut log, regiment_id) = fixture();
    spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect("create space");
    for value in [b"L0".as_slice(), b"L1", b"L2", b"L3", b"L4"] {
        spaces
            .insert_leaf(&mut log, &registry, regiment_id, value, identity(1))
            .expect("insert");
    }
    let root = spaces.root(regiment_id).expect("root");
    let proof = spaces.proof(regiment_id, 2).expect("proof");
    assert!(verify_proof(&root, b"L2", 2, &proof));

    // Flip one byte of the leaf value.
    assert!(!verify_proof(&root, b"L2\x00", 2, &proof));
    assert!(!verify_proof(&root, b"l2", 2, &proof));

    // Flip one byte in each sibling in turn.
    for position in 0..proof.siblings.len() {
        let mut tampered = proof.clone();
        tampered.siblings[position].0[0] ^= 0x01;
        assert!(
            !verify_proof(&root, b"L2", 2, &tampered),
            "sibling {position} tampering must fail"
        );
    }

    // A wrong index fails even with the right value and path.
    assert!(!verify_proof(&root, b"L2", 1, &proof));
}

#[test]
fn proof_for_an_index_past_the_end_is_rejected() {
    let (registry, mut spaces, mut log, regiment_id) = fixture();
    spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect("create space");
    spaces
        .insert_leaf(&mut log, &registry, regiment_id, b"L0", identity(1))
        .expect("insert");

    let err = spaces.proof(regiment_id, 1).expect_err("past the end");
    assert!(matches!(err, Error::IndexOutOfRange { index: 1, len: 1 }));
}

#[test]
fn reads_on_a_missing_space_are_not_found() {
    let (_, spaces, _, regiment_id) = fixture();
    assert!(matches!(
        spaces.root(regiment_id),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        spaces.proof(regiment_id, 0),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn insertion_emits_the_audit_record() {
    let (registry, mut spaces, mut log, regiment_id) = fixture();
    spaces
        .create_space(&mut log, &registry, regiment_id, identity(1))
        .expect("create space");
    spaces
        .insert_leaf(&mut log, &registry, regiment_id, b"L0", identity(1))
        .expect("insert");

    let recorded = log.latest().expect("latest event");
    match &recorded.event {
        Event::LeafInserted {
            regiment_id: event_regiment,
            leaf_index,
            root,
            ..
        } => {
            assert_eq!(*event_regiment, regiment_id);
            assert_eq!(*leaf_index, 0);
            assert_eq!(*root, spaces.root(regiment_id).expect("root"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
