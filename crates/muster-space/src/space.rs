//! Commitment spaces keyed by regiment
//!
//! One Merkle tree per regiment, bound 1:1 to its `RegimentId`. The space
//! component authorizes every mutation against the registry through the
//! read-only [`RegimentAccess`] seam and never mutates registry state.

use crate::proof::MerkleProof;
use crate::tree::CommitmentTree;
use muster_core::{Error, Hash32, IdentityId, RegimentId, Result};
use muster_events::{Event, EventSink};
use muster_registry::RegimentAccess;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One regiment's append-only commitment tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    tree: CommitmentTree,
}

impl Space {
    /// Current root hash.
    pub fn root(&self) -> Hash32 {
        self.tree.root()
    }

    /// Number of committed leaves.
    pub fn leaf_count(&self) -> u64 {
        self.tree.leaf_count()
    }
}

/// Owner of all commitment spaces.
///
/// Spaces are created at most once per regiment and never destroyed.
#[derive(Debug, Default)]
pub struct MerkleSpace {
    spaces: BTreeMap<RegimentId, Space>,
}

impl MerkleSpace {
    /// Create an empty space store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorize `caller` as an operator of `regiment_id`, distinguishing
    /// unknown regiments from insufficient rights.
    fn authorize(
        registry: &dyn RegimentAccess,
        regiment_id: RegimentId,
        caller: IdentityId,
    ) -> Result<()> {
        if !registry.regiment_exists(&regiment_id) {
            return Err(Error::not_found(regiment_id));
        }
        if !registry.is_operator(&regiment_id, &caller) {
            return Err(Error::unauthorized(regiment_id, caller));
        }
        Ok(())
    }

    /// Initialize the space for a regiment.
    ///
    /// Requires the regiment to exist and `caller` to be its manager or an
    /// admin. Repeat creation is a hard `AlreadyExists` failure, never a
    /// silent no-op, so callers cannot be confused about which creation won.
    pub fn create_space(
        &mut self,
        sink: &mut dyn EventSink,
        registry: &dyn RegimentAccess,
        regiment_id: RegimentId,
        caller: IdentityId,
    ) -> Result<()> {
        Self::authorize(registry, regiment_id, caller)?;
        if self.spaces.contains_key(&regiment_id) {
            return Err(Error::already_exists(regiment_id));
        }

        self.spaces.insert(regiment_id, Space::default());
        debug!(%regiment_id, creator = %caller, "space created");
        sink.emit(Event::SpaceCreated {
            regiment_id,
            creator: caller,
        });
        Ok(())
    }

    /// Commit a value into a regiment's space, returning the zero-based
    /// index assigned to the new leaf.
    pub fn insert_leaf(
        &mut self,
        sink: &mut dyn EventSink,
        registry: &dyn RegimentAccess,
        regiment_id: RegimentId,
        value: &[u8],
        caller: IdentityId,
    ) -> Result<u64> {
        Self::authorize(registry, regiment_id, caller)?;
        let space = self
            .spaces
            .get_mut(&regiment_id)
            .ok_or_else(|| Error::not_found(regiment_id))?;

        let leaf_index = space.tree.insert(value);
        let root = space.tree.root();
        let leaf_hash = crate::tree::leaf_hash(value);
        debug!(%regiment_id, leaf_index, %root, "leaf inserted");
        sink.emit(Event::LeafInserted {
            regiment_id,
            leaf_index,
            leaf_hash,
            root,
        });
        Ok(leaf_index)
    }

    /// Current root of a regiment's space.
    pub fn root(&self, regiment_id: RegimentId) -> Result<Hash32> {
        self.space(regiment_id).map(Space::root)
    }

    /// Leaf count of a regiment's space.
    pub fn leaf_count(&self, regiment_id: RegimentId) -> Result<u64> {
        self.space(regiment_id).map(Space::leaf_count)
    }

    /// Inclusion proof for leaf `leaf_index` in a regiment's space.
    pub fn proof(&self, regiment_id: RegimentId, leaf_index: u64) -> Result<MerkleProof> {
        let space = self.space(regiment_id)?;
        let siblings = space.tree.proof_path(leaf_index)?;
        Ok(MerkleProof {
            siblings,
            leaf_index,
            leaf_count: space.tree.leaf_count(),
        })
    }

    fn space(&self, regiment_id: RegimentId) -> Result<&Space> {
        self.spaces
            .get(&regiment_id)
            .ok_or_else(|| Error::not_found(regiment_id))
    }
}
