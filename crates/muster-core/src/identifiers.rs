//! Core identifier types for the registry and commitment service
//!
//! Identities arrive from the host's caller-identification layer and are
//! treated as opaque, unforgeable values; regiment identifiers are derived
//! hashes and are never random.

use crate::hash::hasher;
use crate::Hash32;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque caller identity.
///
/// Supplied by the surrounding system for every operation (analogous to a
/// signed request's sender). The core trusts it completely and never tries
/// to re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityId(pub [u8; 32]);

impl IdentityId {
    /// Construct from raw identity material.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Deterministic identity from a small seed.
    ///
    /// Intended for tests and examples where distinct, reproducible
    /// identities are needed.
    pub fn from_seed(seed: u8) -> Self {
        Self([seed; 32])
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identity-{}", &hex::encode(self.0)[..16])
    }
}

impl From<[u8; 32]> for IdentityId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Regiment identifier: a 32-byte derived hash.
///
/// Derived from the manager identity, the creation time, and a monotonic
/// nonce, so two creations with identical inputs in the same instant still
/// receive distinct identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegimentId(pub Hash32);

/// Domain separator for regiment id derivation.
const REGIMENT_ID_DOMAIN: &[u8] = b"muster.regiment-id.v1";

impl RegimentId {
    /// Derive the identifier for a regiment created by `manager` at
    /// `creation_time` with the registry's `nonce` at that moment.
    pub fn derive(manager: &IdentityId, creation_time: u64, nonce: u64) -> Self {
        let mut h = hasher();
        h.update(REGIMENT_ID_DOMAIN);
        h.update(manager.as_bytes());
        h.update(&creation_time.to_be_bytes());
        h.update(&nonce.to_be_bytes());
        Self(h.finalize())
    }

    /// The underlying digest.
    pub fn digest(&self) -> Hash32 {
        self.0
    }
}

impl fmt::Display for RegimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regiment-{}", &self.0.to_hex()[..16])
    }
}
