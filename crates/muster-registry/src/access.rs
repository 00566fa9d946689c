//! Read-only authorization seam consumed by the space crate
//!
//! The commitment-space component authorizes its operations against the
//! registry but must never mutate it. It depends on this trait instead of
//! the registry type so the relationship stays one-way and read-only.

use muster_core::{IdentityId, RegimentId};

/// Read-only regiment lookups for cross-component authorization.
pub trait RegimentAccess {
    /// Whether the regiment has been created.
    fn regiment_exists(&self, regiment_id: &RegimentId) -> bool;

    /// Whether `identity` is the regiment's manager or a granted admin.
    ///
    /// Returns `false` for unknown regiments; existence is checked
    /// separately so callers can distinguish `NotFound` from
    /// `Unauthorized`.
    fn is_operator(&self, regiment_id: &RegimentId, identity: &IdentityId) -> bool;
}
