//! Regiment records and read views

use muster_core::IdentityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A registered group.
///
/// The manager is implicitly authorized as if an admin even when absent from
/// the admin set. Regiments are never deleted; once created a record persists
/// for the life of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regiment {
    /// Unix seconds at creation.
    pub creation_time: u64,
    /// The single managing identity.
    pub manager: IdentityId,
    /// Granted admins, bounded by `maximum_admins_count`.
    pub admins: BTreeSet<IdentityId>,
    /// Current members, bounded by `member_join_limit`.
    pub members: BTreeSet<IdentityId>,
    /// Join requests awaiting manager/admin approval.
    pub pending_joins: BTreeSet<IdentityId>,
    /// Whether joining requires explicit approval.
    pub is_approve_to_join: bool,
}

impl Regiment {
    /// True iff `identity` is the manager or a granted admin.
    pub fn is_operator(&self, identity: &IdentityId) -> bool {
        self.manager == *identity || self.admins.contains(identity)
    }

    /// True iff `identity` is a current member.
    pub fn is_member(&self, identity: &IdentityId) -> bool {
        self.members.contains(identity)
    }
}

/// Immutable snapshot of a regiment returned by info queries.
///
/// Collections are materialized in their stable set order so repeated reads
/// of unchanged state compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimentInfo {
    /// Unix seconds at creation.
    pub creation_time: u64,
    /// The managing identity.
    pub manager: IdentityId,
    /// Granted admins.
    pub admins: Vec<IdentityId>,
    /// Current members.
    pub members: Vec<IdentityId>,
    /// Join-approval policy flag.
    pub is_approve_to_join: bool,
}

impl From<&Regiment> for RegimentInfo {
    fn from(regiment: &Regiment) -> Self {
        Self {
            creation_time: regiment.creation_time,
            manager: regiment.manager,
            admins: regiment.admins.iter().copied().collect(),
            members: regiment.members.iter().copied().collect(),
            is_approve_to_join: regiment.is_approve_to_join,
        }
    }
}

/// Result of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOutcome {
    /// The caller is now (or already was) a member.
    Joined,
    /// The request is queued until a manager or admin approves it.
    Pending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_is_operator_without_admin_entry() {
        let manager = IdentityId::from_seed(1);
        let regiment = Regiment {
            creation_time: 0,
            manager,
            admins: BTreeSet::new(),
            members: BTreeSet::new(),
            pending_joins: BTreeSet::new(),
            is_approve_to_join: false,
        };
        assert!(regiment.is_operator(&manager));
        assert!(!regiment.is_operator(&IdentityId::from_seed(2)));
    }
}
