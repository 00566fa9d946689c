//! Append-only audit event log for Muster
//!
//! Every state-changing operation in the registry and space crates appends
//! exactly one structured record here, in the order the operations are
//! serialized. The log is the sole durable audit trail: external observers
//! (dashboards, indexers) reconstruct state by replaying it from a sequence
//! number of their choosing.
//!
//! Observers read the log after the fact; nothing here sits inline in a core
//! operation, so an observer can never block or fail one.

#![forbid(unsafe_code)]

use muster_core::{Hash32, IdentityId, RegimentId};
use serde::{Deserialize, Serialize};

/// A structured record of one state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A regiment was created.
    RegimentCreated {
        /// Identifier derived for the new regiment.
        regiment_id: RegimentId,
        /// Unix seconds at creation.
        creation_time: u64,
        /// Designated manager.
        manager: IdentityId,
        /// Founding membership, in the order supplied by the caller.
        initial_member_list: Vec<IdentityId>,
    },
    /// Admins were granted on a regiment.
    AdminsAdded {
        /// Target regiment.
        regiment_id: RegimentId,
        /// Identities granted admin rights (already-present entries included).
        new_admins: Vec<IdentityId>,
        /// The identity that performed the grant.
        origin_sender: IdentityId,
    },
    /// A join request was queued for approval.
    JoinRequested {
        /// Target regiment.
        regiment_id: RegimentId,
        /// Identity awaiting approval.
        candidate: IdentityId,
    },
    /// An identity became a member.
    MemberJoined {
        /// Target regiment.
        regiment_id: RegimentId,
        /// The new member.
        member: IdentityId,
    },
    /// A pending join request was approved.
    JoinApproved {
        /// Target regiment.
        regiment_id: RegimentId,
        /// The admitted identity.
        candidate: IdentityId,
        /// Manager or admin who approved.
        approver: IdentityId,
    },
    /// A member left (or withdrew a pending request from) a regiment.
    MemberLeft {
        /// Target regiment.
        regiment_id: RegimentId,
        /// The departed identity.
        member: IdentityId,
    },
    /// A commitment space was initialized for a regiment.
    SpaceCreated {
        /// Owning regiment.
        regiment_id: RegimentId,
        /// Manager or admin who created the space.
        creator: IdentityId,
    },
    /// A leaf was committed into a regiment's space.
    LeafInserted {
        /// Owning regiment.
        regiment_id: RegimentId,
        /// Zero-based index assigned to the leaf.
        leaf_index: u64,
        /// Committed leaf hash.
        leaf_hash: Hash32,
        /// Tree root after the insertion.
        root: Hash32,
    },
}

impl Event {
    /// The regiment this record concerns.
    pub fn regiment_id(&self) -> RegimentId {
        match self {
            Event::RegimentCreated { regiment_id, .. }
            | Event::AdminsAdded { regiment_id, .. }
            | Event::JoinRequested { regiment_id, .. }
            | Event::MemberJoined { regiment_id, .. }
            | Event::JoinApproved { regiment_id, .. }
            | Event::MemberLeft { regiment_id, .. }
            | Event::SpaceCreated { regiment_id, .. }
            | Event::LeafInserted { regiment_id, .. } => *regiment_id,
        }
    }

    /// Stable operation name for audit rendering.
    pub fn name(&self) -> &'static str {
        match self {
            Event::RegimentCreated { .. } => "regiment_created",
            Event::AdminsAdded { .. } => "admins_added",
            Event::JoinRequested { .. } => "join_requested",
            Event::MemberJoined { .. } => "member_joined",
            Event::JoinApproved { .. } => "join_approved",
            Event::MemberLeft { .. } => "member_left",
            Event::SpaceCreated { .. } => "space_created",
            Event::LeafInserted { .. } => "leaf_inserted",
        }
    }
}

/// Destination for audit records emitted by state-changing operations.
///
/// The core writes through this trait so the transactional boundary stays
/// decoupled from whatever the host does with the records. Emission must be
/// infallible: a sink can never reject or fail a core operation.
pub trait EventSink {
    /// Record one event.
    fn emit(&mut self, event: Event);
}

impl EventSink for EventLog {
    fn emit(&mut self, event: Event) {
        self.append(event);
    }
}

/// Sink that discards everything, for callers that do not audit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

/// An event stamped with its position in the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Zero-based, gap-free sequence number.
    pub seq: u64,
    /// The recorded operation.
    pub event: Event,
}

/// Append-only log of sequenced events.
///
/// Appending never fails; sequence numbers are assigned monotonically in
/// append order and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<SequencedEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its assigned sequence number.
    pub fn append(&mut self, event: Event) -> u64 {
        let seq = self.entries.len() as u64;
        self.entries.push(SequencedEvent { seq, event });
        seq
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All events at or after `seq`, for observer replay.
    pub fn events_since(&self, seq: u64) -> &[SequencedEvent] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }

    /// The most recently appended event, if any.
    pub fn latest(&self) -> Option<&SequencedEvent> {
        self.entries.last()
    }

    /// Iterate the full log in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = &SequencedEvent> {
        self.entries.iter()
    }
}
