//! Regiment registry state machine
//!
//! All mutating operations run as discrete serialized transactions supplied
//! by the hosting environment; the registry itself holds no locks. Every
//! precondition is checked against current state at the call's serialization
//! point before any mutation, so a rejected operation leaves prior state
//! untouched and racing creations can never overshoot the regiment limit.

use crate::access::RegimentAccess;
use crate::regiment::{JoinOutcome, Regiment, RegimentInfo};
use muster_core::{
    Clock, Error, IdentityId, LimitKind, RegimentId, RegistryConfig, Result, SystemClock,
};
use muster_events::{Event, EventSink};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info};

/// Owner of all regiment records.
pub struct RegimentRegistry {
    config: RegistryConfig,
    controller: IdentityId,
    clock: Box<dyn Clock>,
    regiments: BTreeMap<RegimentId, Regiment>,
    total_regiments_created: u64,
    // Mixed into id derivation so identical inputs within one clock second
    // still produce distinct identifiers.
    creation_nonce: u64,
}

impl fmt::Debug for RegimentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegimentRegistry")
            .field("config", &self.config)
            .field("controller", &self.controller)
            .field("regiments", &self.regiments.len())
            .field("total_regiments_created", &self.total_regiments_created)
            .finish_non_exhaustive()
    }
}

impl RegimentRegistry {
    /// Create a registry with the given limits, rooted at `controller`
    /// (the constructing identity), reading time from the system clock.
    pub fn new(config: RegistryConfig, controller: IdentityId) -> Result<Self> {
        Self::with_clock(config, controller, SystemClock)
    }

    /// Create a registry with an explicit clock. Tests use this with a
    /// fixed clock to get reproducible regiment identifiers.
    pub fn with_clock(
        config: RegistryConfig,
        controller: IdentityId,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            controller,
            clock: Box::new(clock),
            regiments: BTreeMap::new(),
            total_regiments_created: 0,
            creation_nonce: 0,
        })
    }

    /// The configured limits.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The root-of-trust identity fixed at construction.
    pub fn controller(&self) -> IdentityId {
        self.controller
    }

    /// How many regiments have ever been created.
    pub fn total_regiments_created(&self) -> u64 {
        self.total_regiments_created
    }

    /// Found a new regiment.
    ///
    /// Creation is open: any identity may found a group, so no caller check
    /// applies. Fails with `LimitExceeded` if the process-wide regiment
    /// ceiling is reached or the initial member list is larger than the
    /// per-regiment member ceiling.
    pub fn create_regiment(
        &mut self,
        sink: &mut dyn EventSink,
        manager: IdentityId,
        initial_member_list: &[IdentityId],
        is_approve_to_join: bool,
    ) -> Result<RegimentId> {
        if self.total_regiments_created >= u64::from(self.config.regiment_limit) {
            return Err(Error::limit_exceeded(
                LimitKind::Regiments,
                self.config.regiment_limit,
                self.total_regiments_created + 1,
            ));
        }
        if initial_member_list.len() as u64 > u64::from(self.config.member_join_limit) {
            return Err(Error::limit_exceeded(
                LimitKind::Members,
                self.config.member_join_limit,
                initial_member_list.len() as u64,
            ));
        }

        let creation_time = self.clock.unix_time();
        let regiment_id = RegimentId::derive(&manager, creation_time, self.creation_nonce);
        debug_assert!(
            !self.regiments.contains_key(&regiment_id),
            "nonce guarantees fresh ids"
        );

        self.regiments.insert(
            regiment_id,
            Regiment {
                creation_time,
                manager,
                admins: BTreeSet::new(),
                members: initial_member_list.iter().copied().collect(),
                pending_joins: BTreeSet::new(),
                is_approve_to_join,
            },
        );
        self.creation_nonce += 1;
        self.total_regiments_created += 1;

        info!(%regiment_id, %manager, members = initial_member_list.len(), "regiment created");
        sink.emit(Event::RegimentCreated {
            regiment_id,
            creation_time,
            manager,
            initial_member_list: initial_member_list.to_vec(),
        });
        Ok(regiment_id)
    }

    /// Grant admin rights on a regiment.
    ///
    /// `origin_sender` is an identity claim from the caller's interface and
    /// is validated here, never merely logged: only the regiment's manager
    /// or an existing admin may grant admin rights. Hosts that authenticate
    /// callers should pass the authenticated identity.
    ///
    /// Adding an already-present admin is a no-op under set semantics; the
    /// admin ceiling is checked against the union, so re-adding existing
    /// admins never trips it.
    pub fn add_admins(
        &mut self,
        sink: &mut dyn EventSink,
        regiment_id: RegimentId,
        new_admins: &[IdentityId],
        origin_sender: IdentityId,
    ) -> Result<()> {
        let regiment = self
            .regiments
            .get(&regiment_id)
            .ok_or_else(|| Error::not_found(regiment_id))?;
        if !regiment.is_operator(&origin_sender) {
            return Err(Error::unauthorized(regiment_id, origin_sender));
        }

        let mut union = regiment.admins.clone();
        union.extend(new_admins.iter().copied());
        if union.len() as u64 > u64::from(self.config.maximum_admins_count) {
            return Err(Error::limit_exceeded(
                LimitKind::Admins,
                self.config.maximum_admins_count,
                union.len() as u64,
            ));
        }

        // Checks passed; commit.
        if let Some(regiment) = self.regiments.get_mut(&regiment_id) {
            regiment.admins = union;
        }
        debug!(%regiment_id, added = new_admins.len(), "admins granted");
        sink.emit(Event::AdminsAdded {
            regiment_id,
            new_admins: new_admins.to_vec(),
            origin_sender,
        });
        Ok(())
    }

    /// Snapshot a regiment's record.
    pub fn regiment_info(&self, regiment_id: RegimentId) -> Result<RegimentInfo> {
        self.regiments
            .get(&regiment_id)
            .map(RegimentInfo::from)
            .ok_or_else(|| Error::not_found(regiment_id))
    }

    /// Ask to join a regiment.
    ///
    /// Joining an open regiment admits the caller immediately, subject to
    /// the member ceiling. Joining an approval-gated regiment queues the
    /// request until a manager or admin approves it; the ceiling is checked
    /// at approval time, the admission's serialization point. Both paths are
    /// idempotent for callers already admitted or already queued.
    pub fn request_join(
        &mut self,
        sink: &mut dyn EventSink,
        regiment_id: RegimentId,
        caller: IdentityId,
    ) -> Result<JoinOutcome> {
        let regiment = self
            .regiments
            .get(&regiment_id)
            .ok_or_else(|| Error::not_found(regiment_id))?;

        if regiment.is_member(&caller) {
            return Ok(JoinOutcome::Joined);
        }

        if regiment.is_approve_to_join {
            if let Some(regiment) = self.regiments.get_mut(&regiment_id) {
                if regiment.pending_joins.insert(caller) {
                    debug!(%regiment_id, candidate = %caller, "join queued");
                    sink.emit(Event::JoinRequested {
                        regiment_id,
                        candidate: caller,
                    });
                }
            }
            return Ok(JoinOutcome::Pending);
        }

        let attempted = regiment.members.len() as u64 + 1;
        if attempted > u64::from(self.config.member_join_limit) {
            return Err(Error::limit_exceeded(
                LimitKind::Members,
                self.config.member_join_limit,
                attempted,
            ));
        }
        if let Some(regiment) = self.regiments.get_mut(&regiment_id) {
            regiment.members.insert(caller);
        }
        debug!(%regiment_id, member = %caller, "member joined");
        sink.emit(Event::MemberJoined {
            regiment_id,
            member: caller,
        });
        Ok(JoinOutcome::Joined)
    }

    /// Approve a queued join request.
    ///
    /// Only the manager or an admin may approve. An unknown candidate (no
    /// pending request) is `NotFound`: the pending entry is the referenced
    /// resource.
    pub fn approve_join(
        &mut self,
        sink: &mut dyn EventSink,
        regiment_id: RegimentId,
        candidate: IdentityId,
        caller: IdentityId,
    ) -> Result<()> {
        let regiment = self
            .regiments
            .get(&regiment_id)
            .ok_or_else(|| Error::not_found(regiment_id))?;
        if !regiment.is_operator(&caller) {
            return Err(Error::unauthorized(regiment_id, caller));
        }
        if !regiment.pending_joins.contains(&candidate) {
            return Err(Error::not_found(regiment_id));
        }
        let attempted = regiment.members.len() as u64 + 1;
        if attempted > u64::from(self.config.member_join_limit) {
            // Request stays queued; the caller may retry after departures.
            return Err(Error::limit_exceeded(
                LimitKind::Members,
                self.config.member_join_limit,
                attempted,
            ));
        }

        if let Some(regiment) = self.regiments.get_mut(&regiment_id) {
            regiment.pending_joins.remove(&candidate);
            regiment.members.insert(candidate);
        }
        debug!(%regiment_id, candidate = %candidate, approver = %caller, "join approved");
        sink.emit(Event::JoinApproved {
            regiment_id,
            candidate,
            approver: caller,
        });
        Ok(())
    }

    /// Leave a regiment, or withdraw a pending join request.
    ///
    /// The manager cannot leave: a regiment always has a manager.
    pub fn leave_regiment(
        &mut self,
        sink: &mut dyn EventSink,
        regiment_id: RegimentId,
        caller: IdentityId,
    ) -> Result<()> {
        let regiment = self
            .regiments
            .get(&regiment_id)
            .ok_or_else(|| Error::not_found(regiment_id))?;
        if regiment.manager == caller {
            return Err(Error::unauthorized(regiment_id, caller));
        }
        if !regiment.is_member(&caller) && !regiment.pending_joins.contains(&caller) {
            return Err(Error::not_found(regiment_id));
        }

        if let Some(regiment) = self.regiments.get_mut(&regiment_id) {
            regiment.members.remove(&caller);
            regiment.pending_joins.remove(&caller);
        }
        debug!(%regiment_id, member = %caller, "member left");
        sink.emit(Event::MemberLeft {
            regiment_id,
            member: caller,
        });
        Ok(())
    }
}

impl RegimentAccess for RegimentRegistry {
    fn regiment_exists(&self, regiment_id: &RegimentId) -> bool {
        self.regiments.contains_key(regiment_id)
    }

    fn is_operator(&self, regiment_id: &RegimentId, identity: &IdentityId) -> bool {
        self.regiments
            .get(regiment_id)
            .is_some_and(|regiment| regiment.is_operator(identity))
    }
}
