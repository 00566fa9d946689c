//! Muster registry - permissioned group lifecycle
//!
//! Owns regiment records end to end: open creation with derived identifiers,
//! manager/admin authority, the approval-gated join workflow, and enforcement
//! of the configured regiment/member/admin ceilings. Exposes a read-only
//! [`RegimentAccess`] seam for the commitment-space component.

#![forbid(unsafe_code)]

mod access;
mod regiment;
mod registry;

pub use access::RegimentAccess;
pub use regiment::{JoinOutcome, Regiment, RegimentInfo};
pub use registry::RegimentRegistry;
