//! Muster core - shared plumbing for the group registry and commitment service
//!
//! This crate provides the foundational types the registry and space crates
//! build on: identifier newtypes, the pinned commitment hash, the unified
//! error taxonomy, the clock abstraction, and registry configuration. It
//! contains no registry or tree logic.

#![forbid(unsafe_code)]

/// 32-byte digest newtype.
mod digest;

/// Unified error handling.
mod error;

/// Caller and regiment identifiers.
pub mod identifiers;

/// Pinned synchronous hash for commitments and id derivation.
pub mod hash;

/// Clock abstraction for deterministic time under test.
pub mod time;

/// Immutable registry limits.
mod config;

pub use config::RegistryConfig;
pub use digest::Hash32;
pub use error::{Error, LimitKind, Result};
pub use identifiers::{IdentityId, RegimentId};
pub use time::{Clock, FixedClock, SystemClock};
