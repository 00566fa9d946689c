//! Unified error taxonomy for all Muster operations
//!
//! Every failure is synchronous and local to the call that triggered it: no
//! operation partially applies before failing, and nothing is retried by the
//! core. Variants carry enough context (the limit that was hit, the regiment
//! involved) for callers to decide corrective action without a follow-up
//! inspection query.

use crate::{IdentityId, RegimentId};
use serde::{Deserialize, Serialize};

/// Which configured ceiling a rejected operation would have breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitKind {
    /// Process-wide regiment count ceiling.
    Regiments,
    /// Per-regiment member count ceiling.
    Members,
    /// Per-regiment admin count ceiling.
    Admins,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitKind::Regiments => write!(f, "regiments"),
            LimitKind::Members => write!(f, "members"),
            LimitKind::Admins => write!(f, "admins"),
        }
    }
}

/// Unified error type for registry and space operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Referenced regiment or space does not exist.
    #[error("not found: {regiment}")]
    NotFound {
        /// The regiment (or space key) that was looked up.
        regiment: RegimentId,
    },

    /// Caller lacks the required role for the target regiment.
    #[error("unauthorized: {caller} for {regiment}")]
    Unauthorized {
        /// The regiment the operation targeted.
        regiment: RegimentId,
        /// The identity that lacked authority.
        caller: IdentityId,
    },

    /// A configured numeric ceiling would be breached.
    #[error("limit exceeded: {kind} capped at {limit}, attempted {attempted}")]
    LimitExceeded {
        /// Which ceiling was hit.
        kind: LimitKind,
        /// The configured ceiling.
        limit: u32,
        /// The size the operation would have produced.
        attempted: u64,
    },

    /// Space creation repeated for the same regiment.
    #[error("space already exists for {regiment}")]
    AlreadyExists {
        /// The regiment whose space already exists.
        regiment: RegimentId,
    },

    /// Proof requested for a leaf index beyond the current leaf count.
    #[error("leaf index {index} out of range for {len} leaves")]
    IndexOutOfRange {
        /// The requested leaf index.
        index: u64,
        /// The current leaf count.
        len: u64,
    },

    /// Construction-time configuration was rejected.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },
}

impl Error {
    /// Unknown regiment or space.
    pub fn not_found(regiment: RegimentId) -> Self {
        Self::NotFound { regiment }
    }

    /// Caller lacks the required role.
    pub fn unauthorized(regiment: RegimentId, caller: IdentityId) -> Self {
        Self::Unauthorized { regiment, caller }
    }

    /// A numeric ceiling would be breached.
    pub fn limit_exceeded(kind: LimitKind, limit: u32, attempted: u64) -> Self {
        Self::LimitExceeded {
            kind,
            limit,
            attempted,
        }
    }

    /// Repeated space creation.
    pub fn already_exists(regiment: RegimentId) -> Self {
        Self::AlreadyExists { regiment }
    }

    /// Leaf index past the end of the tree.
    pub fn index_out_of_range(index: u64, len: u64) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Rejected construction-time configuration.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
