//! Registry configuration
//!
//! All numeric ceilings are fixed at construction and immutable thereafter.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Immutable limits the registry enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum members a single regiment may hold.
    pub member_join_limit: u32,
    /// Maximum number of regiments the registry will ever create.
    pub regiment_limit: u32,
    /// Maximum admins a single regiment may hold.
    pub maximum_admins_count: u32,
}

impl RegistryConfig {
    /// Build a validated configuration. Every ceiling must be non-zero.
    pub fn new(
        member_join_limit: u32,
        regiment_limit: u32,
        maximum_admins_count: u32,
    ) -> Result<Self> {
        let config = Self {
            member_join_limit,
            regiment_limit,
            maximum_admins_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the ceilings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.member_join_limit == 0 {
            return Err(Error::invalid_config("member_join_limit must be non-zero"));
        }
        if self.regiment_limit == 0 {
            return Err(Error::invalid_config("regiment_limit must be non-zero"));
        }
        if self.maximum_admins_count == 0 {
            return Err(Error::invalid_config(
                "maximum_admins_count must be non-zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_are_rejected() {
        assert!(RegistryConfig::new(0, 20, 5).is_err());
        assert!(RegistryConfig::new(10, 0, 5).is_err());
        assert!(RegistryConfig::new(10, 20, 0).is_err());
        assert!(RegistryConfig::new(10, 20, 5).is_ok());
    }
}
