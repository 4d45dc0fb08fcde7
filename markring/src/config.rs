//! Buffer configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default ring capacity in units.
pub const DEFAULT_CAPACITY: usize = 1024;

/// What a producer does when the ring has no room for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Wait until the consumer frees space.
    #[default]
    Blocking,
    /// Reject the write with [`Error::Overflow`], writing nothing.
    Overflow,
}

impl Policy {
    /// Maps the `blocking` flag of [`CircularBuffer::new`](crate::CircularBuffer::new).
    pub fn from_blocking(blocking: bool) -> Self {
        if blocking {
            Policy::Blocking
        } else {
            Policy::Overflow
        }
    }

    /// Returns true for [`Policy::Blocking`].
    pub fn is_blocking(self) -> bool {
        self == Policy::Blocking
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Blocking => write!(f, "blocking"),
            Policy::Overflow => write!(f, "overflow"),
        }
    }
}

/// Configuration for a [`CircularBuffer`](crate::CircularBuffer).
///
/// One slot of the ring is always kept free, so a buffer of capacity `N`
/// holds at most `N - 1` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ring length in units.
    pub capacity: usize,
    /// Backpressure policy.
    pub policy: Policy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: Policy::Blocking,
        }
    }
}

impl Config {
    /// Create a new blocking config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the backpressure policy.
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for choosing between [`Policy::Blocking`] and
    /// [`Policy::Overflow`].
    pub fn blocking(self, blocking: bool) -> Self {
        self.policy(Policy::from_blocking(blocking))
    }

    /// Checks that the config describes a usable ring.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig(
                "capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let cfg = Config::default();
        assert_eq!(cfg.capacity, 1024);
        assert_eq!(cfg.policy, Policy::Blocking);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let cfg = Config::new(16).blocking(false);
        assert_eq!(cfg.capacity, 16);
        assert_eq!(cfg.policy, Policy::Overflow);
        assert!(!cfg.policy.is_blocking());

        let cfg = cfg.policy(Policy::Blocking);
        assert!(cfg.policy.is_blocking());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let err = Config::new(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: Config = serde_json::from_str(r#"{"policy": "overflow"}"#).unwrap();
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
        assert_eq!(cfg.policy, Policy::Overflow);

        let cfg: Config = serde_json::from_str(r#"{"capacity": 8}"#).unwrap();
        assert_eq!(cfg, Config::new(8));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&Config::new(4).blocking(false)).unwrap();
        assert_eq!(json, r#"{"capacity":4,"policy":"overflow"}"#);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(Policy::Blocking.to_string(), "blocking");
        assert_eq!(Policy::Overflow.to_string(), "overflow");
    }
}
