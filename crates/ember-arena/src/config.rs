//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an owned [`crate::Arena`].
///
/// Validated at construction; the arena never grows afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total arena size in bytes.
    ///
    /// Default: 65_536 (64KB). Must be non-zero.
    pub capacity: usize,

    /// Zero every region before handing it out.
    ///
    /// Owned arenas start zeroed, so this only matters for arenas built over
    /// caller storage that may hold stale bytes. Default: `true`.
    pub zero_fill: bool,
}

impl ArenaConfig {
    /// Default arena capacity: 64KB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Create a config for the given capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            zero_fill: true,
        }
    }

    /// Check the config for values the arena cannot honour.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "capacity must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
