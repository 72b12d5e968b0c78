//! Run-level configuration.
//!
//! Two flags change how a run is played regardless of the variant:
//!
//! - `duplicate_clause`: species whose evolution line was already caught are
//!   no longer offered as encounters.
//! - `randomized`: the game's wild data is shuffled, so every pool species
//!   may appear on any route and every base species is a valid starter.
//!
//! Variant-specific configuration lives in [`LockeConfig`](crate::rules::LockeConfig).

use serde::{Deserialize, Serialize};

/// Maximum number of creatures in a party.
pub const PARTY_SIZE: usize = 6;

/// Flags fixed at run creation and consulted by the run manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Skip encounters with species from an already-caught evolution line.
    pub duplicate_clause: bool,

    /// The game's wild encounters and starters are randomized.
    pub randomized: bool,
}

impl RunSettings {
    /// Create settings with both flags off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the duplicate clause.
    #[must_use]
    pub fn with_duplicate_clause(mut self, enabled: bool) -> Self {
        self.duplicate_clause = enabled;
        self
    }

    /// Builder: set the randomized flag.
    #[must_use]
    pub fn with_randomized(mut self, enabled: bool) -> Self {
        self.randomized = enabled;
        self
    }
}
