//! Identifiers for runs and the creatures they own.
//!
//! ## ID Layout
//!
//! Creature IDs are allocated by the owning [`Run`](crate::run::Run) from a
//! monotonically increasing counter starting at 0. They are unique within a
//! run and never reused, even after the creature dies.
//!
//! Run IDs are opaque strings chosen when the run is created.
//!
//! ```
//! use locke_engine::core::CreatureId;
//!
//! let id = CreatureId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(CreatureId::parse_choice(&id.to_choice()), Some(id));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a creature owned by a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Create a new creature ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Render this ID the way it appears in a step's choice list.
    #[must_use]
    pub fn to_choice(self) -> String {
        self.0.to_string()
    }

    /// Parse a choice-list value back into an ID.
    #[must_use]
    pub fn parse_choice(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(Self)
    }
}

impl From<u32> for CreatureId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// Identifier of a run, unique within a persistence store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    /// Create a run ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_id_raw() {
        let id = CreatureId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(CreatureId::from(42), id);
    }

    #[test]
    fn test_creature_id_display() {
        assert_eq!(format!("{}", CreatureId(3)), "Creature(3)");
    }

    #[test]
    fn test_choice_roundtrip() {
        let id = CreatureId(12);
        assert_eq!(id.to_choice(), "12");
        assert_eq!(CreatureId::parse_choice(" 12 "), Some(id));
        assert_eq!(CreatureId::parse_choice("Creature(12)"), None);
        assert_eq!(CreatureId::parse_choice(""), None);
    }

    #[test]
    fn test_creature_id_ordering() {
        let mut ids = vec![CreatureId(5), CreatureId(1), CreatureId(3)];
        ids.sort();
        assert_eq!(ids, vec![CreatureId(1), CreatureId(3), CreatureId(5)]);
    }

    #[test]
    fn test_run_id() {
        let id = RunId::new("nuzlocke-1");
        assert_eq!(id.as_str(), "nuzlocke-1");
        assert_eq!(id.to_string(), "nuzlocke-1");
    }
}
