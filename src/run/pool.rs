//! The catchable pool: which species a run allows.
//!
//! Computed once when the run is created (see
//! [`compute_pool`](crate::creation::compute_pool)) and stored on the run.
//! Each entry points at its line's base form; the `caught` flag feeds the
//! duplicate clause.

use serde::{Deserialize, Serialize};

/// One species a run may encounter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolEntry {
    pub species: String,
    /// Base form of the species' evolution line.
    pub base: String,
    /// Whether the line was already caught.
    pub caught: bool,
}

impl PoolEntry {
    #[must_use]
    pub fn new(species: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            base: base.into(),
            caught: false,
        }
    }

    /// Builder: set the caught flag.
    #[must_use]
    pub fn with_caught(mut self, caught: bool) -> Self {
        self.caught = caught;
        self
    }
}

/// Filter applied when listing pool entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolFilter {
    #[default]
    All,
    Uncaught,
}

/// Ordered, de-duplicated set of pool entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchablePool {
    entries: Vec<PoolEntry>,
}

impl CatchablePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry unless its species is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert(&mut self, entry: PoolEntry) -> bool {
        if self.contains(&entry.species) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    #[must_use]
    pub fn get(&self, species: &str) -> Option<&PoolEntry> {
        self.entries.iter().find(|e| e.species == species)
    }

    #[must_use]
    pub fn contains(&self, species: &str) -> bool {
        self.get(species).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order, optionally restricted to uncaught lines.
    pub fn entries(&self, filter: PoolFilter) -> impl Iterator<Item = &PoolEntry> {
        self.entries
            .iter()
            .filter(move |e| filter == PoolFilter::All || !e.caught)
    }

    /// Distinct base forms, in order of first appearance.
    #[must_use]
    pub fn base_species(&self) -> Vec<&str> {
        let mut bases: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !bases.contains(&entry.base.as_str()) {
                bases.push(&entry.base);
            }
        }
        bases
    }

    /// Flag every entry of the line rooted at `base` as caught.
    pub fn mark_line_caught(&mut self, base: &str) {
        for entry in self.entries.iter_mut().filter(|e| e.base == base) {
            entry.caught = true;
        }
    }
}

impl FromIterator<PoolEntry> for CatchablePool {
    fn from_iter<I: IntoIterator<Item = PoolEntry>>(iter: I) -> Self {
        let mut pool = Self::new();
        for entry in iter {
            pool.insert(entry);
        }
        pool
    }
}
