//! Persistence contract and an in-memory reference store.
//!
//! Runs are saved whole. Every save carries the version the run had when
//! it was loaded; a store refuses a save whose version no longer matches
//! what it holds, so two requests racing on one run cannot silently
//! overwrite each other.

use std::sync::RwLock;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::{RunId, StoreError};
use crate::run::{PoolEntry, PoolFilter, Run};

/// Where runs live between requests.
pub trait RunStore: Send + Sync {
    /// Load a run, or `None` if no run has that ID.
    fn fetch_run(&self, id: &RunId) -> Result<Option<Run>, StoreError>;

    /// Save a run and return its new version.
    ///
    /// Fails with [`StoreError::Conflict`] if the stored version differs
    /// from `run.version()`. A run that was never saved has version 0.
    fn save_run(&self, run: &Run) -> Result<u64, StoreError>;

    /// Catchable pool entries of a run.
    fn list_pool_entries(&self, id: &RunId, filter: PoolFilter) -> Result<Vec<PoolEntry>, StoreError>;

    /// Remove a run and everything it owns. Returns whether it existed.
    fn delete_run(&self, id: &RunId) -> Result<bool, StoreError>;
}

fn lock_err(context: &'static str) -> StoreError {
    StoreError::Backend(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    runs: RwLock<FxHashMap<RunId, Run>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored runs.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.runs.read().map_err(|_| lock_err("len"))?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl RunStore for MemoryStore {
    fn fetch_run(&self, id: &RunId) -> Result<Option<Run>, StoreError> {
        let runs = self.runs.read().map_err(|_| lock_err("fetch_run"))?;
        Ok(runs.get(id).cloned())
    }

    fn save_run(&self, run: &Run) -> Result<u64, StoreError> {
        let mut runs = self.runs.write().map_err(|_| lock_err("save_run"))?;
        let found = runs.get(&run.id).map_or(0, Run::version);
        if found != run.version() {
            warn!(run = %run.id, expected = run.version(), found, "stale save rejected");
            return Err(StoreError::Conflict {
                expected: run.version(),
                found,
            });
        }

        let mut stored = run.clone();
        stored.set_version(found + 1);
        runs.insert(run.id.clone(), stored);
        Ok(found + 1)
    }

    fn list_pool_entries(&self, id: &RunId, filter: PoolFilter) -> Result<Vec<PoolEntry>, StoreError> {
        let runs = self.runs.read().map_err(|_| lock_err("list_pool_entries"))?;
        Ok(runs
            .get(id)
            .map(|run| run.pool.entries(filter).cloned().collect())
            .unwrap_or_default())
    }

    fn delete_run(&self, id: &RunId) -> Result<bool, StoreError> {
        let mut runs = self.runs.write().map_err(|_| lock_err("delete_run"))?;
        Ok(runs.remove(id).is_some())
    }
}
