//! Request-scoped orchestration over a [`RunStore`].
//!
//! Each call loads a run, applies one operation through a
//! [`RunManager`], and saves the result with the version it was loaded
//! at. A failed operation is never saved. A concurrent writer that saved
//! first makes the second save fail with a persistence error wrapping
//! [`StoreError::Conflict`](crate::core::StoreError::Conflict).

use tracing::{debug, info};

use crate::core::{LockeError, NotFound, Result, RunId};
use crate::creation::RunCreator;
use crate::run::{PoolEntry, PoolFilter, Run, RunSnapshot};
use crate::species::GameData;

use super::run_manager::RunManager;
use super::store::RunStore;

/// Binds a store to the game data runs are played against.
pub struct RunService<'a, S: RunStore> {
    store: S,
    dex: &'a dyn GameData,
}

impl<'a, S: RunStore> RunService<'a, S> {
    #[must_use]
    pub fn new(store: S, dex: &'a dyn GameData) -> Self {
        Self { store, dex }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn save(&self, operation: &'static str, run: &mut Run) -> Result<()> {
        let version = self
            .store
            .save_run(run)
            .map_err(|e| LockeError::persistence(operation, e))?;
        run.set_version(version);
        Ok(())
    }

    /// Finish a completed wizard and persist the new run.
    pub fn create(&self, creator: &mut RunCreator, id: RunId) -> Result<Run> {
        let mut run = creator.finish(self.dex, id)?;
        self.save("create_run", &mut run)?;
        Ok(run)
    }

    /// Load a run.
    pub fn load(&self, id: &RunId) -> Result<Run> {
        self.store
            .fetch_run(id)
            .map_err(|e| LockeError::persistence("fetch_run", e))?
            .ok_or_else(|| NotFound::Run(id.clone()).into())
    }

    /// Apply `f` to a loaded run and save it if `f` succeeds.
    ///
    /// `operation` names the call in persistence errors and logs.
    pub fn with_run<T>(
        &self,
        id: &RunId,
        operation: &'static str,
        f: impl FnOnce(&mut RunManager<'a>) -> Result<T>,
    ) -> Result<T> {
        let run = self.load(id)?;
        let mut manager = RunManager::new(run, self.dex)?;
        let value = f(&mut manager)?;

        let mut run = manager.into_run();
        self.save(operation, &mut run)?;
        debug!(run = %id, operation, version = run.version(), "run saved");
        Ok(value)
    }

    /// Catchable species of a run.
    pub fn pool(&self, id: &RunId, filter: PoolFilter) -> Result<Vec<PoolEntry>> {
        self.store
            .list_pool_entries(id, filter)
            .map_err(|e| LockeError::persistence("list_pool_entries", e))
    }

    /// Capture a save point of the stored run.
    pub fn checkpoint(&self, id: &RunId) -> Result<RunSnapshot> {
        RunSnapshot::capture(&self.load(id)?)
    }

    /// Roll a run back to a save point. Counts as a restart.
    ///
    /// The restored run replaces whatever is stored under its ID, so the
    /// version check is made against the current stored version rather
    /// than the one captured in the snapshot.
    pub fn restore(&self, snapshot: &RunSnapshot) -> Result<Run> {
        let mut run = snapshot.restore()?;
        let current = self
            .store
            .fetch_run(&run.id)
            .map_err(|e| LockeError::persistence("fetch_run", e))?
            .map_or(0, |stored| stored.version());
        run.set_version(current);
        self.save("restore_run", &mut run)?;
        info!(run = %run.id, restarts = run.restarts(), "run restored");
        Ok(run)
    }

    /// Delete a run. Returns whether it existed.
    pub fn delete(&self, id: &RunId) -> Result<bool> {
        self.store
            .delete_run(id)
            .map_err(|e| LockeError::persistence("delete_run", e))
    }
}

impl<S: RunStore + std::fmt::Debug> std::fmt::Debug for RunService<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
