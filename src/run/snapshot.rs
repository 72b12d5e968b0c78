//! Save points.
//!
//! A `RunSnapshot` is the bincode encoding of a whole run. Restoring one
//! counts as a restart, so the restored run's counter is one higher than
//! the counter at capture time.

use serde::{Deserialize, Serialize};

use crate::core::{LockeError, Result};

use super::state::Run;

/// Encoded run, ready to be written anywhere bytes can go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    bytes: Vec<u8>,
}

impl RunSnapshot {
    /// Encode the current state of `run`.
    pub fn capture(run: &Run) -> Result<Self> {
        let bytes = bincode::serialize(run).map_err(|e| LockeError::Snapshot(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Rebuild from raw bytes produced by [`RunSnapshot::as_bytes`].
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the saved run and count the restart.
    pub fn restore(&self) -> Result<Run> {
        let mut run: Run =
            bincode::deserialize(&self.bytes).map_err(|e| LockeError::Snapshot(e.to_string()))?;
        run.restart();
        Ok(run)
    }
}
