//! Error taxonomy for the rule engine.
//!
//! Three kinds of failure reach a caller:
//!
//! - [`ValidationError`]: malformed or stale input. Reported immediately and
//!   never retried.
//! - [`NotFound`]: an unknown run, game, species, route or creature.
//! - [`LockeError::Persistence`]: a store failure, wrapped with the name of
//!   the operation that triggered it.
//!
//! The end of a run (the last party member dying) is *not* an error. It is
//! reported as [`StepOutcome::RunEnded`](crate::steps::StepOutcome::RunEnded).
//! Likewise the wizard asking for more input is a
//! [`Progress`](crate::creation::Progress) value, not a failure.

use thiserror::Error;

use super::ids::{CreatureId, RunId};
use crate::creation::WizardKey;
use crate::run::EncounterStatus;
use crate::steps::StepName;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LockeError>;

/// Caller input that the current run state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("step '{step}' is not available for {creature}")]
    StepNotOffered { step: StepName, creature: CreatureId },

    #[error("'{value}' is not a valid choice for {field}")]
    InvalidChoice { field: String, value: String },

    #[error("a value is required for {field}")]
    MissingValue { field: String },

    #[error("step '{step}' does not take a value")]
    UnexpectedValue { step: StepName },

    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("nickname '{0}' is already taken")]
    NicknameTaken(String),

    #[error("{0} is already in the party")]
    AlreadyInParty(CreatureId),

    #[error("{0} is not in the party")]
    NotInParty(CreatureId),

    #[error("the party is full")]
    PartyFull,

    #[error("{0} is the last party member")]
    LastPartyMember(CreatureId),

    #[error("{0} is already in the box")]
    DuplicateCreature(CreatureId),

    #[error("{0} is dead")]
    CreatureDead(CreatureId),

    #[error("{0} holds a pinned party slot")]
    PinnedPartyMember(CreatureId),

    #[error("encounter on '{route}' is {actual}, expected {expected}")]
    EncounterStatus {
        route: String,
        expected: EncounterStatus,
        actual: EncounterStatus,
    },

    #[error("an encounter cannot be resolved as {0}")]
    InvalidResolution(EncounterStatus),

    #[error("species '{0}' cannot be encountered here")]
    SpeciesNotAvailable(String),

    #[error("the starter has already been chosen")]
    StarterAlreadyChosen,

    #[error("the run is already finished")]
    RunFinished,

    #[error("no more than {limit} creatures may be caught")]
    CatchLimitReached { limit: usize },

    #[error("{creature} cannot be paired with {partner}")]
    InvalidPair { creature: CreatureId, partner: CreatureId },

    #[error("wizard expected {expected}, got {got}")]
    UnexpectedKey { expected: WizardKey, got: WizardKey },

    #[error("run creation is already complete")]
    CreationComplete,

    #[error("run creation still needs {0}")]
    CreationIncomplete(WizardKey),

    #[error("run name must not be empty")]
    EmptyRunName,
}

/// Something a lookup could not find.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("run '{0}' not found")]
    Run(RunId),

    #[error("game '{0}' not found")]
    Game(String),

    #[error("species '{name}' not found in generation {gen}")]
    Species { name: String, gen: u8 },

    #[error("route '{0}' not found")]
    Route(String),

    #[error("{0} not found")]
    Creature(CreatureId),

    #[error("variant '{0}' not found")]
    Variant(String),
}

/// Failures reported by a [`RunStore`](crate::manager::RunStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stored run changed since it was loaded.
    #[error("version conflict: expected {expected}, found {found}")]
    Conflict { expected: u64, found: u64 },

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("{operation} failed: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("snapshot codec failure: {0}")]
    Snapshot(String),
}

impl LockeError {
    /// Wrap a store failure with the name of the operation that caused it.
    #[must_use]
    pub fn persistence(operation: &'static str, source: StoreError) -> Self {
        Self::Persistence { operation, source }
    }

    /// Whether this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this is a not-found failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
