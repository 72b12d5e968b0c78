//! # locke-engine
//!
//! Rule engine and progression state machine for Locke challenge runs:
//! self-imposed rule sets layered over a monster-catching game, where
//! every creature's life is tracked and the rules decide what may be
//! caught and what each creature may do next.
//!
//! ## Design Principles
//!
//! 1. **Variant-Agnostic Core**: Runs, creatures and steps know nothing
//!    about individual variants. A variant is a capability record
//!    ([`Locke`]) consulted at a handful of seams.
//!
//! 2. **Data-Driven Actions**: Creature actions form a prerequisite graph
//!    resolved per creature. Variants override steps by name and add or
//!    remove graph nodes instead of branching inside shared code.
//!
//! 3. **Atomic Mutation**: Runs use persistent collections, so every
//!    operation is applied to a cheap clone and committed only on success.
//!
//! ## Modules
//!
//! - `core`: IDs, run settings, errors, RNG
//! - `species`: static species and game data behind the [`GameData`] trait
//! - `run`: the run aggregate (box, party, encounters, battles, pool)
//! - `steps`: creature actions and the prerequisite resolver
//! - `rules`: variant configuration and capability records
//! - `creation`: the run creation wizard
//! - `manager`: in-play operations, persistence contract and service
//! - `games`: bundled sample catalog

pub mod core;
pub mod species;
pub mod run;
pub mod steps;
pub mod rules;
pub mod creation;
pub mod manager;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    CreatureId, RunId,
    RunSettings, PARTY_SIZE,
    LockeError, NotFound, Result, StoreError, ValidationError,
    SeededRng,
};

pub use crate::species::{
    Category, Color, Gender, LegCount, PokemonType,
    Species, SpeciesRegistry, Game, Region,
    GameData, Pokedex,
};

pub use crate::run::{
    Run, RunSnapshot,
    Pokemon, LifeStatus, Party, PokemonBox,
    Encounter, EncounterStatus, Battle,
    CatchablePool, PoolEntry, PoolFilter,
};

pub use crate::steps::{
    Step, StepName, StepInfo, StepOptions, StepOutcome, StepContext, RunEndCause,
    StepCatalog, StepResolver,
};

pub use crate::rules::{Locke, LockeConfig, LockeKind, ChessRole};

pub use crate::creation::{RunCreator, Progress, WizardKey};

pub use crate::manager::{RunManager, RunStore, MemoryStore, RunService};
