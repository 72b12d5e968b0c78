//! The run aggregate and everything it owns.
//!
//! A [`Run`] is created by the [`RunCreator`](crate::creation::RunCreator)
//! and mutated by the [`RunManager`](crate::manager::RunManager). Nothing
//! in this module knows about variants beyond storing their configuration.

pub mod pokemon;
pub mod roster;
pub mod encounter;
pub mod battle;
pub mod pool;
pub mod state;
pub mod snapshot;

pub use pokemon::{LifeStatus, Pokemon, PokemonMetadata};
pub use roster::{Party, PokemonBox};
pub use encounter::{Encounter, EncounterStatus, EncounterSubject};
pub use battle::Battle;
pub use pool::{CatchablePool, PoolEntry, PoolFilter};
pub use state::Run;
pub use snapshot::RunSnapshot;
