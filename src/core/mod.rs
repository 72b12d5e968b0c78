//! Core engine types: identifiers, configuration, errors, RNG.
//!
//! Everything here is variant-agnostic. Variants read these types but never
//! extend them.

pub mod ids;
pub mod config;
pub mod error;
pub mod rng;

pub use ids::{CreatureId, RunId};
pub use config::{RunSettings, PARTY_SIZE};
pub use error::{LockeError, NotFound, Result, StoreError, ValidationError};
pub use rng::SeededRng;
