//! Static species and game data.
//!
//! Species definitions are immutable and shared by every run. The engine
//! reads them through the [`GameData`] trait so the backing catalog can be
//! swapped without touching rule code.

pub mod attributes;
pub mod definition;
pub mod registry;
pub mod game;
pub mod dex;

pub use attributes::{Category, Color, Gender, LegCount, ParseLabelError, PokemonType};
pub use definition::{GenderList, Species, TypeList};
pub use registry::SpeciesRegistry;
pub use game::{Game, Region};
pub use dex::{GameData, Pokedex};
