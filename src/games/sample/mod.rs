//! A compact catalog for demos and tests.
//!
//! Three generations, one game each (Red, Gold, Ruby). Only a handful of
//! families are included, but enough of them for every variant to be
//! playable:
//!
//! - All nine starter lines (Starter locke)
//! - The Eevee family, growing in generation 2 (Eevee locke)
//! - Castform and Deoxys in generation 3
//! - Genderless lines (Magnemite, Voltorb) for the pairing rules
//! - At least one fully evolved line for most types (Star locke)

mod pokedex;

pub use pokedex::{sample_pokedex, sample_species};
