//! Bundled game data.
//!
//! - [`sample`]: a small three-generation catalog covering every variant

pub mod sample;

pub use sample::sample_pokedex;
