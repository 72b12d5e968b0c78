//! Read-only game data oracle.
//!
//! The engine never owns species or game data. It asks a [`GameData`]
//! implementation, which may be backed by static tables, a database or a
//! remote service. [`Pokedex`] is the in-memory implementation used by the
//! bundled sample data and by tests.

use std::collections::BTreeMap;

use crate::core::{NotFound, Result};

use super::definition::Species;
use super::game::Game;
use super::registry::SpeciesRegistry;

/// Static game-data collaborator.
pub trait GameData {
    /// Look up a game edition by name.
    fn game(&self, name: &str) -> Result<&Game>;

    /// Every game whose generation is at least `min_gen`, in catalog order.
    fn games_from_generation(&self, min_gen: u8) -> Vec<&Game>;

    /// Look up a species as it exists in generation `gen`.
    fn species(&self, name: &str, gen: u8) -> Result<&Species>;

    /// Every species available in generation `gen`.
    fn species_for_generation(&self, gen: u8) -> Vec<&Species>;

    /// Evolution lines of generation `gen`, optionally final form first.
    fn evolution_lines(&self, gen: u8, reversed: bool) -> Vec<Vec<String>>;

    /// Base form of `name`'s evolution line in generation `gen`.
    fn base_of(&self, name: &str, gen: u8) -> Option<String>;
}

/// In-memory [`GameData`] built from per-generation registries.
///
/// A generation without its own registry falls back to the closest earlier
/// one, so a catalog covering generations 1-3 still answers for 4.
#[derive(Clone, Debug, Default)]
pub struct Pokedex {
    registries: BTreeMap<u8, SpeciesRegistry>,
    games: Vec<Game>,
}

impl Pokedex {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the species registry for a generation, replacing any previous one.
    pub fn insert_generation(&mut self, gen: u8, registry: SpeciesRegistry) {
        self.registries.insert(gen, registry);
    }

    /// Add a game edition.
    pub fn add_game(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Registry answering for generation `gen`.
    #[must_use]
    pub fn registry(&self, gen: u8) -> Option<&SpeciesRegistry> {
        self.registries.range(..=gen).next_back().map(|(_, r)| r)
    }

    /// All games in catalog order.
    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }
}

impl GameData for Pokedex {
    fn game(&self, name: &str) -> Result<&Game> {
        self.games
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| NotFound::Game(name.to_string()).into())
    }

    fn games_from_generation(&self, min_gen: u8) -> Vec<&Game> {
        self.games.iter().filter(|g| g.gen >= min_gen).collect()
    }

    fn species(&self, name: &str, gen: u8) -> Result<&Species> {
        self.registry(gen)
            .and_then(|r| r.get(name))
            .ok_or_else(|| {
                NotFound::Species {
                    name: name.to_string(),
                    gen,
                }
                .into()
            })
    }

    fn species_for_generation(&self, gen: u8) -> Vec<&Species> {
        self.registry(gen).map(|r| r.iter().collect()).unwrap_or_default()
    }

    fn evolution_lines(&self, gen: u8, reversed: bool) -> Vec<Vec<String>> {
        self.registry(gen)
            .map(|r| r.evolution_lines(reversed))
            .unwrap_or_default()
    }

    fn base_of(&self, name: &str, gen: u8) -> Option<String> {
        self.registry(gen)?.base_of(name).map(str::to_string)
    }
}
