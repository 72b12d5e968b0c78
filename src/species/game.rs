//! Game editions: routes, starters, wild encounters, notable trainers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Home region of a generation's games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Kanto,
    Johto,
    Hoenn,
}

impl Region {
    /// Region a generation's main games take place in.
    #[must_use]
    pub const fn for_generation(gen: u8) -> Option<Region> {
        match gen {
            1 => Some(Self::Kanto),
            2 => Some(Self::Johto),
            3 => Some(Self::Hoenn),
            _ => None,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Kanto => "Kanto",
            Self::Johto => "Johto",
            Self::Hoenn => "Hoenn",
        };
        f.write_str(name)
    }
}

/// A single game edition.
///
/// ## Example
///
/// ```
/// use locke_engine::species::{Game, Region};
///
/// let red = Game::new("Red", 1, Region::Kanto)
///     .with_starters(["Bulbasaur", "Charmander", "Squirtle"])
///     .with_route("Route 1", ["Pidgey", "Rattata"]);
///
/// assert!(red.has_route("Route 1"));
/// assert_eq!(red.wild_species("Route 1").len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub gen: u8,
    pub region: Region,

    /// Routes in story order. Every route gets one encounter per run.
    pub routes: Vec<String>,

    /// Canonical starter species.
    pub starters: Vec<String>,

    /// Gym leaders, elite four and other named opponents.
    pub trainers: Vec<String>,

    /// Wild species per route.
    encounters: FxHashMap<String, Vec<String>>,
}

impl Game {
    /// Create an edition with no routes.
    #[must_use]
    pub fn new(name: impl Into<String>, gen: u8, region: Region) -> Self {
        Self {
            name: name.into(),
            gen,
            region,
            routes: Vec::new(),
            starters: Vec::new(),
            trainers: Vec::new(),
            encounters: FxHashMap::default(),
        }
    }

    /// Builder: set starters.
    #[must_use]
    pub fn with_starters<I, S>(mut self, starters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.starters = starters.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set named trainers.
    #[must_use]
    pub fn with_trainers<I, S>(mut self, trainers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trainers = trainers.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: append a route and its wild species.
    #[must_use]
    pub fn with_route<I, S>(mut self, route: impl Into<String>, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let route = route.into();
        self.encounters
            .insert(route.clone(), species.into_iter().map(Into::into).collect());
        self.routes.push(route);
        self
    }

    #[must_use]
    pub fn has_route(&self, route: &str) -> bool {
        self.encounters.contains_key(route)
    }

    /// Wild species on a route. Empty for unknown routes.
    #[must_use]
    pub fn wild_species(&self, route: &str) -> &[String] {
        self.encounters.get(route).map(Vec::as_slice).unwrap_or(&[])
    }
}
