//! The run aggregate: one Locke challenge playthrough.
//!
//! ## Layout
//!
//! - Identity: ID, display name, creation timestamp
//! - Rules: game, generation, variant configuration, run settings
//! - Progress: box, party, encounters, battles, starter, catchable pool
//! - Lifecycle: restart counter, finished flag, store version
//!
//! Collections use `im` persistent structures, so `clone()` is O(1). The
//! run manager relies on this to apply a step to a scratch copy and only
//! commit it when the step succeeds.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{CreatureId, NotFound, Result, RunId, RunSettings, ValidationError};
use crate::rules::LockeConfig;
use crate::species::{Game, Species};

use super::battle::Battle;
use super::encounter::{Encounter, EncounterStatus};
use super::pokemon::Pokemon;
use super::pool::CatchablePool;
use super::roster::{Party, PokemonBox};

/// Complete state of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Run {
    // === Identity ===
    pub id: RunId,
    pub name: String,
    created_at: DateTime<Utc>,

    // === Rules ===
    pub game: String,
    pub gen: u8,
    pub locke: LockeConfig,
    pub settings: RunSettings,

    // === Progress ===
    pokemon: PokemonBox,
    party: Party,
    encounters: Vector<Encounter>,
    battles: Vector<Battle>,
    starter: Option<CreatureId>,

    /// Species this run may encounter.
    pub pool: CatchablePool,

    // === Lifecycle ===
    restarts: u32,
    finished: bool,
    next_creature: u32,

    /// Incremented by the store on every successful save.
    version: u64,
}

impl Run {
    /// Create an empty run for `game` with one unmet encounter per route.
    pub fn new(
        id: RunId,
        name: impl Into<String>,
        game: &Game,
        locke: LockeConfig,
        settings: RunSettings,
    ) -> Result<Self> {
        let name = name.into();
        if id.as_str().trim().is_empty() || name.trim().is_empty() {
            return Err(ValidationError::EmptyRunName.into());
        }

        Ok(Self {
            id,
            name,
            created_at: Utc::now(),
            game: game.name.clone(),
            gen: game.gen,
            locke,
            settings,
            pokemon: PokemonBox::new(),
            party: Party::new(),
            encounters: game.routes.iter().map(Encounter::new).collect(),
            battles: Vector::new(),
            starter: None,
            pool: CatchablePool::new(),
            restarts: 0,
            finished: false,
            next_creature: 0,
            version: 0,
        })
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // === Creatures ===

    /// Box holding every owned creature.
    #[must_use]
    pub fn pokemon_box(&self) -> &PokemonBox {
        &self.pokemon
    }

    #[must_use]
    pub fn party(&self) -> &Party {
        &self.party
    }

    /// Look up an owned creature.
    pub fn pokemon(&self, id: CreatureId) -> Result<&Pokemon> {
        self.pokemon.get(id).ok_or_else(|| NotFound::Creature(id).into())
    }

    /// Look up an owned creature for mutation.
    pub fn pokemon_mut(&mut self, id: CreatureId) -> Result<&mut Pokemon> {
        self.pokemon.get_mut(id).ok_or_else(|| NotFound::Creature(id).into())
    }

    /// Party members, resolved against the box.
    pub fn party_members(&self) -> impl Iterator<Item = &Pokemon> {
        self.party.ids().iter().filter_map(|&id| self.pokemon.get(id))
    }

    /// Materialize a new individual with a fresh ID. It is not boxed yet.
    pub fn create_pokemon(&mut self, species: &Species) -> Pokemon {
        let id = CreatureId::new(self.next_creature);
        self.next_creature += 1;
        Pokemon::from_species(species, id)
    }

    /// Store a creature in the box.
    pub fn add_to_box(&mut self, pokemon: Pokemon) -> Result<CreatureId> {
        let id = pokemon.id();
        self.pokemon.add(pokemon)?;
        Ok(id)
    }

    /// Place a boxed creature in the party.
    pub fn add_to_party(&mut self, id: CreatureId) -> Result<()> {
        if !self.pokemon.contains(id) {
            return Err(NotFound::Creature(id).into());
        }
        self.party.add(id)?;
        Ok(())
    }

    /// Take a creature out of the party. It stays in the box.
    pub fn remove_from_party(&mut self, id: CreatureId) -> Result<()> {
        self.party.remove(id)?;
        Ok(())
    }

    /// Next capture index: one past the highest assigned so far.
    #[must_use]
    pub fn next_capture_index(&self) -> u32 {
        self.pokemon
            .iter()
            .filter_map(|p| p.metadata.capture_index)
            .max()
            .map_or(0, |i| i + 1)
    }

    /// Whether any other creature already uses `nickname` (case-insensitive).
    #[must_use]
    pub fn nickname_taken(&self, nickname: &str, except: CreatureId) -> bool {
        self.pokemon.iter().any(|p| {
            p.id() != except
                && p.metadata
                    .nickname
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(nickname))
        })
    }

    // === Starter ===

    #[must_use]
    pub fn starter(&self) -> Option<CreatureId> {
        self.starter
    }

    /// Record the starter. Only allowed once.
    pub fn set_starter(&mut self, id: CreatureId) -> Result<()> {
        if self.starter.is_some() {
            return Err(ValidationError::StarterAlreadyChosen.into());
        }
        if !self.pokemon.contains(id) {
            return Err(NotFound::Creature(id).into());
        }
        self.starter = Some(id);
        Ok(())
    }

    // === Encounters ===

    /// Encounters in route order.
    pub fn encounters(&self) -> impl Iterator<Item = &Encounter> {
        self.encounters.iter()
    }

    pub fn encounter(&self, route: &str) -> Result<&Encounter> {
        self.encounters
            .iter()
            .find(|e| e.route == route)
            .ok_or_else(|| NotFound::Route(route.to_string()).into())
    }

    pub fn encounter_mut(&mut self, route: &str) -> Result<&mut Encounter> {
        self.encounters
            .iter_mut()
            .find(|e| e.route == route)
            .ok_or_else(|| NotFound::Route(route.to_string()).into())
    }

    /// Track an encounter for a new route.
    ///
    /// Returns `false` and changes nothing if the route is already tracked.
    pub fn add_encounter(&mut self, encounter: Encounter) -> bool {
        if self.encounters.iter().any(|e| e.route == encounter.route) {
            return false;
        }
        self.encounters.push_back(encounter);
        true
    }

    /// Encounters that have left the unmet state.
    #[must_use]
    pub fn encounter_count(&self) -> usize {
        self.encounters
            .iter()
            .filter(|e| e.status() != EncounterStatus::Unmet)
            .count()
    }

    // === Battles ===

    pub fn battles(&self) -> impl Iterator<Item = &Battle> {
        self.battles.iter()
    }

    /// Record a battle outcome, replacing any earlier record for the opponent.
    pub fn add_battle(&mut self, battle: Battle) {
        match self.battles.iter_mut().find(|b| b.opponent == battle.opponent) {
            Some(existing) => existing.won = battle.won,
            None => self.battles.push_back(battle),
        }
    }

    #[must_use]
    pub fn battle_count(&self) -> usize {
        self.battles.len()
    }

    // === Counts & lifecycle ===

    /// Living creatures in the box.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.pokemon.alive().count()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.finished
    }

    /// Mark the run finished. Fails if it already is.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Err(ValidationError::RunFinished.into());
        }
        self.finished = true;
        Ok(())
    }

    /// Count a restart from a save point.
    pub fn restart(&mut self) {
        self.restarts += 1;
    }

    #[must_use]
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set the store version. Called by stores after a successful save.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
