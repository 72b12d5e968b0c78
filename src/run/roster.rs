//! Box and party: where a run's creatures live.
//!
//! The [`PokemonBox`] owns every creature the run has caught, dead or alive.
//! The [`Party`] holds up to [`PARTY_SIZE`] IDs of boxed creatures. Holding
//! IDs rather than creatures keeps a single owner for each individual; the
//! run checks that an ID is boxed before placing it in the party.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CreatureId, ValidationError, PARTY_SIZE};

use super::pokemon::Pokemon;

/// Every creature owned by a run, in catch order.
///
/// Backed by `im::Vector` so cloning a run for a tentative mutation is O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonBox {
    pokemon: Vector<Pokemon>,
}

impl PokemonBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a creature. Fails if its ID is already boxed.
    pub fn add(&mut self, pokemon: Pokemon) -> Result<(), ValidationError> {
        if self.contains(pokemon.id()) {
            return Err(ValidationError::DuplicateCreature(pokemon.id()));
        }
        self.pokemon.push_back(pokemon);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: CreatureId) -> Option<&Pokemon> {
        self.pokemon.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Pokemon> {
        self.pokemon.iter_mut().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: CreatureId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    /// Iterate in catch order.
    pub fn iter(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokemon.iter()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokemon.iter().filter(|p| p.is_alive())
    }

    pub fn dead(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokemon.iter().filter(|p| !p.is_alive())
    }
}

/// The active team: at most six boxed creatures, by ID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    members: SmallVec<[CreatureId; PARTY_SIZE]>,
}

impl Party {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member.
    ///
    /// Fails if the creature is already a member or the party is full.
    pub fn add(&mut self, id: CreatureId) -> Result<(), ValidationError> {
        if self.contains(id) {
            return Err(ValidationError::AlreadyInParty(id));
        }
        if self.is_full() {
            return Err(ValidationError::PartyFull);
        }
        self.members.push(id);
        Ok(())
    }

    /// Remove a member.
    ///
    /// Fails if the creature is not a member or is the only member left.
    pub fn remove(&mut self, id: CreatureId) -> Result<(), ValidationError> {
        let Some(pos) = self.members.iter().position(|&m| m == id) else {
            return Err(ValidationError::NotInParty(id));
        };
        if self.members.len() == 1 {
            return Err(ValidationError::LastPartyMember(id));
        }
        self.members.remove(pos);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: CreatureId) -> bool {
        self.members.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= PARTY_SIZE
    }

    /// Free slots left.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        PARTY_SIZE.saturating_sub(self.members.len())
    }

    /// Whether `id` is the only member.
    #[must_use]
    pub fn is_last_member(&self, id: CreatureId) -> bool {
        self.members.as_slice() == [id]
    }

    /// Member IDs in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[CreatureId] {
        &self.members
    }
}
