//! Creatures owned by a run.
//!
//! A `Pokemon` is one individual: a snapshot of its current species data
//! plus per-run metadata. Evolving replaces the species snapshot and keeps
//! the metadata.

use serde::{Deserialize, Serialize};

use crate::core::CreatureId;
use crate::rules::variants::chess::ChessRole;
use crate::species::{Gender, GenderList, PokemonType, Species, TypeList};

/// Whether a creature is still usable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStatus {
    #[default]
    Alive,
    Dead,
}

/// Per-run facts about an individual creature.
///
/// Variant-specific fields stay `None` for variants that do not use them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonMetadata {
    pub id: CreatureId,
    pub nickname: Option<String>,

    /// Catch order within the run, starting at 0.
    pub capture_index: Option<u32>,

    pub gender: Option<Gender>,

    /// Pairing partner (pairing variant).
    pub partner: Option<CreatureId>,

    /// Current role (role variant).
    pub role: Option<ChessRole>,

    /// First role ever assigned, used for quotas and pawn promotion.
    pub original_role: Option<ChessRole>,

    /// Type this creature represents (type-representative variant).
    pub represents: Option<PokemonType>,
}

impl PokemonMetadata {
    /// Fresh metadata with only an ID.
    #[must_use]
    pub fn new(id: CreatureId) -> Self {
        Self {
            id,
            nickname: None,
            capture_index: None,
            gender: None,
            partner: None,
            role: None,
            original_role: None,
            represents: None,
        }
    }
}

/// An owned creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Current species name.
    pub name: String,
    pub gen: u8,
    pub types: TypeList,
    pub evolves_to: Vec<String>,
    pub genders: GenderList,
    pub metadata: PokemonMetadata,
    pub status: LifeStatus,
}

impl Pokemon {
    /// Materialize a new individual of `species`.
    #[must_use]
    pub fn from_species(species: &Species, id: CreatureId) -> Self {
        Self {
            name: species.name.clone(),
            gen: species.gen,
            types: species.types.clone(),
            evolves_to: species.evolves_to.clone(),
            genders: species.genders.clone(),
            metadata: PokemonMetadata::new(id),
            status: LifeStatus::Alive,
        }
    }

    #[must_use]
    pub fn id(&self) -> CreatureId {
        self.metadata.id
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == LifeStatus::Alive
    }

    /// Whether this creature shares at least one of `types`.
    #[must_use]
    pub fn shares_type_with(&self, types: &[PokemonType]) -> bool {
        self.types.iter().any(|t| types.contains(t))
    }

    /// Replace the species snapshot, keeping metadata and status.
    pub fn evolve_into(&mut self, species: &Species) {
        self.name = species.name.clone();
        self.gen = species.gen;
        self.types = species.types.clone();
        self.evolves_to = species.evolves_to.clone();
        self.genders = species.genders.clone();
    }

    /// Mark as dead. Does not touch party membership.
    pub fn kill(&mut self) {
        self.status = LifeStatus::Dead;
    }
}
