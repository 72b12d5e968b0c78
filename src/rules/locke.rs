//! The capability record built from a run's variant configuration.
//!
//! `Locke::new` is the single place that knows which variant does what.
//! Everything downstream (pool computation, catching, the step resolver)
//! only talks to the record, so adding a variant means adding a match arm
//! here plus whatever step overrides it needs.
//!
//! ## Step graph
//!
//! Every variant starts from the same shape:
//!
//! ```text
//! Nickname -> Gender (gen >= 2) [-> AssignRole (roles)]
//!                 \-> JoinParty, LeaveParty, ReplacePartyMember, Evolve, Die
//! ```
//!
//! The optional steps require all mandatory ones. The pairing variant adds
//! `Pair`, the role variant adds `PromotePawn`, and a few variants drop
//! steps that make no sense for them.

use tracing::info;

use crate::core::{CreatureId, Result};
use crate::run::{Pokemon, Run};
use crate::species::Species;
use crate::steps::{StepCatalog, StepInfo, StepName};

use super::kind::{LockeConfig, LockeKind};
use super::variants::{chess, unique, wed, wrap};

/// How a caught creature is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatchRule {
    /// Box it, and add it to the party if there is room.
    Standard,
    /// Box it; add it to the party only with room and no type clash.
    UniqueTypes,
    /// Box it; a full party drops its newest unpinned member to make room.
    RollingWindow,
    /// Box it; party placement happens through dedicated steps. The first
    /// creature of a run still starts the party.
    Deferred { limit: Option<usize> },
}

/// Extra mandatory or optional steps a variant hangs off the base graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphShape {
    Standard,
    /// Role assignment after gender, plus pawn promotion.
    Roles,
    /// Partner assignment.
    Pairs,
}

type Relevance = Box<dyn Fn(&Species) -> bool + Send + Sync>;

const DEFAULT_RULES: &[&str] = &[
    "Name each pokemon",
    "Catch 1st encounter",
    "Fainted pokemon considered dead",
];

/// Everything variant-specific about a run.
pub struct Locke {
    config: LockeConfig,

    // === Metadata ===
    min_gen: u8,
    rules: Vec<String>,

    // === Catching ===
    relevance: Relevance,
    catch_rule: CatchRule,
    explicit_pool: bool,

    // === Steps ===
    shape: GraphShape,
    removed: &'static [StepName],
    catalog: StepCatalog,
}

impl Locke {
    /// Build the record for a frozen configuration.
    #[must_use]
    pub fn new(config: LockeConfig) -> Self {
        let effective = config.effective().clone();
        let mut locke = Self {
            min_gen: effective.kind().min_gen(),
            rules: Vec::new(),
            relevance: Box::new(|_| true),
            catch_rule: CatchRule::Standard,
            explicit_pool: false,
            shape: GraphShape::Standard,
            removed: &[],
            catalog: StepCatalog::standard(),
            config: config.clone(),
        };

        let mut extra: Vec<String> = Vec::new();
        match effective {
            LockeConfig::Base => {}
            LockeConfig::Mono { ty } => {
                locke.relevance = Box::new(move |s| s.has_type(ty));
                extra.push(format!("Only pokemons that have {ty} type in their evolution line can be caught"));
                extra.push(format!("If a pokemon loses its {ty} type when evolving, it cannot evolve"));
            }
            LockeConfig::Color { color } => {
                locke.relevance = Box::new(move |s| s.has_color(color));
                extra.push(format!("Only pokemons that are {color} in their evolution line can be caught"));
            }
            LockeConfig::Category { category } => {
                locke.relevance = Box::new(move |s| s.has_category(category));
                extra.push(format!(
                    "Only pokemons of the {category} category in their evolution line can be caught"
                ));
            }
            LockeConfig::Leg { legs } => {
                locke.relevance = Box::new(move |s| s.leg_count() == legs);
                extra.push(format!("Only pokemons with {legs} legs in their evolution line can be caught"));
            }
            LockeConfig::Unique => {
                locke.catch_rule = CatchRule::UniqueTypes;
                locke.catalog = locke
                    .catalog
                    .with(unique::UniqueJoinParty)
                    .with(unique::UniqueReplace)
                    .with(unique::UniqueEvolve);
                extra.push("Two pokemons in the party cannot share a type".to_string());
            }
            LockeConfig::Wrap => {
                locke.catch_rule = CatchRule::RollingWindow;
                locke.catalog = locke.catalog.with(wrap::WrapLeaveParty).with(wrap::WrapReplace);
                extra.extend(
                    [
                        "Party must include the first 2 caught pokemons (including the starter)",
                        "Party must include the last 2 caught pokemons",
                        "The 2 remaining party slots are the trainer's choice",
                    ]
                    .map(String::from),
                );
            }
            LockeConfig::Wed => {
                locke.relevance = Box::new(|s| !s.is_genderless());
                locke.catch_rule = CatchRule::Deferred { limit: None };
                locke.shape = GraphShape::Pairs;
                locke.catalog = locke
                    .catalog
                    .with(wed::PairPokemon)
                    .with(wed::WedJoinParty)
                    .with(wed::WedLeaveParty)
                    .with(wed::WedReplace)
                    .with(wed::WedDie);
                extra.extend(
                    [
                        "Pokemon are assigned into pairs based on gender",
                        "Partners enter and leave the party together",
                        "If a pokemon is knocked out, its partner must avenge it or die trying",
                        "Genderless pokemon may not be used",
                    ]
                    .map(String::from),
                );
            }
            LockeConfig::Chess => {
                locke.catch_rule = CatchRule::Deferred { limit: Some(chess::CHESS_PIECE_LIMIT) };
                locke.shape = GraphShape::Roles;
                locke.catalog = locke
                    .catalog
                    .with(chess::AssignRole)
                    .with(chess::PromotePawn)
                    .with(chess::ChessJoinParty)
                    .with(chess::ChessLeaveParty)
                    .with(chess::ChessReplace)
                    .with(chess::ChessEvolve)
                    .with(chess::ChessDie);
                extra.extend(
                    [
                        "Only sixteen pokemons may be acquired throughout the run (the starter and fifteen others)",
                        "Each pokemon must be assigned a role before it can enter a battle",
                        "Roles: a King, a Queen, two Bishops, two Knights, two Rooks and eight Pawns",
                        "Only one pokemon of each role may be in the party at a time",
                        "King: the starter. It must stay in the party, and if it faints the run is lost",
                        "Queen: must be a female pokemon",
                        "Pawns: may never evolve, and must be their line's lowest evolution",
                        "A pawn that wins a major battle by itself may be promoted to another role",
                    ]
                    .map(String::from),
                );
            }
            LockeConfig::Star => {
                locke.removed = &[StepName::LeaveParty, StepName::ReplacePartyMember];
                extra.extend(
                    [
                        "You may never catch encounters or gift pokemons",
                        "The player starts with a pokemon of each type",
                        "The player may not switch party pokemons with box pokemons",
                    ]
                    .map(String::from),
                );
            }
            LockeConfig::Eevee => {
                locke.relevance = Box::new(|_| false);
                locke.explicit_pool = true;
                locke.removed = &[StepName::Evolve];
                extra.push("Only Eevee and its evolutions can be part of the team".to_string());
            }
            LockeConfig::Castform => {
                locke.relevance = Box::new(|_| false);
                locke.explicit_pool = true;
                extra.push("Only Castform and its forms can be part of the team".to_string());
            }
            LockeConfig::Deoxys => {
                locke.relevance = Box::new(|_| false);
                locke.explicit_pool = true;
                extra.push("Only Deoxys and its forms can be part of the team".to_string());
            }
            LockeConfig::Starter => {
                locke.relevance = Box::new(|_| false);
                locke.explicit_pool = true;
                extra.push("Only the games' starter pokemons are eligible".to_string());
            }
            // `effective` never returns the meta-variant.
            LockeConfig::Gen { .. } => {}
        }

        let mut rules: Vec<String> = DEFAULT_RULES.iter().map(|r| (*r).to_string()).collect();
        rules.extend(extra);
        if config.kind() == LockeKind::Gen {
            rules.insert(0, "For each game generation, apply the next rules:".to_string());
        }
        locke.rules = rules;
        locke
    }

    // === Metadata ===

    #[must_use]
    pub fn config(&self) -> &LockeConfig {
        &self.config
    }

    /// Kind of the outer configuration (the meta-variant if wrapped).
    #[must_use]
    pub fn kind(&self) -> LockeKind {
        self.config.kind()
    }

    #[must_use]
    pub fn min_gen(&self) -> u8 {
        self.min_gen
    }

    /// Rule text shown to the player.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    // === Catching ===

    /// Whether a species may be caught under this variant.
    #[must_use]
    pub fn is_relevant(&self, species: &Species) -> bool {
        (self.relevance)(species)
    }

    #[must_use]
    pub fn catch_rule(&self) -> CatchRule {
        self.catch_rule
    }

    /// Whether catches fill the party on their own.
    #[must_use]
    pub fn auto_add_to_party(&self) -> bool {
        !matches!(self.catch_rule, CatchRule::Deferred { .. })
    }

    /// Whether the pool is fixed by the variant instead of computed from
    /// relevance.
    #[must_use]
    pub fn has_explicit_pool(&self) -> bool {
        self.explicit_pool
    }

    /// Catch a new creature: assign its capture index and place it.
    pub fn catch(&self, run: &mut Run, mut pokemon: Pokemon) -> Result<CreatureId> {
        if pokemon.metadata.capture_index.is_none() {
            pokemon.metadata.capture_index = Some(run.next_capture_index());
        }
        let id = match self.catch_rule {
            CatchRule::Standard => {
                let id = run.add_to_box(pokemon)?;
                if !run.party().is_full() {
                    run.add_to_party(id)?;
                }
                id
            }
            CatchRule::UniqueTypes => unique::catch(run, pokemon)?,
            CatchRule::RollingWindow => wrap::catch(run, pokemon)?,
            CatchRule::Deferred { limit: Some(_) } => chess::catch(run, pokemon)?,
            CatchRule::Deferred { limit: None } => wed::catch(run, pokemon)?,
        };
        info!(run = %run.id, creature = %id, in_party = run.party().contains(id), "caught");
        Ok(id)
    }

    // === Steps ===

    /// Steps and prerequisites for a generation.
    #[must_use]
    pub fn step_graph(&self, gen: u8) -> Vec<StepInfo> {
        let mut mandatory = vec![StepInfo::new(StepName::Nickname, &[])];
        if gen >= 2 {
            mandatory.push(StepInfo::new(StepName::Gender, &[StepName::Nickname]));
        }
        if self.shape == GraphShape::Roles {
            let after: Vec<StepName> = mandatory.last().map(|s| vec![s.name]).unwrap_or_default();
            mandatory.push(StepInfo::new(StepName::AssignRole, &after));
        }

        let required: Vec<StepName> = mandatory.iter().map(|s| s.name).collect();
        let mut optional: Vec<StepName> = vec![
            StepName::JoinParty,
            StepName::LeaveParty,
            StepName::ReplacePartyMember,
            StepName::Evolve,
            StepName::Die,
        ];
        match self.shape {
            GraphShape::Pairs => optional.push(StepName::Pair),
            GraphShape::Roles => optional.push(StepName::PromotePawn),
            GraphShape::Standard => {}
        }
        optional.retain(|name| !self.removed.contains(name));

        mandatory.extend(optional.into_iter().map(|name| StepInfo::new(name, &required)));
        mandatory
    }

    /// Step implementations, with this variant's overrides applied.
    #[must_use]
    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }
}

impl std::fmt::Debug for Locke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locke")
            .field("config", &self.config)
            .field("min_gen", &self.min_gen)
            .field("catch_rule", &self.catch_rule)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RunId, RunSettings};
    use crate::species::{Color, Game, PokemonType, Region};

    fn names(graph: &[StepInfo]) -> Vec<StepName> {
        graph.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_base_graph_per_generation() {
        let locke = Locke::new(LockeConfig::Base);
        let gen1 = locke.step_graph(1);
        assert_eq!(gen1[0], StepInfo::new(StepName::Nickname, &[]));
        assert!(gen1.iter().all(|s| s.name != StepName::Gender));
        assert_eq!(gen1.len(), 6);

        let gen2 = locke.step_graph(2);
        assert_eq!(gen2[1], StepInfo::new(StepName::Gender, &[StepName::Nickname]));
        let die = gen2.iter().find(|s| s.name == StepName::Die).unwrap();
        assert_eq!(die.prerequisites.as_slice(), &[StepName::Nickname, StepName::Gender]);
    }

    #[test]
    fn test_variant_graphs() {
        let chess = Locke::new(LockeConfig::Chess).step_graph(2);
        assert_eq!(chess[2], StepInfo::new(StepName::AssignRole, &[StepName::Gender]));
        assert!(names(&chess).contains(&StepName::PromotePawn));
        let join = chess.iter().find(|s| s.name == StepName::JoinParty).unwrap();
        assert!(join.prerequisites.contains(&StepName::AssignRole));

        let wed = Locke::new(LockeConfig::Wed).step_graph(2);
        assert!(names(&wed).contains(&StepName::Pair));

        let star = names(&Locke::new(LockeConfig::Star).step_graph(3));
        assert!(!star.contains(&StepName::LeaveParty));
        assert!(!star.contains(&StepName::ReplacePartyMember));
        assert!(star.contains(&StepName::JoinParty));
    }

    #[test]
    fn test_relevance() {
        let charmander = Species::new("Charmander", 1, &[PokemonType::Fire]).with_colors(&[Color::Red]);
        let squirtle = Species::new("Squirtle", 1, &[PokemonType::Water]).with_colors(&[Color::Blue]);

        let mono = Locke::new(LockeConfig::Mono { ty: PokemonType::Fire });
        assert!(mono.is_relevant(&charmander));
        assert!(!mono.is_relevant(&squirtle));

        let color = Locke::new(LockeConfig::Color { color: Color::Blue });
        assert!(color.is_relevant(&squirtle));

        let eevee = Locke::new(LockeConfig::Eevee);
        assert!(!eevee.is_relevant(&charmander));
        assert!(eevee.has_explicit_pool());

        let wed = Locke::new(LockeConfig::Wed);
        assert!(!wed.is_relevant(&Species::new("Magnemite", 2, &[PokemonType::Electric]).genderless()));
    }

    #[test]
    fn test_gen_wraps_inner() {
        let locke = Locke::new(LockeConfig::Gen { inner: Box::new(LockeConfig::Castform) });
        assert_eq!(locke.kind(), LockeKind::Gen);
        assert_eq!(locke.min_gen(), 3);
        assert_eq!(locke.rules()[0], "For each game generation, apply the next rules:");
        assert_eq!(locke.rules().len(), Locke::new(LockeConfig::Castform).rules().len() + 1);
        assert!(locke.has_explicit_pool());
    }

    #[test]
    fn test_catch_assigns_capture_index() {
        let game = Game::new("Red", 1, Region::Kanto);
        let mut run = Run::new(RunId::new("l"), "l", &game, LockeConfig::Base, RunSettings::new()).unwrap();
        let locke = Locke::new(LockeConfig::Base);
        let rattata = Species::new("Rattata", 1, &[PokemonType::Normal]);

        for _ in 0..7 {
            let mon = run.create_pokemon(&rattata);
            locke.catch(&mut run, mon).unwrap();
        }
        assert_eq!(run.party().len(), 6);
        assert_eq!(run.pokemon_box().len(), 7);
        let last = run.pokemon(CreatureId(6)).unwrap();
        assert_eq!(last.metadata.capture_index, Some(6));
        assert!(!run.party().contains(CreatureId(6)));
    }

    #[test]
    fn test_deferred_catch_keeps_party() {
        let locke = Locke::new(LockeConfig::Chess);
        assert!(!locke.auto_add_to_party());
        assert!(Locke::new(LockeConfig::Unique).auto_add_to_party());
    }
}
