//! The run manager: every in-play operation on a loaded run.

use tracing::{debug, info, warn};

use crate::core::{CreatureId, NotFound, Result, ValidationError};
use crate::rules::Locke;
use crate::run::{Battle, EncounterStatus, PoolFilter, Run};
use crate::species::{Game, GameData};
use crate::steps::{StepContext, StepInfo, StepName, StepOptions, StepOutcome, StepResolver};

/// Owns one loaded run for the duration of a request.
///
/// Mutating operations work on a scratch clone of the run and replace the
/// loaded run only when they succeed, so a failed call never leaves a
/// half-applied change behind. Cloning is cheap: the run's collections are
/// persistent.
pub struct RunManager<'a> {
    run: Run,
    locke: Locke,
    graph: Vec<StepInfo>,
    game: &'a Game,
    dex: &'a dyn GameData,
}

impl<'a> RunManager<'a> {
    /// Load the variant and game a run was created with.
    pub fn new(run: Run, dex: &'a dyn GameData) -> Result<Self> {
        let game = dex.game(&run.game)?;
        let locke = Locke::new(run.locke.clone());
        let graph = locke.step_graph(run.gen);
        Ok(Self {
            run,
            locke,
            graph,
            game,
            dex,
        })
    }

    #[must_use]
    pub fn run(&self) -> &Run {
        &self.run
    }

    #[must_use]
    pub fn locke(&self) -> &Locke {
        &self.locke
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        self.game
    }

    /// Hand the (possibly modified) run back for persisting.
    #[must_use]
    pub fn into_run(self) -> Run {
        self.run
    }

    fn ctx(&self) -> StepContext<'a> {
        StepContext::new(self.dex)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.run.is_active() {
            Ok(())
        } else {
            Err(ValidationError::RunFinished.into())
        }
    }

    // === Starter ===

    /// Species the player may start with.
    ///
    /// Randomized runs may start with any base form in the pool. Otherwise
    /// the game's own starters are offered, or every base form if none of
    /// them is in the pool.
    #[must_use]
    pub fn starter_options(&self) -> Vec<String> {
        let bases = self.run.pool.base_species();
        if !self.run.settings.randomized {
            let starters: Vec<String> = bases
                .iter()
                .filter(|b| self.game.starters.iter().any(|s| s == *b))
                .map(|b| (*b).to_string())
                .collect();
            if !starters.is_empty() {
                return starters;
            }
        }
        bases.into_iter().map(str::to_string).collect()
    }

    /// Catch the starter and record it.
    pub fn choose_starter(&mut self, species: &str) -> Result<CreatureId> {
        self.ensure_active()?;
        if self.run.starter().is_some() {
            return Err(ValidationError::StarterAlreadyChosen.into());
        }
        let Some(entry) = self.run.pool.get(species).cloned() else {
            return Err(ValidationError::SpeciesNotAvailable(species.to_string()).into());
        };
        let definition = self.dex.species(species, self.run.gen)?;

        let mut scratch = self.run.clone();
        let pokemon = scratch.create_pokemon(definition);
        let id = self.locke.catch(&mut scratch, pokemon)?;
        scratch.set_starter(id)?;
        scratch.pool.mark_line_caught(&entry.base);
        self.run = scratch;

        info!(run = %self.run.id, creature = %id, species, "starter chosen");
        Ok(id)
    }

    // === Encounters ===

    /// Species that may be met on `route`.
    ///
    /// With the duplicate clause, lines already caught are left out.
    /// Randomized runs may meet anything in the pool; otherwise only the
    /// route's own wild species.
    pub fn potential_encounters(&self, route: &str) -> Result<Vec<String>> {
        if !self.game.has_route(route) {
            return Err(NotFound::Route(route.to_string()).into());
        }
        let filter = if self.run.settings.duplicate_clause {
            PoolFilter::Uncaught
        } else {
            PoolFilter::All
        };
        let wild = self.game.wild_species(route);
        let randomized = self.run.settings.randomized;
        Ok(self
            .run
            .pool
            .entries(filter)
            .filter(|e| randomized || wild.iter().any(|w| *w == e.species))
            .map(|e| e.species.clone())
            .collect())
    }

    /// Meet `species` on `route`.
    pub fn encounter(&mut self, route: &str, species: &str) -> Result<()> {
        self.ensure_active()?;
        if !self.potential_encounters(route)?.iter().any(|s| s == species) {
            return Err(ValidationError::SpeciesNotAvailable(species.to_string()).into());
        }
        self.run.encounter_mut(route)?.meet(species)?;
        debug!(run = %self.run.id, route, species, "encounter met");
        Ok(())
    }

    /// Settle the encounter on `route`.
    ///
    /// Resolving as caught materializes the creature, applies the variant's
    /// catch side effect and returns the new creature's ID.
    pub fn resolve_encounter(&mut self, route: &str, status: EncounterStatus) -> Result<Option<CreatureId>> {
        self.ensure_active()?;
        let encounter = self.run.encounter(route)?;
        encounter.check_resolve(status)?;

        if status != EncounterStatus::Caught {
            self.run.encounter_mut(route)?.resolve(status)?;
            debug!(run = %self.run.id, route, status = %status, "encounter resolved");
            return Ok(None);
        }

        let Some(species) = encounter.species().map(str::to_string) else {
            return Err(ValidationError::InvalidResolution(status).into());
        };
        let definition = self.dex.species(&species, self.run.gen)?;
        let base = self
            .run
            .pool
            .get(&species)
            .map_or_else(|| species.clone(), |e| e.base.clone());

        let mut scratch = self.run.clone();
        let pokemon = scratch.create_pokemon(definition);
        let id = self.locke.catch(&mut scratch, pokemon)?;
        scratch.encounter_mut(route)?.resolve_caught(id)?;
        scratch.pool.mark_line_caught(&base);
        self.run = scratch;
        Ok(Some(id))
    }

    // === Actions ===

    /// Steps currently offered for a creature.
    pub fn next_actions(&self, id: CreatureId) -> Result<Vec<StepName>> {
        let pokemon = self.run.pokemon(id)?;
        let resolver = StepResolver::new(&self.graph, self.locke.catalog());
        Ok(resolver.offered(&self.ctx(), &self.run, pokemon))
    }

    fn require_offered(&self, id: CreatureId, step: StepName) -> Result<()> {
        if self.next_actions(id)?.contains(&step) {
            Ok(())
        } else {
            Err(ValidationError::StepNotOffered { step, creature: id }.into())
        }
    }

    /// Input an offered step needs.
    pub fn action_options(&self, id: CreatureId, step: StepName) -> Result<StepOptions> {
        self.require_offered(id, step)?;
        let pokemon = self.run.pokemon(id)?;
        let Some(implementation) = self.locke.catalog().get(step) else {
            return Err(ValidationError::StepNotOffered { step, creature: id }.into());
        };
        Ok(implementation.options(&self.ctx(), &self.run, pokemon))
    }

    /// Execute an offered step.
    ///
    /// Relevance is checked again here, so a stale client cannot run a step
    /// that is no longer offered. A run-ending outcome finishes the run.
    pub fn execute_action(&mut self, id: CreatureId, step: StepName, value: Option<&str>) -> Result<StepOutcome> {
        self.ensure_active()?;
        self.require_offered(id, step)?;
        let Some(implementation) = self.locke.catalog().get(step) else {
            return Err(ValidationError::StepNotOffered { step, creature: id }.into());
        };

        let mut scratch = self.run.clone();
        let outcome = implementation.execute(&self.ctx(), &mut scratch, id, value)?;
        if let StepOutcome::RunEnded { cause, .. } = &outcome {
            warn!(run = %scratch.id, creature = %id, cause = ?cause, "run ended");
            scratch.finish()?;
        }
        self.run = scratch;

        debug!(run = %self.run.id, creature = %id, step = %step, "step executed");
        Ok(outcome)
    }

    // === Battles ===

    /// Record a battle result, replacing any earlier result against the
    /// same opponent.
    pub fn record_battle(&mut self, opponent: &str, won: bool) -> Result<()> {
        self.ensure_active()?;
        self.run.add_battle(Battle::new(opponent, won));
        info!(run = %self.run.id, opponent, won, "battle recorded");
        Ok(())
    }

    pub fn win_battle(&mut self, opponent: &str) -> Result<()> {
        self.record_battle(opponent, true)
    }

    // === Lifecycle ===

    pub fn finish(&mut self) -> Result<()> {
        self.run.finish()?;
        info!(run = %self.run.id, "run finished");
        Ok(())
    }
}

impl std::fmt::Debug for RunManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunManager")
            .field("run", &self.run.id)
            .field("locke", &self.locke)
            .field("game", &self.game.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RunId, RunSettings};
    use crate::rules::LockeConfig;
    use crate::run::PoolEntry;
    use crate::species::{PokemonType, Pokedex, Region, Species, SpeciesRegistry};

    fn dex() -> Pokedex {
        let mut gen1 = SpeciesRegistry::new();
        gen1.register(Species::new("Bulbasaur", 1, &[PokemonType::Grass, PokemonType::Poison]));
        gen1.register(Species::new("Pidgey", 1, &[PokemonType::Normal, PokemonType::Flying]));
        gen1.register(Species::new("Rattata", 1, &[PokemonType::Normal]));
        let mut dex = Pokedex::new();
        dex.insert_generation(1, gen1);
        dex.add_game(
            Game::new("Red", 1, Region::Kanto)
                .with_starters(["Bulbasaur"])
                .with_route("Route 1", ["Pidgey", "Rattata"]),
        );
        dex
    }

    fn run(dex: &Pokedex, settings: RunSettings) -> Run {
        let game = dex.game("Red").unwrap();
        let mut run = Run::new(RunId::new("m"), "m", game, LockeConfig::Base, settings).unwrap();
        for name in ["Bulbasaur", "Pidgey", "Rattata"] {
            run.pool.insert(PoolEntry::new(name, name));
        }
        run
    }

    #[test]
    fn test_starter_options() {
        let dex = dex();
        let manager = RunManager::new(run(&dex, RunSettings::new()), &dex).unwrap();
        assert_eq!(manager.starter_options(), vec!["Bulbasaur"]);

        let randomized = RunManager::new(run(&dex, RunSettings::new().with_randomized(true)), &dex).unwrap();
        assert_eq!(randomized.starter_options().len(), 3);
    }

    #[test]
    fn test_choose_starter_once() {
        let dex = dex();
        let mut manager = RunManager::new(run(&dex, RunSettings::new()), &dex).unwrap();
        let id = manager.choose_starter("Bulbasaur").unwrap();
        assert_eq!(manager.run().starter(), Some(id));
        assert!(manager.run().party().contains(id));
        assert!(manager.run().pool.get("Bulbasaur").unwrap().caught);
        assert_eq!(
            manager.choose_starter("Pidgey").unwrap_err(),
            ValidationError::StarterAlreadyChosen.into()
        );
    }

    #[test]
    fn test_duplicate_clause_hides_caught_lines() {
        let dex = dex();
        let mut manager =
            RunManager::new(run(&dex, RunSettings::new().with_duplicate_clause(true)), &dex).unwrap();
        manager.encounter("Route 1", "Pidgey").unwrap();
        manager.resolve_encounter("Route 1", EncounterStatus::Caught).unwrap();
        assert_eq!(manager.potential_encounters("Route 1").unwrap(), vec!["Rattata"]);
        assert!(manager.potential_encounters("Route 2").is_err());
    }

    #[test]
    fn test_failed_step_leaves_run_untouched() {
        let dex = dex();
        let mut manager = RunManager::new(run(&dex, RunSettings::new()), &dex).unwrap();
        let id = manager.choose_starter("Bulbasaur").unwrap();
        let before = manager.run().clone();

        assert!(manager.execute_action(id, StepName::Nickname, Some("  ")).is_err());
        assert_eq!(manager.run(), &before);
        assert_eq!(
            manager.execute_action(id, StepName::Evolve, None).unwrap_err(),
            ValidationError::StepNotOffered { step: StepName::Evolve, creature: id }.into()
        );
    }

    #[test]
    fn test_run_end_finishes_run() {
        let dex = dex();
        let mut manager = RunManager::new(run(&dex, RunSettings::new()), &dex).unwrap();
        let id = manager.choose_starter("Bulbasaur").unwrap();
        manager.execute_action(id, StepName::Nickname, Some("Bulby")).unwrap();

        let outcome = manager.execute_action(id, StepName::Die, None).unwrap();
        assert!(outcome.is_run_ended());
        assert!(!manager.run().is_active());
        assert!(manager.win_battle("Brock").is_err());
    }
}
