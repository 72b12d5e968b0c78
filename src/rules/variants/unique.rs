//! Unique-types variant: no two party members share a type.
//!
//! The rule is enforced everywhere the party can change: catches, joins,
//! replacements and evolutions of party members.

use crate::core::{CreatureId, Result};
use crate::run::{Pokemon, Run};
use crate::species::PokemonType;
use crate::steps::standard::{swap_party_member, Evolve, JoinParty, ReplacePartyMember};
use crate::steps::step::{parse_creature, require_choice};
use crate::steps::{Step, StepContext, StepName, StepOptions, StepOutcome};

/// Party members other than `pokemon` that share a type with `types`.
fn clashing<'r>(run: &'r Run, pokemon: &Pokemon, types: &[PokemonType]) -> Vec<&'r Pokemon> {
    run.party_members()
        .filter(|m| m.id() != pokemon.id() && m.shares_type_with(types))
        .collect()
}

/// Whether `pokemon` could sit in the party without a type clash.
#[must_use]
pub fn fits_party(run: &Run, pokemon: &Pokemon) -> bool {
    clashing(run, pokemon, &pokemon.types).is_empty()
}

/// Box the catch; it joins the party only if there is room and no clash.
pub fn catch(run: &mut Run, pokemon: Pokemon) -> Result<CreatureId> {
    let id = run.add_to_box(pokemon)?;
    let fits = fits_party(run, run.pokemon(id)?);
    if fits && !run.party().is_full() {
        run.add_to_party(id)?;
    }
    Ok(id)
}

/// Join, but only without a type clash.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniqueJoinParty;

impl Step for UniqueJoinParty {
    fn name(&self) -> StepName {
        StepName::JoinParty
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        JoinParty.is_relevant(ctx, run, pokemon) && fits_party(run, pokemon)
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        JoinParty.options(ctx, run, pokemon)
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        JoinParty.execute(ctx, run, id, value)
    }
}

/// Replace, restricted so the swap cannot create a clash.
///
/// With one clashing member, only that member may be replaced. With two or
/// more, no single swap helps and the step is not offered.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniqueReplace;

impl Step for UniqueReplace {
    fn name(&self) -> StepName {
        StepName::ReplacePartyMember
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        ReplacePartyMember.is_relevant(ctx, run, pokemon)
            && clashing(run, pokemon, &pokemon.types).len() < 2
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        match clashing(run, pokemon, &pokemon.types).as_slice() {
            [] => StepOptions::one_of(ReplacePartyMember::party_choices(run)),
            [only] => StepOptions::one_of(vec![only.id().to_choice()]),
            _ => StepOptions::one_of(Vec::new()),
        }
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        let outgoing = parse_creature(self.name(), require_choice(self.name(), &options, value)?)?;
        swap_party_member(run, id, outgoing)?;
        Ok(StepOutcome::applied(vec![]))
    }
}

/// Evolve, but a party member may only take forms that keep the party unique.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniqueEvolve;

impl UniqueEvolve {
    fn targets(ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> Vec<String> {
        let targets = Evolve.options(ctx, run, pokemon).choices;
        if !run.party().contains(pokemon.id()) {
            return targets;
        }
        targets
            .into_iter()
            .filter(|name| {
                ctx.dex
                    .species(name, run.gen)
                    .is_ok_and(|s| clashing(run, pokemon, &s.types).is_empty())
            })
            .collect()
    }
}

impl Step for UniqueEvolve {
    fn name(&self) -> StepName {
        StepName::Evolve
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive() && !Self::targets(ctx, run, pokemon).is_empty()
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(Self::targets(ctx, run, pokemon))
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        require_choice(self.name(), &options, value)?;
        Evolve.execute(ctx, run, id, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RunId, RunSettings};
    use crate::rules::LockeConfig;
    use crate::run::PoolEntry;
    use crate::species::{Game, GameData, Pokedex, Region, Species, SpeciesRegistry};

    fn dex() -> Pokedex {
        let mut gen1 = SpeciesRegistry::new();
        gen1.register(Species::new("Charmander", 1, &[PokemonType::Fire]).with_evolutions(["Charmeleon"]));
        gen1.register(Species::new("Charmeleon", 1, &[PokemonType::Fire]).with_evolutions(["Charizard"]));
        gen1.register(Species::new("Charizard", 1, &[PokemonType::Fire, PokemonType::Flying]));
        gen1.register(Species::new("Pidgey", 1, &[PokemonType::Normal, PokemonType::Flying]));
        gen1.register(Species::new("Ponyta", 1, &[PokemonType::Fire]));
        gen1.register(Species::new("Squirtle", 1, &[PokemonType::Water]));
        let mut dex = Pokedex::new();
        dex.insert_generation(1, gen1);
        dex
    }

    fn run() -> Run {
        let game = Game::new("Red", 1, Region::Kanto);
        let mut run = Run::new(RunId::new("u"), "u", &game, LockeConfig::Unique, RunSettings::new()).unwrap();
        for name in ["Charmander", "Charmeleon", "Charizard", "Pidgey", "Ponyta", "Squirtle"] {
            run.pool.insert(PoolEntry::new(name, name));
        }
        run
    }

    fn catch_named(dex: &Pokedex, run: &mut Run, name: &str) -> CreatureId {
        let species = dex.species(name, 1).unwrap().clone();
        let mon = run.create_pokemon(&species);
        catch(run, mon).unwrap()
    }

    #[test]
    fn test_catch_skips_party_on_clash() {
        let dex = dex();
        let mut run = run();
        let charmander = catch_named(&dex, &mut run, "Charmander");
        let ponyta = catch_named(&dex, &mut run, "Ponyta");
        let squirtle = catch_named(&dex, &mut run, "Squirtle");

        assert!(run.party().contains(charmander));
        assert!(!run.party().contains(ponyta));
        assert!(run.party().contains(squirtle));
        assert_eq!(run.pokemon_box().len(), 3);
    }

    #[test]
    fn test_join_requires_no_clash() {
        let dex = dex();
        let ctx = StepContext::new(&dex);
        let mut run = run();
        catch_named(&dex, &mut run, "Charmander");
        let ponyta = catch_named(&dex, &mut run, "Ponyta");

        assert!(!UniqueJoinParty.is_relevant(&ctx, &run, run.pokemon(ponyta).unwrap()));
    }

    #[test]
    fn test_replace_targets_the_clash() {
        let dex = dex();
        let ctx = StepContext::new(&dex);
        let mut run = run();
        let charmander = catch_named(&dex, &mut run, "Charmander");
        catch_named(&dex, &mut run, "Squirtle");
        let ponyta = catch_named(&dex, &mut run, "Ponyta");

        let mon = run.pokemon(ponyta).unwrap();
        assert!(UniqueReplace.is_relevant(&ctx, &run, mon));
        assert_eq!(UniqueReplace.options(&ctx, &run, mon).choices, vec![charmander.to_choice()]);

        UniqueReplace.execute(&ctx, &mut run, ponyta, Some(&charmander.to_choice())).unwrap();
        assert!(run.party().contains(ponyta));
        assert!(!run.party().contains(charmander));
    }

    #[test]
    fn test_replace_blocked_by_two_clashes() {
        let dex = dex();
        let ctx = StepContext::new(&dex);
        let mut run = run();
        catch_named(&dex, &mut run, "Ponyta");
        catch_named(&dex, &mut run, "Pidgey");
        let charizard = catch_named(&dex, &mut run, "Charizard");

        assert!(!run.party().contains(charizard));
        assert!(!UniqueReplace.is_relevant(&ctx, &run, run.pokemon(charizard).unwrap()));
    }

    #[test]
    fn test_evolve_filters_clashing_forms() {
        let dex = dex();
        let ctx = StepContext::new(&dex);
        let mut run = run();
        let charmeleon = catch_named(&dex, &mut run, "Charmeleon");
        catch_named(&dex, &mut run, "Pidgey");

        // Charizard would share Flying with Pidgey.
        assert!(!UniqueEvolve.is_relevant(&ctx, &run, run.pokemon(charmeleon).unwrap()));
        assert!(UniqueEvolve.execute(&ctx, &mut run, charmeleon, Some("Charizard")).is_err());
    }
}
