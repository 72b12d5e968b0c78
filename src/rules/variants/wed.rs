//! Pairing variant.
//!
//! Creatures are paired with a partner of the opposite gender. Partners
//! move between box and party together, and a party holds at most
//! [`WED_PAIR_SLOTS`] pairs (an unpaired member takes a slot of its own).
//! Catches go to the box; the dedicated [`PairPokemon`] step is what brings
//! a new creature into the party alongside its partner.

use tracing::debug;

use crate::core::{CreatureId, Result, ValidationError};
use crate::run::{Pokemon, Run};
use crate::species::Gender;
use crate::steps::standard::{reshape_party, Die, JoinParty, LeaveParty, ReplacePartyMember};
use crate::steps::step::{parse_creature, require_choice, require_no_value};
use crate::steps::{Step, StepContext, StepName, StepOptions, StepOutcome};

/// Pairs a party may hold.
pub const WED_PAIR_SLOTS: usize = 3;

fn partner_of(run: &Run, id: CreatureId) -> Option<CreatureId> {
    run.pokemon(id).ok().and_then(|p| p.metadata.partner)
}

/// Party slots in use, counting a pair as one.
#[must_use]
pub fn pair_slots_used(run: &Run) -> usize {
    let ids = run.party().ids();
    ids.iter()
        .filter(|&&id| match partner_of(run, id) {
            Some(partner) if ids.contains(&partner) => id < partner,
            _ => true,
        })
        .count()
}

/// `id` plus its living partner, if the partner is not already in the party.
fn joining_group(run: &Run, id: CreatureId) -> Vec<CreatureId> {
    let mut group = vec![id];
    if let Some(partner) = partner_of(run, id) {
        let alive = run.pokemon(partner).is_ok_and(Pokemon::is_alive);
        if alive && !run.party().contains(partner) {
            group.push(partner);
        }
    }
    group
}

/// `id` plus its partner, if the partner is in the party.
fn leaving_group(run: &Run, id: CreatureId) -> Vec<CreatureId> {
    let mut group = vec![id];
    if let Some(partner) = partner_of(run, id).filter(|p| run.party().contains(*p)) {
        group.push(partner);
    }
    group
}

/// Unpaired living box members of the opposite gender.
fn candidates(run: &Run, pokemon: &Pokemon) -> Vec<CreatureId> {
    let Some(wanted) = pokemon.metadata.gender.and_then(Gender::opposite) else {
        return Vec::new();
    };
    run.pokemon_box()
        .alive()
        .filter(|p| {
            p.id() != pokemon.id() && p.metadata.partner.is_none() && p.metadata.gender == Some(wanted)
        })
        .map(Pokemon::id)
        .collect()
}

/// Box only; the first creature of the run starts the party.
pub fn catch(run: &mut Run, pokemon: Pokemon) -> Result<CreatureId> {
    let id = run.add_to_box(pokemon)?;
    if run.party().is_empty() {
        run.add_to_party(id)?;
    }
    Ok(id)
}

/// Pair two unpaired creatures of opposite genders.
#[derive(Clone, Copy, Debug, Default)]
pub struct PairPokemon;

impl Step for PairPokemon {
    fn name(&self) -> StepName {
        StepName::Pair
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive() && pokemon.metadata.partner.is_none() && !candidates(run, pokemon).is_empty()
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(candidates(run, pokemon).into_iter().map(CreatureId::to_choice).collect())
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        let partner = parse_creature(self.name(), require_choice(self.name(), &options, value)?)?;
        if partner == id {
            return Err(ValidationError::InvalidPair { creature: id, partner }.into());
        }

        run.pokemon_mut(id)?.metadata.partner = Some(partner);
        run.pokemon_mut(partner)?.metadata.partner = Some(id);

        match (run.party().contains(id), run.party().contains(partner)) {
            (true, false) => run.add_to_party(partner)?,
            (false, true) => run.add_to_party(id)?,
            _ => {}
        }
        debug!(creature = %id, partner = %partner, "paired");
        Ok(StepOutcome::applied(vec![id, partner]))
    }
}

/// Join together with the partner, if a pair slot is free.
#[derive(Clone, Copy, Debug, Default)]
pub struct WedJoinParty;

impl Step for WedJoinParty {
    fn name(&self) -> StepName {
        StepName::JoinParty
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        JoinParty.is_relevant(ctx, run, pokemon)
            && pair_slots_used(run) < WED_PAIR_SLOTS
            && joining_group(run, pokemon.id()).len() <= run.party().free_slots()
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        JoinParty.options(ctx, run, pokemon)
    }

    fn execute(
        &self,
        _ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        require_no_value(self.name(), value)?;
        if pair_slots_used(run) >= WED_PAIR_SLOTS {
            return Err(ValidationError::PartyFull.into());
        }
        let group = joining_group(run, id);
        reshape_party(run, &[], &group)?;
        Ok(StepOutcome::applied(vec![]))
    }
}

/// Leave together with the partner, as long as another pair remains.
#[derive(Clone, Copy, Debug, Default)]
pub struct WedLeaveParty;

impl Step for WedLeaveParty {
    fn name(&self) -> StepName {
        StepName::LeaveParty
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        LeaveParty.is_relevant(ctx, run, pokemon) && pair_slots_used(run) > 1
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        LeaveParty.options(ctx, run, pokemon)
    }

    fn execute(
        &self,
        _ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        require_no_value(self.name(), value)?;
        let group = leaving_group(run, id);
        reshape_party(run, &group, &[])?;
        Ok(StepOutcome::applied(vec![]))
    }
}

/// Swap a pair (or single) in the box with one in the party.
#[derive(Clone, Copy, Debug, Default)]
pub struct WedReplace;

impl Step for WedReplace {
    fn name(&self) -> StepName {
        StepName::ReplacePartyMember
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        ReplacePartyMember.is_relevant(ctx, run, pokemon)
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        ReplacePartyMember.options(ctx, run, pokemon)
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
        let leaving = leaving_group(run, outgoing);
        let joining = joining_group(run, id);
        reshape_party(run, &leaving, &joining)?;
        Ok(StepOutcome::applied(vec![]))
    }
}

/// Die and leave the partner unpaired.
#[derive(Clone, Copy, Debug, Default)]
pub struct WedDie;

impl Step for WedDie {
    fn name(&self) -> StepName {
        StepName::Die
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        Die.is_relevant(ctx, run, pokemon)
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        Die.options(ctx, run, pokemon)
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let partner = partner_of(run, id);
        let mut outcome = Die.execute(ctx, run, id, value)?;

        if let Some(partner) = partner {
            run.pokemon_mut(id)?.metadata.partner = None;
            run.pokemon_mut(partner)?.metadata.partner = None;
            match &mut outcome {
                StepOutcome::Applied { updated } | StepOutcome::RunEnded { updated, .. } => {
                    updated.push(partner);
                }
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RunId, RunSettings};
    use crate::rules::LockeConfig;
    use crate::species::{Game, Pokedex, PokemonType, Region, Species};

    /// Run with alternating male/female boxed creatures; the first is in the party.
    fn run_with(n: u32) -> Run {
        let game = Game::new("Gold", 2, Region::Johto);
        let mut run = Run::new(RunId::new("w"), "w", &game, LockeConfig::Wed, RunSettings::new()).unwrap();
        let species = Species::new("Sentret", 2, &[PokemonType::Normal]);
        for i in 0..n {
            let mut mon = run.create_pokemon(&species);
            mon.metadata.gender = Some(if i % 2 == 0 { Gender::Male } else { Gender::Female });
            catch(&mut run, mon).unwrap();
        }
        run
    }

    #[test]
    fn test_catch_boxes_after_first() {
        let run = run_with(3);
        assert_eq!(run.party().ids(), &[CreatureId(0)]);
        assert_eq!(run.pokemon_box().len(), 3);
    }

    #[test]
    fn test_pair_pulls_partner_into_party() {
        let dex = Pokedex::new();
        let ctx = StepContext::new(&dex);
        let mut run = run_with(4);

        let options = PairPokemon.options(&ctx, &run, run.pokemon(CreatureId(0)).unwrap());
        assert_eq!(options.choices, vec!["1", "3"]);

        let outcome = PairPokemon.execute(&ctx, &mut run, CreatureId(0), Some("1")).unwrap();
        assert_eq!(outcome.updated(), &[CreatureId(0), CreatureId(1)]);
        assert!(run.party().contains(CreatureId(1)));
        assert_eq!(pair_slots_used(&run), 1);
        assert!(!PairPokemon.is_relevant(&ctx, &run, run.pokemon(CreatureId(0)).unwrap()));
    }

    #[test]
    fn test_same_gender_cannot_pair() {
        let dex = Pokedex::new();
        let ctx = StepContext::new(&dex);
        let mut run = run_with(4);
        assert!(PairPokemon.execute(&ctx, &mut run, CreatureId(0), Some("2")).is_err());
    }

    #[test]
    fn test_join_and_leave_as_pair() {
        let dex = Pokedex::new();
        let ctx = StepContext::new(&dex);
        let mut run = run_with(4);
        PairPokemon.execute(&ctx, &mut run, CreatureId(2), Some("3")).unwrap();

        assert!(WedJoinParty.is_relevant(&ctx, &run, run.pokemon(CreatureId(2)).unwrap()));
        WedJoinParty.execute(&ctx, &mut run, CreatureId(2), None).unwrap();
        assert_eq!(run.party().len(), 3);
        assert_eq!(pair_slots_used(&run), 2);

        WedLeaveParty.execute(&ctx, &mut run, CreatureId(3), None).unwrap();
        assert_eq!(run.party().ids(), &[CreatureId(0)]);
        assert!(!WedLeaveParty.is_relevant(&ctx, &run, run.pokemon(CreatureId(0)).unwrap()));
    }

    #[test]
    fn test_three_pair_limit() {
        let dex = Pokedex::new();
        let ctx = StepContext::new(&dex);
        let mut run = run_with(8);
        PairPokemon.execute(&ctx, &mut run, CreatureId(0), Some("1")).unwrap();
        for (a, b) in [(2, 3), (4, 5), (6, 7)] {
            PairPokemon
                .execute(&ctx, &mut run, CreatureId(a), Some(b.to_string().as_str()))
                .unwrap();
        }
        WedJoinParty.execute(&ctx, &mut run, CreatureId(2), None).unwrap();
        WedJoinParty.execute(&ctx, &mut run, CreatureId(4), None).unwrap();

        assert_eq!(pair_slots_used(&run), 3);
        assert!(!WedJoinParty.is_relevant(&ctx, &run, run.pokemon(CreatureId(6)).unwrap()));
    }

    #[test]
    fn test_replace_swaps_pairs() {
        let dex = Pokedex::new();
        let ctx = StepContext::new(&dex);
        let mut run = run_with(4);
        PairPokemon.execute(&ctx, &mut run, CreatureId(0), Some("1")).unwrap();
        PairPokemon.execute(&ctx, &mut run, CreatureId(2), Some("3")).unwrap();

        WedReplace.execute(&ctx, &mut run, CreatureId(2), Some("0")).unwrap();
        let mut party = run.party().ids().to_vec();
        party.sort();
        assert_eq!(party, vec![CreatureId(2), CreatureId(3)]);
    }

    #[test]
    fn test_death_unpairs() {
        let dex = Pokedex::new();
        let ctx = StepContext::new(&dex);
        let mut run = run_with(2);
        PairPokemon.execute(&ctx, &mut run, CreatureId(0), Some("1")).unwrap();

        let outcome = WedDie.execute(&ctx, &mut run, CreatureId(1), None).unwrap();
        assert_eq!(outcome.updated(), &[CreatureId(1), CreatureId(0)]);
        assert!(run.pokemon(CreatureId(0)).unwrap().metadata.partner.is_none());
        assert!(run.pokemon(CreatureId(1)).unwrap().metadata.partner.is_none());
    }
}
