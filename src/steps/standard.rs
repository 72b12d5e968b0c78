//! Steps every variant starts from.
//!
//! Variants that need different behavior wrap these (see
//! [`rules::variants`](crate::rules::variants)) rather than copy them, so
//! the base checks always apply.

use tracing::debug;

use crate::core::{CreatureId, Result, ValidationError};
use crate::run::{Pokemon, Run};
use crate::species::Gender;

use super::step::{
    parse_creature, require_choice, require_no_value, RunEndCause, Step, StepContext, StepName,
    StepOptions, StepOutcome,
};

/// Evolution targets of `pokemon` that the run's pool allows.
#[must_use]
pub fn evolution_targets(run: &Run, pokemon: &Pokemon) -> Vec<String> {
    pokemon
        .evolves_to
        .iter()
        .filter(|name| run.pool.contains(name))
        .cloned()
        .collect()
}

/// Put `incoming` in the party in place of `outgoing`.
///
/// With a full party the outgoing member leaves first; otherwise the
/// incoming one joins first so the party is never empty.
pub fn swap_party_member(run: &mut Run, incoming: CreatureId, outgoing: CreatureId) -> Result<()> {
    if run.party().is_full() {
        run.remove_from_party(outgoing)?;
        run.add_to_party(incoming)
    } else {
        run.add_to_party(incoming)?;
        run.remove_from_party(outgoing)
    }
}

/// Remove `leaving` from the party and add `joining`, in an order that never
/// overfills or empties it.
///
/// Fails up front if the resulting party would be empty or too large.
pub fn reshape_party(run: &mut Run, leaving: &[CreatureId], joining: &[CreatureId]) -> Result<()> {
    let kept = run.party().ids().iter().filter(|id| !leaving.contains(*id)).count();
    let added = joining.iter().filter(|id| !run.party().contains(**id)).count();
    if kept + added > crate::core::PARTY_SIZE {
        return Err(ValidationError::PartyFull.into());
    }
    if kept + added == 0 {
        if let Some(&last) = leaving.first() {
            return Err(ValidationError::LastPartyMember(last).into());
        }
    }

    let mut joining: Vec<CreatureId> = joining
        .iter()
        .copied()
        .filter(|id| !run.party().contains(*id))
        .collect();
    let mut leaving: Vec<CreatureId> = leaving
        .iter()
        .copied()
        .filter(|id| run.party().contains(*id))
        .collect();

    loop {
        if !run.party().is_full() {
            if let Some(id) = joining.pop() {
                run.add_to_party(id)?;
                continue;
            }
        }
        match leaving.pop() {
            Some(id) => run.remove_from_party(id)?,
            None if joining.is_empty() => return Ok(()),
            None => return Err(ValidationError::PartyFull.into()),
        }
    }
}

/// Give the creature a nickname. Names are unique within a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nickname;

impl Step for Nickname {
    fn name(&self) -> StepName {
        StepName::Nickname
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, _run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.metadata.nickname.is_none()
    }

    fn options(&self, _ctx: &StepContext<'_>, _run: &Run, _pokemon: &Pokemon) -> StepOptions {
        StepOptions::free_text()
    }

    fn execute(
        &self,
        _ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let nickname = value.map(str::trim).unwrap_or_default();
        if nickname.is_empty() {
            return Err(ValidationError::EmptyNickname.into());
        }
        if run.nickname_taken(nickname, id) {
            return Err(ValidationError::NicknameTaken(nickname.to_string()).into());
        }
        run.pokemon_mut(id)?.metadata.nickname = Some(nickname.to_string());
        Ok(StepOutcome::applied(vec![id]))
    }
}

/// Record the creature's gender, from those its species supports.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChooseGender;

impl Step for ChooseGender {
    fn name(&self) -> StepName {
        StepName::Gender
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, _run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.metadata.gender.is_none()
    }

    fn options(&self, _ctx: &StepContext<'_>, _run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(pokemon.genders.iter().map(ToString::to_string).collect())
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        let value = require_choice(self.name(), &options, value)?;
        let gender: Gender = value.parse().map_err(|_| ValidationError::InvalidChoice {
            field: self.name().label().to_string(),
            value: value.to_string(),
        })?;
        run.pokemon_mut(id)?.metadata.gender = Some(gender);
        Ok(StepOutcome::applied(vec![id]))
    }
}

/// Evolve into one of the forms the pool allows.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evolve;

impl Step for Evolve {
    fn name(&self) -> StepName {
        StepName::Evolve
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive() && !evolution_targets(run, pokemon).is_empty()
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(evolution_targets(run, pokemon))
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        let target = require_choice(self.name(), &options, value)?;
        let species = ctx.dex.species(target, run.gen)?;
        run.pokemon_mut(id)?.evolve_into(species);
        debug!(creature = %id, into = target, "evolved");
        Ok(StepOutcome::applied(vec![id]))
    }
}

/// Mark the creature dead and take it out of the party.
///
/// Killing the only party member ends the run.
#[derive(Clone, Copy, Debug, Default)]
pub struct Die;

impl Step for Die {
    fn name(&self) -> StepName {
        StepName::Die
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, _run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive()
    }

    fn options(&self, _ctx: &StepContext<'_>, _run: &Run, _pokemon: &Pokemon) -> StepOptions {
        StepOptions::nothing()
    }

    fn execute(
        &self,
        _ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        require_no_value(self.name(), value)?;
        let pokemon = run.pokemon_mut(id)?;
        if !pokemon.is_alive() {
            return Err(ValidationError::CreatureDead(id).into());
        }
        pokemon.kill();

        if run.party().contains(id) {
            if run.party().is_last_member(id) {
                return Ok(StepOutcome::RunEnded {
                    cause: RunEndCause::PartyWiped,
                    updated: vec![id],
                });
            }
            run.remove_from_party(id)?;
        }
        Ok(StepOutcome::applied(vec![id]))
    }
}

/// Move a boxed creature into a party with room.
#[derive(Clone, Copy, Debug, Default)]
pub struct JoinParty;

impl Step for JoinParty {
    fn name(&self) -> StepName {
        StepName::JoinParty
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive() && !run.party().is_full() && !run.party().contains(pokemon.id())
    }

    fn options(&self, _ctx: &StepContext<'_>, _run: &Run, _pokemon: &Pokemon) -> StepOptions {
        StepOptions::nothing()
    }

    fn execute(
        &self,
        _ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        require_no_value(self.name(), value)?;
        run.add_to_party(id)?;
        Ok(StepOutcome::applied(vec![]))
    }
}

/// Send a party member back to the box.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeaveParty;

impl Step for LeaveParty {
    fn name(&self) -> StepName {
        StepName::LeaveParty
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        run.party().contains(pokemon.id()) && !run.party().is_last_member(pokemon.id())
    }

    fn options(&self, _ctx: &StepContext<'_>, _run: &Run, _pokemon: &Pokemon) -> StepOptions {
        StepOptions::nothing()
    }

    fn execute(
        &self,
        _ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        require_no_value(self.name(), value)?;
        run.remove_from_party(id)?;
        Ok(StepOutcome::applied(vec![]))
    }
}

/// Swap a boxed creature with a chosen party member.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplacePartyMember;

impl ReplacePartyMember {
    /// Party IDs as choice strings.
    #[must_use]
    pub fn party_choices(run: &Run) -> Vec<String> {
        run.party().ids().iter().map(|id| id.to_choice()).collect()
    }
}

impl Step for ReplacePartyMember {
    fn name(&self) -> StepName {
        StepName::ReplacePartyMember
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive() && !run.party().is_empty() && !run.party().contains(pokemon.id())
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, _pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(Self::party_choices(run))
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
