//! Rolling-window variant.
//!
//! Every catch gets a capture index. Once the party is full:
//!
//! - the two lowest-index members are pinned (the first caught),
//! - the two highest-index members are pinned (the latest caught),
//! - a new catch displaces the second-newest member, so the newest two
//!   always stay and the window rolls forward.
//!
//! The two middle slots are the player's to manage.

use crate::core::{CreatureId, Result, ValidationError};
use crate::run::{Pokemon, Run};
use crate::steps::standard::{swap_party_member, LeaveParty, ReplacePartyMember};
use crate::steps::step::{parse_creature, require_choice};
use crate::steps::{Step, StepContext, StepName, StepOptions, StepOutcome};

/// Members pinned at each end of the window.
pub const WRAP_PINNED: usize = 2;

/// Party IDs ordered by capture index, oldest first.
#[must_use]
pub fn sorted_party(run: &Run) -> Vec<CreatureId> {
    let mut members: Vec<&Pokemon> = run.party_members().collect();
    members.sort_by_key(|p| (p.metadata.capture_index.unwrap_or(u32::MAX), p.id()));
    members.into_iter().map(Pokemon::id).collect()
}

/// Party members that may not leave.
#[must_use]
pub fn pinned(run: &Run) -> Vec<CreatureId> {
    let sorted = sorted_party(run);
    if sorted.len() <= 2 * WRAP_PINNED {
        return sorted;
    }
    let mut pinned = sorted[..WRAP_PINNED].to_vec();
    pinned.extend_from_slice(&sorted[sorted.len() - WRAP_PINNED..]);
    pinned
}

/// Party members between the pinned ends.
#[must_use]
pub fn free_members(run: &Run) -> Vec<CreatureId> {
    let sorted = sorted_party(run);
    if sorted.len() <= 2 * WRAP_PINNED {
        return Vec::new();
    }
    sorted[WRAP_PINNED..sorted.len() - WRAP_PINNED].to_vec()
}

/// Index the catch, box it, and roll the window if the party is full.
pub fn catch(run: &mut Run, mut pokemon: Pokemon) -> Result<CreatureId> {
    pokemon.metadata.capture_index = Some(run.next_capture_index());
    let id = run.add_to_box(pokemon)?;

    if !run.party().is_full() {
        run.add_to_party(id)?;
        return Ok(id);
    }

    let sorted = sorted_party(run);
    if let Some(&displaced) = sorted.get(sorted.len().saturating_sub(WRAP_PINNED)) {
        run.remove_from_party(displaced)?;
        run.add_to_party(id)?;
    }
    Ok(id)
}

/// Leave, except for pinned members.
#[derive(Clone, Copy, Debug, Default)]
pub struct WrapLeaveParty;

impl Step for WrapLeaveParty {
    fn name(&self) -> StepName {
        StepName::LeaveParty
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        LeaveParty.is_relevant(ctx, run, pokemon) && !pinned(run).contains(&pokemon.id())
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        LeaveParty.options(ctx, run, pokemon)
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        if pinned(run).contains(&id) {
            return Err(ValidationError::PinnedPartyMember(id).into());
        }
        LeaveParty.execute(ctx, run, id, value)
    }
}

/// Replace one of the free middle members.
#[derive(Clone, Copy, Debug, Default)]
pub struct WrapReplace;

impl Step for WrapReplace {
    fn name(&self) -> StepName {
        StepName::ReplacePartyMember
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        ReplacePartyMember.is_relevant(ctx, run, pokemon) && !free_members(run).is_empty()
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, _pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(free_members(run).into_iter().map(CreatureId::to_choice).collect())
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
