//! Role variant.
//!
//! Every creature takes a chess role before it may join the party. Roles
//! have quotas counted over the whole box, the party holds at most one
//! creature per role, and the starter is the King: it never leaves the
//! party and its death ends the run.
//!
//! ## Roles
//!
//! | Role   | Quota | Restriction            |
//! |--------|-------|------------------------|
//! | King   | 1     | the starter only       |
//! | Queen  | 1     | female only            |
//! | Bishop | 2     |                        |
//! | Knight | 2     |                        |
//! | Rook   | 2     |                        |
//! | Pawn   | 8     | base forms, no evolving|
//!
//! A pawn may later be promoted to any role but King or Pawn. Quotas count
//! the first role ever assigned, so a promoted pawn still uses a pawn slot.

use tracing::{debug, warn};

use crate::core::{CreatureId, Result, ValidationError};
use crate::run::{Pokemon, Run};
use crate::species::attributes::labelled_enum;
use crate::species::Gender;
use crate::steps::standard::{swap_party_member, Die, Evolve, JoinParty, LeaveParty, ReplacePartyMember};
use crate::steps::step::{parse_creature, require_choice};
use crate::steps::{RunEndCause, Step, StepContext, StepName, StepOptions, StepOutcome};

/// Creatures a run may ever catch, the starter included.
pub const CHESS_PIECE_LIMIT: usize = 16;

labelled_enum! {
    /// Chess role of a creature.
    ChessRole, "role" {
        King => "King",
        Queen => "Queen",
        Bishop => "Bishop",
        Knight => "Knight",
        Rook => "Rook",
        Pawn => "Pawn",
    }
}

impl ChessRole {
    /// How many creatures may ever hold this role.
    #[must_use]
    pub const fn quota(self) -> usize {
        match self {
            Self::King | Self::Queen => 1,
            Self::Bishop | Self::Knight | Self::Rook => 2,
            Self::Pawn => 8,
        }
    }

    /// Roles a pawn may be promoted to.
    pub const PROMOTIONS: &'static [ChessRole] = &[Self::Queen, Self::Bishop, Self::Knight, Self::Rook];
}

fn role_labels(roles: impl IntoIterator<Item = ChessRole>) -> Vec<String> {
    roles.into_iter().map(|r| r.label().to_string()).collect()
}

fn parse_role(step: StepName, value: &str) -> Result<ChessRole> {
    value.parse().map_err(|_| {
        ValidationError::InvalidChoice {
            field: step.label().to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

fn is_base_form(ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
    let base = run
        .pool
        .get(&pokemon.name)
        .map(|entry| entry.base.clone())
        .or_else(|| ctx.dex.base_of(&pokemon.name, run.gen));
    base.map_or(true, |b| b == pokemon.name)
}

/// Roles still under quota, counted on first-assigned roles across the box.
#[must_use]
pub fn open_roles(run: &Run) -> Vec<ChessRole> {
    ChessRole::ALL
        .iter()
        .copied()
        .filter(|&role| role != ChessRole::King)
        .filter(|&role| {
            let taken = run
                .pokemon_box()
                .iter()
                .filter(|p| p.metadata.original_role == Some(role))
                .count();
            taken < role.quota()
        })
        .collect()
}

/// Party member other than `pokemon` currently holding `role`.
fn party_holder(run: &Run, pokemon: &Pokemon, role: ChessRole) -> Option<CreatureId> {
    run.party_members()
        .find(|m| m.id() != pokemon.id() && m.metadata.role == Some(role))
        .map(Pokemon::id)
}

/// Box only; the first creature (the starter) also starts the party.
pub fn catch(run: &mut Run, pokemon: Pokemon) -> Result<CreatureId> {
    if run.pokemon_box().len() >= CHESS_PIECE_LIMIT {
        return Err(ValidationError::CatchLimitReached { limit: CHESS_PIECE_LIMIT }.into());
    }
    let id = run.add_to_box(pokemon)?;
    if run.party().is_empty() {
        run.add_to_party(id)?;
    }
    Ok(id)
}

/// Give a creature its first role.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssignRole;

impl AssignRole {
    fn allowed(ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> Vec<ChessRole> {
        if run.starter() == Some(pokemon.id()) {
            return vec![ChessRole::King];
        }
        let female = pokemon.metadata.gender == Some(Gender::Female);
        let base = is_base_form(ctx, run, pokemon);
        open_roles(run)
            .into_iter()
            .filter(|&role| match role {
                ChessRole::Queen => female,
                ChessRole::Pawn => base,
                _ => true,
            })
            .collect()
    }
}

impl Step for AssignRole {
    fn name(&self) -> StepName {
        StepName::AssignRole
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, _run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive() && pokemon.metadata.role.is_none() && pokemon.metadata.gender.is_some()
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(role_labels(Self::allowed(ctx, run, pokemon)))
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        let role = parse_role(self.name(), require_choice(self.name(), &options, value)?)?;
        let metadata = &mut run.pokemon_mut(id)?.metadata;
        metadata.role = Some(role);
        if metadata.original_role.is_none() {
            metadata.original_role = Some(role);
        }
        debug!(creature = %id, role = %role, "role assigned");
        Ok(StepOutcome::applied(vec![id]))
    }
}

/// Promote a pawn to a major role.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromotePawn;

impl PromotePawn {
    fn allowed(run: &Run, pokemon: &Pokemon) -> Vec<ChessRole> {
        let female = pokemon.metadata.gender == Some(Gender::Female);
        let in_party = run.party().contains(pokemon.id());
        ChessRole::PROMOTIONS
            .iter()
            .copied()
            .filter(|&role| role != ChessRole::Queen || female)
            .filter(|&role| !in_party || party_holder(run, pokemon, role).is_none())
            .collect()
    }
}

impl Step for PromotePawn {
    fn name(&self) -> StepName {
        StepName::PromotePawn
    }

    fn is_relevant(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        pokemon.is_alive()
            && pokemon.metadata.role == Some(ChessRole::Pawn)
            && !Self::allowed(run, pokemon).is_empty()
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(role_labels(Self::allowed(run, pokemon)))
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        let options = self.options(ctx, run, run.pokemon(id)?);
        let role = parse_role(self.name(), require_choice(self.name(), &options, value)?)?;
        run.pokemon_mut(id)?.metadata.role = Some(role);
        debug!(creature = %id, role = %role, "pawn promoted");
        Ok(StepOutcome::applied(vec![id]))
    }
}

/// Join only with a role no party member holds.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessJoinParty;

impl Step for ChessJoinParty {
    fn name(&self) -> StepName {
        StepName::JoinParty
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        JoinParty.is_relevant(ctx, run, pokemon)
            && pokemon
                .metadata
                .role
                .is_some_and(|role| party_holder(run, pokemon, role).is_none())
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

/// Leave, unless the creature is the King.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessLeaveParty;

impl Step for ChessLeaveParty {
    fn name(&self) -> StepName {
        StepName::LeaveParty
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        LeaveParty.is_relevant(ctx, run, pokemon) && pokemon.metadata.role != Some(ChessRole::King)
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
        if run.pokemon(id)?.metadata.role == Some(ChessRole::King) {
            return Err(ValidationError::PinnedPartyMember(id).into());
        }
        LeaveParty.execute(ctx, run, id, value)
    }
}

/// Swap in for the party member holding the same role, or for any
/// non-King member when the role is free.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessReplace;

impl ChessReplace {
    fn outgoing(run: &Run, pokemon: &Pokemon) -> Vec<CreatureId> {
        let Some(role) = pokemon.metadata.role else {
            return Vec::new();
        };
        if let Some(holder) = party_holder(run, pokemon, role) {
            return vec![holder];
        }
        run.party_members()
            .filter(|m| m.metadata.role != Some(ChessRole::King))
            .map(Pokemon::id)
            .collect()
    }
}

impl Step for ChessReplace {
    fn name(&self) -> StepName {
        StepName::ReplacePartyMember
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        ReplacePartyMember.is_relevant(ctx, run, pokemon) && !Self::outgoing(run, pokemon).is_empty()
    }

    fn options(&self, _ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        StepOptions::one_of(Self::outgoing(run, pokemon).into_iter().map(CreatureId::to_choice).collect())
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

/// Evolve, unless the creature is a pawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessEvolve;

impl Step for ChessEvolve {
    fn name(&self) -> StepName {
        StepName::Evolve
    }

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool {
        Evolve.is_relevant(ctx, run, pokemon) && pokemon.metadata.role != Some(ChessRole::Pawn)
    }

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions {
        Evolve.options(ctx, run, pokemon)
    }

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome> {
        Evolve.execute(ctx, run, id, value)
    }
}

/// Die; the King's death ends the run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessDie;

impl Step for ChessDie {
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
        let king = run.pokemon(id)?.metadata.role == Some(ChessRole::King);
        let outcome = Die.execute(ctx, run, id, value)?;
        if king {
            warn!(creature = %id, "king fell");
            return Ok(StepOutcome::RunEnded {
                cause: RunEndCause::KingFallen,
                updated: outcome.updated().to_vec(),
            });
        }
        Ok(outcome)
    }
}
