//! The step abstraction: one creature-level action.
//!
//! A step answers three questions about a creature:
//!
//! - `is_relevant`: may the player take this action right now?
//! - `options`: what input does it need (free text, one of a list, nothing)?
//! - `execute`: apply it, returning which creatures changed.
//!
//! Steps are stateless. Everything they need comes from the run, the
//! creature and a [`StepContext`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CreatureId, Result, ValidationError};
use crate::run::{Pokemon, Run};
use crate::species::GameData;

/// Stable name of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StepName {
    Nickname,
    Gender,
    AssignRole,
    Pair,
    PromotePawn,
    JoinParty,
    LeaveParty,
    ReplacePartyMember,
    Evolve,
    Die,
}

impl StepName {
    /// Every step name.
    pub const ALL: &'static [StepName] = &[
        Self::Nickname,
        Self::Gender,
        Self::AssignRole,
        Self::Pair,
        Self::PromotePawn,
        Self::JoinParty,
        Self::LeaveParty,
        Self::ReplacePartyMember,
        Self::Evolve,
        Self::Die,
    ];

    /// Label shown to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nickname => "Nickname Pokemon",
            Self::Gender => "Gender",
            Self::AssignRole => "Set Role",
            Self::Pair => "Pair Pokemon",
            Self::PromotePawn => "Promote Pawn",
            Self::JoinParty => "Add to Party",
            Self::LeaveParty => "Remove from Party",
            Self::ReplacePartyMember => "Replace Pokemon with Party",
            Self::Evolve => "Evolve Pokemon",
            Self::Die => "Kill Pokemon",
        }
    }
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for StepName {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidChoice {
                field: "step".to_string(),
                value: s.to_string(),
            })
    }
}

/// Kind of input a step takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    FreeText,
    OneOf,
    Nothing,
}

/// Input a step needs, with choices when the kind is `OneOf`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOptions {
    pub kind: InputKind,
    pub choices: Vec<String>,
}

impl StepOptions {
    #[must_use]
    pub fn free_text() -> Self {
        Self {
            kind: InputKind::FreeText,
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn one_of(choices: Vec<String>) -> Self {
        Self {
            kind: InputKind::OneOf,
            choices,
        }
    }

    #[must_use]
    pub fn nothing() -> Self {
        Self {
            kind: InputKind::Nothing,
            choices: Vec::new(),
        }
    }

    /// Whether `value` is one of the offered choices.
    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c == value)
    }
}

/// A step and the steps that must be settled before it is offered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepInfo {
    pub name: StepName,
    pub prerequisites: SmallVec<[StepName; 4]>,
}

impl StepInfo {
    #[must_use]
    pub fn new(name: StepName, prerequisites: &[StepName]) -> Self {
        Self {
            name,
            prerequisites: SmallVec::from_slice(prerequisites),
        }
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunEndCause {
    /// The last party member died.
    PartyWiped,
    /// The role variant's king died.
    KingFallen,
}

/// Result of executing a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The step applied. `updated` lists creatures to persist.
    Applied { updated: Vec<CreatureId> },
    /// The step applied and ended the run.
    RunEnded { cause: RunEndCause, updated: Vec<CreatureId> },
}

impl StepOutcome {
    #[must_use]
    pub fn applied(updated: Vec<CreatureId>) -> Self {
        Self::Applied { updated }
    }

    /// Creatures changed by the step.
    #[must_use]
    pub fn updated(&self) -> &[CreatureId] {
        match self {
            Self::Applied { updated } | Self::RunEnded { updated, .. } => updated,
        }
    }

    #[must_use]
    pub fn is_run_ended(&self) -> bool {
        matches!(self, Self::RunEnded { .. })
    }
}

/// Read-only collaborators a step may consult.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub dex: &'a dyn GameData,
}

impl<'a> StepContext<'a> {
    #[must_use]
    pub fn new(dex: &'a dyn GameData) -> Self {
        Self { dex }
    }
}

impl std::fmt::Debug for StepContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext").finish_non_exhaustive()
    }
}

/// One creature-level action.
///
/// ## Implementation Notes
///
/// - `is_relevant` must be side-effect free; the resolver may call it
///   several times per query.
/// - `execute` must validate its input itself. The manager re-checks
///   relevance before calling it, but `execute` still owns value checks.
/// - A failed `execute` may leave `run` partially modified; callers apply
///   steps to a scratch clone.
pub trait Step: Send + Sync {
    fn name(&self) -> StepName;

    fn is_relevant(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> bool;

    fn options(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> StepOptions;

    fn execute(
        &self,
        ctx: &StepContext<'_>,
        run: &mut Run,
        id: CreatureId,
        value: Option<&str>,
    ) -> Result<StepOutcome>;
}

/// Check that a `OneOf` value was given and is among the step's choices.
pub fn require_choice<'v>(
    step: StepName,
    options: &StepOptions,
    value: Option<&'v str>,
) -> Result<&'v str> {
    let value = value.ok_or_else(|| ValidationError::MissingValue {
        field: step.label().to_string(),
    })?;
    if !options.allows(value) {
        return Err(ValidationError::InvalidChoice {
            field: step.label().to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(value)
}

/// Check that a step that takes no input was given none.
pub fn require_no_value(step: StepName, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.is_empty() => Err(ValidationError::UnexpectedValue { step }.into()),
        _ => Ok(()),
    }
}

/// Parse a creature ID choice.
pub fn parse_creature(step: StepName, value: &str) -> Result<CreatureId> {
    CreatureId::parse_choice(value).ok_or_else(|| {
        ValidationError::InvalidChoice {
            field: step.label().to_string(),
            value: value.to_string(),
        }
        .into()
    })
}
