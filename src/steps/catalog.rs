//! Name-to-step lookup with per-variant overrides.

use rustc_hash::FxHashMap;

use super::standard::{ChooseGender, Die, Evolve, JoinParty, LeaveParty, Nickname, ReplacePartyMember};
use super::step::{Step, StepName};

/// Steps available to a variant, keyed by name.
///
/// ## Example
///
/// ```
/// use locke_engine::steps::{StepCatalog, StepName};
///
/// let catalog = StepCatalog::standard();
/// assert!(catalog.get(StepName::Nickname).is_some());
/// assert!(catalog.get(StepName::Pair).is_none());
/// ```
#[derive(Default)]
pub struct StepCatalog {
    steps: FxHashMap<StepName, Box<dyn Step>>,
}

impl StepCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The steps every variant shares.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(Nickname)
            .with(ChooseGender)
            .with(Evolve)
            .with(Die)
            .with(JoinParty)
            .with(LeaveParty)
            .with(ReplacePartyMember)
    }

    /// Builder: install `step`, replacing any step with the same name.
    #[must_use]
    pub fn with(mut self, step: impl Step + 'static) -> Self {
        self.insert(step);
        self
    }

    /// Install `step`, replacing any step with the same name.
    pub fn insert(&mut self, step: impl Step + 'static) {
        self.steps.insert(step.name(), Box::new(step));
    }

    #[must_use]
    pub fn get(&self, name: StepName) -> Option<&dyn Step> {
        self.steps.get(&name).map(|s| &**s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl std::fmt::Debug for StepCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.steps.keys().collect();
        names.sort();
        f.debug_struct("StepCatalog").field("steps", &names).finish()
    }
}
