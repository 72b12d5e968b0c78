//! The run-creation wizard.

use tracing::{debug, info};

use crate::core::{Result, RunId, RunSettings, SeededRng, ValidationError};
use crate::rules::variants::{family, star, Representatives};
use crate::rules::{Locke, LockeConfig, LockeKind};
use crate::run::Run;
use crate::species::{Category, Color, GameData, LegCount, PokemonType};

use super::key::{Progress, WizardKey};
use super::pool::compute_pool;

/// Collects a variant's configuration one answer at a time, then builds
/// the run.
///
/// ## Flow
///
/// 1. `InnerLocke` (meta-variant only)
/// 2. `Game`, from games the variant supports
/// 3. Variant-specific keys (a type, color, category or leg count; or the
///    representative picks of the type-representative variant)
///
/// Each call to [`submit`](Self::submit) must answer the key the wizard is
/// currently asking for, with one of the offered options.
#[derive(Clone, Debug)]
pub struct RunCreator {
    name: String,
    kind: LockeKind,
    settings: RunSettings,
    finished: bool,

    // === Answers ===
    inner: Option<LockeKind>,
    game: Option<String>,
    mono: Option<PokemonType>,
    color: Option<Color>,
    category: Option<Category>,
    legs: Option<LegCount>,
    representatives: Representatives,
    star_starter: Option<String>,
    star_team: Vec<String>,
}

impl RunCreator {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: LockeKind, settings: RunSettings) -> Self {
        Self {
            name: name.into(),
            kind,
            settings,
            finished: false,
            inner: None,
            game: None,
            mono: None,
            color: None,
            category: None,
            legs: None,
            representatives: Representatives::new(),
            star_starter: None,
            star_team: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> LockeKind {
        self.kind
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The kind whose rules will apply: the inner kind for the meta-variant.
    fn effective_kind(&self) -> Option<LockeKind> {
        match self.kind {
            LockeKind::Gen => self.inner,
            kind => Some(kind),
        }
    }

    fn game_gen(&self, dex: &dyn GameData) -> Result<Option<u8>> {
        match &self.game {
            Some(name) => Ok(Some(dex.game(name)?.gen)),
            None => Ok(None),
        }
    }

    fn star_team_size(&self) -> usize {
        usize::from(star::STAR_TEAM_SIZE).min(self.representatives.len().saturating_sub(1))
    }

    /// What the wizard needs next.
    pub fn progress(&self, dex: &dyn GameData) -> Result<Progress> {
        if self.finished {
            return Ok(Progress::Complete);
        }

        let Some(kind) = self.effective_kind() else {
            return Ok(needs(
                WizardKey::InnerLocke,
                LockeKind::inner_candidates().map(|k| k.name().to_string()),
            ));
        };

        let Some(gen) = self.game_gen(dex)? else {
            let games = dex.games_from_generation(kind.min_gen());
            return Ok(needs(WizardKey::Game, games.into_iter().map(|g| g.name.clone())));
        };

        let progress = match kind {
            LockeKind::Mono if self.mono.is_none() => needs(
                WizardKey::MonoType,
                PokemonType::for_generation(gen).into_iter().map(|t| t.to_string()),
            ),
            LockeKind::Color if self.color.is_none() => {
                needs(WizardKey::Color, Color::ALL.iter().map(ToString::to_string))
            }
            LockeKind::Category if self.category.is_none() => {
                needs(WizardKey::Category, Category::ALL.iter().map(ToString::to_string))
            }
            LockeKind::Leg if self.legs.is_none() => {
                needs(WizardKey::Legs, LegCount::ALL.iter().map(ToString::to_string))
            }
            LockeKind::Star => self.star_progress(dex, gen),
            _ => Progress::Complete,
        };
        Ok(progress)
    }

    fn star_progress(&self, dex: &dyn GameData, gen: u8) -> Progress {
        if let Some((ty, candidates)) = star::next_missing_type(dex, gen, &self.representatives) {
            return needs(WizardKey::StarType(ty), candidates);
        }

        let remaining = self
            .representatives
            .values()
            .filter(|name| self.star_starter.as_ref() != Some(*name) && !self.star_team.contains(*name))
            .cloned();

        if self.star_starter.is_none() {
            return needs(WizardKey::StarStarter, remaining);
        }
        if self.star_team.len() < self.star_team_size() {
            // Team slots are numbered from 1.
            let slot = u8::try_from(self.star_team.len() + 1).unwrap_or(u8::MAX);
            return needs(WizardKey::StarTeam(slot), remaining);
        }
        Progress::Complete
    }

    /// Answer the key currently asked for.
    pub fn submit(&mut self, dex: &dyn GameData, key: WizardKey, value: &str) -> Result<Progress> {
        let (expected, options) = match self.progress(dex)? {
            Progress::Complete => return Err(ValidationError::CreationComplete.into()),
            Progress::NeedsInput { key, options } => (key, options),
        };
        if key != expected {
            return Err(ValidationError::UnexpectedKey { expected, got: key }.into());
        }
        let value = value.trim();
        let Some(choice) = options.iter().find(|o| o.eq_ignore_ascii_case(value)).cloned() else {
            return Err(invalid(key, value).into());
        };

        match key {
            WizardKey::InnerLocke => self.inner = Some(parse(key, &choice)?),
            WizardKey::Game => self.game = Some(choice.clone()),
            WizardKey::MonoType => self.mono = Some(parse(key, &choice)?),
            WizardKey::Color => self.color = Some(parse(key, &choice)?),
            WizardKey::Category => self.category = Some(parse(key, &choice)?),
            WizardKey::Legs => self.legs = Some(parse(key, &choice)?),
            WizardKey::StarType(ty) => {
                self.representatives.insert(ty, choice.clone());
            }
            WizardKey::StarStarter => self.star_starter = Some(choice.clone()),
            WizardKey::StarTeam(_) => self.star_team.push(choice.clone()),
        }
        debug!(run = %self.name, key = %key, value = %choice, "wizard answer");
        self.progress(dex)
    }

    /// Answer the current key with a seeded random pick.
    pub fn submit_random(&mut self, dex: &dyn GameData, rng: &mut SeededRng) -> Result<Progress> {
        let (key, options) = match self.progress(dex)? {
            Progress::Complete => return Err(ValidationError::CreationComplete.into()),
            Progress::NeedsInput { key, options } => (key, options),
        };
        let Some(choice) = rng.choose(&options).cloned() else {
            return Err(ValidationError::CreationIncomplete(key).into());
        };
        self.submit(dex, key, &choice)
    }

    /// The configuration collected so far, if it is complete.
    fn config(&self) -> Option<LockeConfig> {
        let config = match self.effective_kind()? {
            LockeKind::Base => LockeConfig::Base,
            LockeKind::Mono => LockeConfig::Mono { ty: self.mono? },
            LockeKind::Color => LockeConfig::Color { color: self.color? },
            LockeKind::Category => LockeConfig::Category { category: self.category? },
            LockeKind::Leg => LockeConfig::Leg { legs: self.legs? },
            LockeKind::Unique => LockeConfig::Unique,
            LockeKind::Wrap => LockeConfig::Wrap,
            LockeKind::Wed => LockeConfig::Wed,
            LockeKind::Chess => LockeConfig::Chess,
            LockeKind::Star => LockeConfig::Star,
            LockeKind::Eevee => LockeConfig::Eevee,
            LockeKind::Castform => LockeConfig::Castform,
            LockeKind::Deoxys => LockeConfig::Deoxys,
            LockeKind::Starter => LockeConfig::Starter,
            LockeKind::Gen => return None,
        };
        Some(match self.kind {
            LockeKind::Gen => LockeConfig::Gen { inner: Box::new(config) },
            _ => config,
        })
    }

    /// Freeze the configuration and build the run.
    ///
    /// Computes the catchable pool and makes the catches the variant starts
    /// with. The first of those becomes the starter.
    pub fn finish(&mut self, dex: &dyn GameData, id: RunId) -> Result<Run> {
        if self.finished {
            return Err(ValidationError::CreationComplete.into());
        }
        if let Progress::NeedsInput { key, .. } = self.progress(dex)? {
            return Err(ValidationError::CreationIncomplete(key).into());
        }
        let (Some(config), Some(game_name)) = (self.config(), self.game.as_deref()) else {
            return Err(ValidationError::CreationIncomplete(WizardKey::Game).into());
        };

        let game = dex.game(game_name)?;
        let locke = Locke::new(config.clone());
        let mut run = Run::new(id, self.name.clone(), game, config.clone(), self.settings)?;

        run.pool = match family::explicit_pool(&config, dex, game.gen)? {
            Some(pool) => pool,
            None => compute_pool(&locke, dex, game.gen),
        };

        let mut first = true;
        for name in family::initial_catches(&config, dex, game.gen)? {
            let pokemon = run.create_pokemon(dex.species(&name, game.gen)?);
            let id = locke.catch(&mut run, pokemon)?;
            if first {
                run.set_starter(id)?;
                first = false;
            }
        }

        if let (LockeConfig::Star, Some(starter)) = (config.effective(), self.star_starter.as_deref()) {
            let catches =
                star::initial_catches(dex, game.gen, &self.representatives, starter, &self.star_team);
            for (base, ty) in catches {
                let mut pokemon = run.create_pokemon(dex.species(&base, game.gen)?);
                pokemon.metadata.represents = Some(ty);
                let id = locke.catch(&mut run, pokemon)?;
                run.pool.mark_line_caught(&base);
                if first {
                    run.set_starter(id)?;
                    first = false;
                }
            }
        }

        self.finished = true;
        info!(
            run = %run.id,
            locke = %locke.kind(),
            game = %run.game,
            pool = run.pool.len(),
            "run created"
        );
        Ok(run)
    }
}

fn needs<I>(key: WizardKey, options: I) -> Progress
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Progress::NeedsInput {
        key,
        options: options.into_iter().map(Into::into).collect(),
    }
}

fn invalid(key: WizardKey, value: &str) -> ValidationError {
    ValidationError::InvalidChoice {
        field: key.to_string(),
        value: value.to_string(),
    }
}

fn parse<T: std::str::FromStr>(key: WizardKey, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(key, value).into())
}
