//! Wizard keys and progress.

use serde::{Deserialize, Serialize};

use crate::core::ValidationError;
use crate::species::PokemonType;

/// One piece of configuration the wizard may ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardKey {
    Game,
    /// Variant wrapped by the cross-generation meta-variant.
    InnerLocke,
    MonoType,
    Color,
    Category,
    Legs,
    /// Representative of one type (type-representative variant).
    StarType(PokemonType),
    StarStarter,
    /// Team member `n`, counted from 1.
    StarTeam(u8),
}

impl std::fmt::Display for WizardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Game => f.write_str("GAME"),
            Self::InnerLocke => f.write_str("INNER_LOCKE"),
            Self::MonoType => f.write_str("MONO_TYPE"),
            Self::Color => f.write_str("COLOR"),
            Self::Category => f.write_str("CATEGORY"),
            Self::Legs => f.write_str("LEGS"),
            Self::StarType(ty) => write!(f, "STAR_{}", ty.label().to_uppercase()),
            Self::StarStarter => f.write_str("STAR_STARTER"),
            Self::StarTeam(n) => write!(f, "STAR_TEAM{n}"),
        }
    }
}

impl std::str::FromStr for WizardKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidChoice {
            field: "key".to_string(),
            value: s.to_string(),
        };
        let key = match s.trim().to_uppercase().as_str() {
            "GAME" => Self::Game,
            "INNER_LOCKE" => Self::InnerLocke,
            "MONO_TYPE" => Self::MonoType,
            "COLOR" => Self::Color,
            "CATEGORY" => Self::Category,
            "LEGS" => Self::Legs,
            "STAR_STARTER" => Self::StarStarter,
            other => {
                if let Some(n) = other.strip_prefix("STAR_TEAM") {
                    Self::StarTeam(n.parse().map_err(|_| invalid())?)
                } else if let Some(ty) = other.strip_prefix("STAR_") {
                    Self::StarType(ty.parse().map_err(|_| invalid())?)
                } else {
                    return Err(invalid());
                }
            }
        };
        Ok(key)
    }
}

/// Where the wizard stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Nothing is missing; the run can be created.
    Complete,
    /// The wizard needs `key`, chosen from `options`.
    NeedsInput { key: WizardKey, options: Vec<String> },
}

impl Progress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The key being asked for, if any.
    #[must_use]
    pub fn key(&self) -> Option<WizardKey> {
        match self {
            Self::Complete => None,
            Self::NeedsInput { key, .. } => Some(*key),
        }
    }

    /// The choices for the key being asked for.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match self {
            Self::Complete => &[],
            Self::NeedsInput { options, .. } => options,
        }
    }
}
