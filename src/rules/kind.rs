//! Variant names and their frozen configuration.
//!
//! [`LockeKind`] is the closed set of variants a run can be created with.
//! [`LockeConfig`] is a kind plus whatever the wizard collected for it. A
//! config is an immutable value: it is built once when the run is created,
//! stored on the run and handed to [`Locke::new`](super::Locke::new) for
//! every request.

use serde::{Deserialize, Serialize};

use crate::core::NotFound;
use crate::species::{Category, Color, LegCount, PokemonType};

/// Every variant a run can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LockeKind {
    Base,
    Mono,
    Color,
    Category,
    Leg,
    Unique,
    Wrap,
    Wed,
    Chess,
    Star,
    Eevee,
    Castform,
    Deoxys,
    Starter,
    Gen,
}

impl LockeKind {
    /// Every variant, in registry order.
    pub const ALL: &'static [LockeKind] = &[
        Self::Base,
        Self::Mono,
        Self::Color,
        Self::Category,
        Self::Leg,
        Self::Unique,
        Self::Wrap,
        Self::Wed,
        Self::Chess,
        Self::Star,
        Self::Eevee,
        Self::Castform,
        Self::Deoxys,
        Self::Starter,
        Self::Gen,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "BaseLocke",
            Self::Mono => "MonoLocke",
            Self::Color => "ColorLocke",
            Self::Category => "CategoryLocke",
            Self::Leg => "LegLocke",
            Self::Unique => "UniqueLocke",
            Self::Wrap => "WrapLocke",
            Self::Wed => "WedLocke",
            Self::Chess => "ChessLocke",
            Self::Star => "StarLocke",
            Self::Eevee => "EeveeLocke",
            Self::Castform => "CastformLocke",
            Self::Deoxys => "DeoxysLocke",
            Self::Starter => "StarterLocke",
            Self::Gen => "GenLocke",
        }
    }

    /// Oldest generation the variant can be played in.
    #[must_use]
    pub const fn min_gen(self) -> u8 {
        match self {
            Self::Wed | Self::Chess => 2,
            Self::Castform | Self::Deoxys => 3,
            _ => 1,
        }
    }

    /// Variants the cross-generation meta-variant may wrap.
    pub fn inner_candidates() -> impl Iterator<Item = LockeKind> {
        Self::ALL.iter().copied().filter(|k| *k != Self::Gen)
    }
}

impl std::fmt::Display for LockeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LockeKind {
    type Err = NotFound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NotFound::Variant(s.to_string()))
    }
}

/// A variant with its collected configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockeConfig {
    Base,
    Mono { ty: PokemonType },
    Color { color: Color },
    Category { category: Category },
    Leg { legs: LegCount },
    Unique,
    Wrap,
    Wed,
    Chess,
    Star,
    Eevee,
    Castform,
    Deoxys,
    Starter,
    Gen { inner: Box<LockeConfig> },
}

impl LockeConfig {
    #[must_use]
    pub fn kind(&self) -> LockeKind {
        match self {
            Self::Base => LockeKind::Base,
            Self::Mono { .. } => LockeKind::Mono,
            Self::Color { .. } => LockeKind::Color,
            Self::Category { .. } => LockeKind::Category,
            Self::Leg { .. } => LockeKind::Leg,
            Self::Unique => LockeKind::Unique,
            Self::Wrap => LockeKind::Wrap,
            Self::Wed => LockeKind::Wed,
            Self::Chess => LockeKind::Chess,
            Self::Star => LockeKind::Star,
            Self::Eevee => LockeKind::Eevee,
            Self::Castform => LockeKind::Castform,
            Self::Deoxys => LockeKind::Deoxys,
            Self::Starter => LockeKind::Starter,
            Self::Gen { .. } => LockeKind::Gen,
        }
    }

    /// The variant whose rules actually apply, looking through the meta-variant.
    #[must_use]
    pub fn effective(&self) -> &LockeConfig {
        match self {
            Self::Gen { inner } => inner.effective(),
            other => other,
        }
    }
}
