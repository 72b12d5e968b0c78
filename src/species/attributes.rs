//! Species attributes: types, colors, categories, genders, leg counts.
//!
//! Every attribute is a closed enumeration with a stable display label.
//! Labels are what callers see in choice lists and what they send back, so
//! each enum parses its own label (case-insensitively) via `FromStr`.
//!
//! ## Generation gating
//!
//! Types and genders depend on the generation:
//! - Generation 1 has 15 types and no genders.
//! - Generation 2 adds Dark and Steel, and introduces genders.
//! - Generation 6 adds Fairy.

use thiserror::Error;

/// A label that does not name any member of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable display label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::species::attributes::ParseLabelError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::species::attributes::ParseLabelError {
                        kind: $kind,
                        label: s.to_string(),
                    })
            }
        }
    };
}

pub(crate) use labelled_enum;

labelled_enum! {
    /// Elemental type of a species.
    PokemonType, "type" {
        Normal => "Normal",
        Fire => "Fire",
        Water => "Water",
        Electric => "Electric",
        Grass => "Grass",
        Ice => "Ice",
        Fighting => "Fighting",
        Poison => "Poison",
        Ground => "Ground",
        Flying => "Flying",
        Psychic => "Psychic",
        Bug => "Bug",
        Rock => "Rock",
        Ghost => "Ghost",
        Dragon => "Dragon",
        Dark => "Dark",
        Steel => "Steel",
        Fairy => "Fairy",
    }
}

impl PokemonType {
    /// Generation that introduced this type.
    #[must_use]
    pub const fn introduced_in(self) -> u8 {
        match self {
            Self::Dark | Self::Steel => 2,
            Self::Fairy => 6,
            _ => 1,
        }
    }

    /// Types that exist in the given generation, in declaration order.
    #[must_use]
    pub fn for_generation(gen: u8) -> Vec<PokemonType> {
        Self::ALL.iter().copied().filter(|t| t.introduced_in() <= gen).collect()
    }
}

labelled_enum! {
    /// Dominant body color.
    Color, "color" {
        Red => "Red",
        Blue => "Blue",
        Green => "Green",
        Yellow => "Yellow",
        Purple => "Purple",
        Brown => "Brown",
        Black => "Black",
        White => "White",
        Gray => "Gray",
        Orange => "Orange",
        Pink => "Pink",
    }
}

labelled_enum! {
    /// Loose visual category used by the category variant.
    Category, "category" {
        Prehistoric => "Prehistoric",
        Wing => "Wing",
        Plant => "Plant",
        Bird => "Bird",
        Bug => "Bug",
        Mammal => "Mammal",
        Rodent => "Rodent",
        Reptile => "Reptile",
        Crab => "Crab",
        Item => "Item",
        Watermon => "Watermon",
        Fantasy => "Fantasy",
        Food => "Food",
        Cattle => "Cattle",
        Dog => "Dog",
        Cat => "Cat",
        Fish => "Fish",
        Mouse => "Mouse",
        Bunny => "Bunny",
        Sloth => "Sloth",
        Horse => "Horse",
        Human => "Human",
        Ape => "Ape",
        Duck => "Duck",
        Snake => "Snake",
        Bear => "Bear",
        Turtle => "Turtle",
        Weapon => "Weapon",
        Dragon => "Dragon",
        Frog => "Frog",
        Cow => "Cow",
        Pig => "Pig",
    }
}

labelled_enum! {
    /// Gender of an individual creature.
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
        Genderless => "Genderless",
    }
}

impl Gender {
    /// The gender a pairing partner must have, if any.
    #[must_use]
    pub const fn opposite(self) -> Option<Gender> {
        match self {
            Self::Male => Some(Self::Female),
            Self::Female => Some(Self::Male),
            Self::Genderless => None,
        }
    }
}

labelled_enum! {
    /// Leg-count bucket used by the leg variant.
    ///
    /// `Many` covers three legs and anything above four.
    LegCount, "leg count" {
        NoLegs => "no legs",
        One => "1",
        Two => "2",
        Four => "4",
        Many => "a lot",
    }
}

impl LegCount {
    /// Bucket a raw leg count.
    #[must_use]
    pub const fn from_legs(legs: u8) -> Self {
        match legs {
            0 => Self::NoLegs,
            1 => Self::One,
            2 => Self::Two,
            4 => Self::Four,
            _ => Self::Many,
        }
    }

    /// Whether a raw leg count falls in this bucket.
    #[must_use]
    pub fn matches(self, legs: u8) -> bool {
        Self::from_legs(legs) == self
    }
}
