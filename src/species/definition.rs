//! Species definitions: static per-generation data.
//!
//! A `Species` is what the game data catalog knows about a kind of
//! creature in one generation ("Eevee in generation 2 evolves into five
//! forms"). Per-run state such as nicknames or life status lives on
//! [`Pokemon`](crate::run::Pokemon) instead.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{Category, Color, Gender, LegCount, PokemonType};

/// Type list. No species has more than two types.
pub type TypeList = SmallVec<[PokemonType; 2]>;

/// Gender list. At most Male and Female, or only Genderless.
pub type GenderList = SmallVec<[Gender; 2]>;

/// Static species definition.
///
/// ## Example
///
/// ```
/// use locke_engine::species::{Species, PokemonType, Color};
///
/// let charmander = Species::new("Charmander", 1, &[PokemonType::Fire])
///     .with_evolutions(["Charmeleon"])
///     .with_colors(&[Color::Red])
///     .with_legs(2);
///
/// assert!(charmander.has_type(PokemonType::Fire));
/// assert!(charmander.can_evolve());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Unique name within a generation.
    pub name: String,

    /// Generation the species was introduced in.
    pub gen: u8,

    pub types: TypeList,

    /// Names of the species this one evolves into.
    pub evolves_to: Vec<String>,

    pub colors: SmallVec<[Color; 2]>,

    pub categories: SmallVec<[Category; 2]>,

    /// Genders individuals of this species may have.
    pub genders: GenderList,

    pub legs: u8,
}

impl Species {
    /// Create a species with male and female individuals and no evolutions.
    #[must_use]
    pub fn new(name: impl Into<String>, gen: u8, types: &[PokemonType]) -> Self {
        Self {
            name: name.into(),
            gen,
            types: types.iter().copied().collect(),
            evolves_to: Vec::new(),
            colors: SmallVec::new(),
            categories: SmallVec::new(),
            genders: SmallVec::from_slice(&[Gender::Male, Gender::Female]),
            legs: 0,
        }
    }

    /// Builder: set evolution targets.
    #[must_use]
    pub fn with_evolutions<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evolves_to = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set colors.
    #[must_use]
    pub fn with_colors(mut self, colors: &[Color]) -> Self {
        self.colors = colors.iter().copied().collect();
        self
    }

    /// Builder: set categories.
    #[must_use]
    pub fn with_categories(mut self, categories: &[Category]) -> Self {
        self.categories = categories.iter().copied().collect();
        self
    }

    /// Builder: set supported genders.
    #[must_use]
    pub fn with_genders(mut self, genders: &[Gender]) -> Self {
        self.genders = genders.iter().copied().collect();
        self
    }

    /// Builder: mark the species as genderless.
    #[must_use]
    pub fn genderless(self) -> Self {
        self.with_genders(&[Gender::Genderless])
    }

    /// Builder: set the number of legs.
    #[must_use]
    pub fn with_legs(mut self, legs: u8) -> Self {
        self.legs = legs;
        self
    }

    #[must_use]
    pub fn has_type(&self, ty: PokemonType) -> bool {
        self.types.contains(&ty)
    }

    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    #[must_use]
    pub fn leg_count(&self) -> LegCount {
        LegCount::from_legs(self.legs)
    }

    /// Whether individuals only come in the genderless form.
    #[must_use]
    pub fn is_genderless(&self) -> bool {
        self.genders.as_slice() == [Gender::Genderless]
    }

    /// Whether this species has at least one evolution.
    #[must_use]
    pub fn can_evolve(&self) -> bool {
        !self.evolves_to.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_builder() {
        let eevee = Species::new("Eevee", 1, &[PokemonType::Normal])
            .with_evolutions(["Vaporeon", "Jolteon", "Flareon"])
            .with_colors(&[Color::Brown])
            .with_categories(&[Category::Mammal])
            .with_legs(4);

        assert_eq!(eevee.evolves_to.len(), 3);
        assert!(eevee.has_color(Color::Brown));
        assert!(eevee.has_category(Category::Mammal));
        assert_eq!(eevee.leg_count(), LegCount::Four);
        assert!(!eevee.is_genderless());
    }

    #[test]
    fn test_genderless() {
        let voltorb = Species::new("Voltorb", 1, &[PokemonType::Electric]).genderless();
        assert!(voltorb.is_genderless());
        assert_eq!(voltorb.genders.as_slice(), &[Gender::Genderless]);
    }

    #[test]
    fn test_dual_type() {
        let bulbasaur = Species::new("Bulbasaur", 1, &[PokemonType::Grass, PokemonType::Poison]);
        assert!(bulbasaur.has_type(PokemonType::Poison));
        assert!(!bulbasaur.has_type(PokemonType::Fire));
        assert!(!bulbasaur.can_evolve());
    }
}
