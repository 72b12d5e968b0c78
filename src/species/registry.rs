//! Species registry and evolution topology for one generation.
//!
//! The `SpeciesRegistry` stores every species available in a generation,
//! keeps registration order for deterministic iteration, and derives the
//! evolution lines that pool computation walks.
//!
//! ## Evolution lines
//!
//! A *base form* is a species no other registered species evolves into. A
//! line is one path from a base form to a final form, so branching families
//! produce one line per branch:
//!
//! ```text
//! Eevee -> Vaporeon
//! Eevee -> Jolteon
//! Eevee -> Flareon
//! ```
//!
//! Lines are materialized eagerly; callers get a `Vec<Vec<String>>`.

use rustc_hash::FxHashMap;

use super::definition::Species;

/// Registry of species definitions for one generation.
///
/// ## Example
///
/// ```
/// use locke_engine::species::{Species, SpeciesRegistry, PokemonType};
///
/// let mut registry = SpeciesRegistry::new();
/// registry.register(Species::new("Pichu", 2, &[PokemonType::Electric]).with_evolutions(["Pikachu"]));
/// registry.register(Species::new("Pikachu", 1, &[PokemonType::Electric]).with_evolutions(["Raichu"]));
/// registry.register(Species::new("Raichu", 1, &[PokemonType::Electric]));
///
/// assert_eq!(registry.base_of("Raichu"), Some("Pichu"));
/// assert_eq!(
///     registry.evolution_lines(true),
///     vec![vec!["Raichu".to_string(), "Pikachu".to_string(), "Pichu".to_string()]],
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpeciesRegistry {
    species: Vec<Species>,
    index: FxHashMap<String, usize>,
    /// Reverse edges: species name -> names that evolve into it.
    preevolutions: FxHashMap<String, Vec<String>>,
}

impl SpeciesRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a species definition.
    ///
    /// Panics if a species with the same name already exists. Registries are
    /// built from static data at startup, so a duplicate is a data bug.
    pub fn register(&mut self, species: Species) {
        if self.index.contains_key(&species.name) {
            panic!("Species {:?} already registered", species.name);
        }
        for target in &species.evolves_to {
            self.preevolutions
                .entry(target.clone())
                .or_default()
                .push(species.name.clone());
        }
        self.index.insert(species.name.clone(), self.species.len());
        self.species.push(species);
    }

    /// Get a species by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Species> {
        self.index.get(name).map(|&i| &self.species[i])
    }

    /// Check if a species is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the number of registered species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Iterate over all species in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    /// Find species matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Species>
    where
        F: Fn(&Species) -> bool,
    {
        self.species.iter().filter(move |s| predicate(s))
    }

    /// Registered species that evolve directly into `name`.
    pub fn evolves_from(&self, name: &str) -> impl Iterator<Item = &Species> {
        self.preevolutions
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|n| self.get(n))
    }

    /// Whether no registered species evolves into `name`.
    #[must_use]
    pub fn is_base_form(&self, name: &str) -> bool {
        self.evolves_from(name).next().is_none()
    }

    /// Base forms in registration order.
    pub fn base_forms(&self) -> impl Iterator<Item = &Species> {
        self.species.iter().filter(|s| self.is_base_form(&s.name))
    }

    /// Registered evolution targets of a species.
    pub fn evolutions_of<'a>(&'a self, species: &'a Species) -> impl Iterator<Item = &'a Species> {
        species.evolves_to.iter().filter_map(|n| self.get(n))
    }

    /// Walk pre-evolutions back to the base form of `name`'s line.
    ///
    /// Returns `None` if `name` is not registered.
    #[must_use]
    pub fn base_of<'a>(&'a self, name: &str) -> Option<&'a str> {
        let mut current = self.get(name)?;
        // Bounded by registry size so malformed cyclic data cannot spin.
        for _ in 0..self.species.len() {
            match self.evolves_from(&current.name).next() {
                Some(prev) => current = prev,
                None => break,
            }
        }
        Some(current.name.as_str())
    }

    /// Every evolution line, one per path from a base form to a final form.
    ///
    /// With `reversed` each line runs final form first, base form last.
    #[must_use]
    pub fn evolution_lines(&self, reversed: bool) -> Vec<Vec<String>> {
        let mut lines = Vec::new();

        for base in self.base_forms() {
            let mut stack: Vec<Vec<&Species>> = vec![vec![base]];
            while let Some(path) = stack.pop() {
                let Some(&tip) = path.last() else { continue };
                let next: Vec<&Species> = self
                    .evolutions_of(tip)
                    .filter(|s| !path.iter().any(|p| p.name == s.name))
                    .collect();

                if next.is_empty() {
                    let mut line: Vec<String> = path.iter().map(|s| s.name.clone()).collect();
                    if reversed {
                        line.reverse();
                    }
                    lines.push(line);
                    continue;
                }

                // Push in reverse so branches come out in declaration order.
                for target in next.into_iter().rev() {
                    let mut extended = path.clone();
                    extended.push(target);
                    stack.push(extended);
                }
            }
        }

        lines
    }
}
