//! Type-representative variant.
//!
//! Before the run starts the player picks one representative per type: a
//! final evolution form of that type. Each evolution line may represent
//! only one type. From the representatives the player then picks a starter
//! and five team members. The run begins with the base form of every
//! representative caught, the starter and team in the party.
//!
//! Types are offered in order of how few candidates remain, so scarce
//! types are settled while they still have options. A type with no
//! candidate left is skipped.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::species::{GameData, PokemonType};

/// Team members picked besides the starter.
pub const STAR_TEAM_SIZE: u8 = 5;

/// Chosen representatives, keyed by the type they represent.
pub type Representatives = BTreeMap<PokemonType, String>;

/// Final form to base form, for every evolution line of `gen`.
#[must_use]
pub fn final_form_bases(dex: &dyn GameData, gen: u8) -> FxHashMap<String, String> {
    dex.evolution_lines(gen, true)
        .into_iter()
        .filter_map(|line| {
            let last = line.first()?.clone();
            let base = line.last()?.clone();
            Some((last, base))
        })
        .collect()
}

/// Remaining candidates for every unanswered type, scarcest type first.
#[must_use]
pub fn type_candidates(
    dex: &dyn GameData,
    gen: u8,
    chosen: &Representatives,
) -> Vec<(PokemonType, Vec<String>)> {
    let bases = final_form_bases(dex, gen);
    let claimed: FxHashSet<&str> = chosen
        .values()
        .filter_map(|name| bases.get(name).map(String::as_str))
        .collect();
    let playable = PokemonType::for_generation(gen);

    let mut candidates: BTreeMap<PokemonType, Vec<String>> = BTreeMap::new();
    for line in dex.evolution_lines(gen, true) {
        let (Some(last), Some(base)) = (line.first(), line.last()) else {
            continue;
        };
        if claimed.contains(base.as_str()) {
            continue;
        }
        let Ok(species) = dex.species(last, gen) else {
            continue;
        };
        for &ty in &species.types {
            if chosen.contains_key(&ty) || !playable.contains(&ty) {
                continue;
            }
            let names = candidates.entry(ty).or_default();
            if !names.contains(last) {
                names.push(last.clone());
            }
        }
    }

    let mut ordered: Vec<(PokemonType, Vec<String>)> = candidates.into_iter().collect();
    ordered.sort_by_key(|(_, names)| names.len());
    ordered
}

/// The next type the player must pick a representative for.
#[must_use]
pub fn next_missing_type(
    dex: &dyn GameData,
    gen: u8,
    chosen: &Representatives,
) -> Option<(PokemonType, Vec<String>)> {
    type_candidates(dex, gen, chosen).into_iter().next()
}

/// Base forms to catch at creation, each with the type it represents.
///
/// The starter comes first, then the team in pick order, then the other
/// representatives in type order.
#[must_use]
pub fn initial_catches(
    dex: &dyn GameData,
    gen: u8,
    chosen: &Representatives,
    starter: &str,
    team: &[String],
) -> Vec<(String, PokemonType)> {
    let bases = final_form_bases(dex, gen);
    let type_of: FxHashMap<&str, PokemonType> =
        chosen.iter().map(|(&ty, name)| (name.as_str(), ty)).collect();

    let picked = std::iter::once(starter).chain(team.iter().map(String::as_str));
    let rest = chosen
        .values()
        .map(String::as_str)
        .filter(|name| *name != starter && !team.iter().any(|t| t == name));

    picked
        .chain(rest)
        .filter_map(|name| {
            let ty = *type_of.get(name)?;
            let base = bases.get(name).cloned().unwrap_or_else(|| name.to_string());
            Some((base, ty))
        })
        .collect()
}
