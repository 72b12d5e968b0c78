//! Single-family variants: Eevee, Castform, Deoxys and starters.
//!
//! None of these catch wild creatures. Their pool is fixed up front and
//! every creature the run will ever own is caught when the run is created.

use crate::core::{NotFound, Result};
use crate::run::{CatchablePool, PoolEntry};
use crate::rules::LockeConfig;
use crate::species::GameData;

pub const EEVEE: &str = "Eevee";
pub const CASTFORM: &str = "Castform";
pub const DEOXYS: &str = "Deoxys";

/// Times a single-form species is caught at creation (one per form).
pub const FORM_COUNT: usize = 4;

/// Canonical starters of a generation.
#[must_use]
pub fn generation_starters(gen: u8) -> &'static [&'static str] {
    match gen {
        1 => &["Bulbasaur", "Charmander", "Squirtle"],
        2 => &["Chikorita", "Cyndaquil", "Totodile"],
        3 => &["Treecko", "Torchic", "Mudkip"],
        _ => &[],
    }
}

/// The fixed pool of a single-family variant, or `None` for variants whose
/// pool is computed from relevance.
///
/// Every entry is marked caught, so the duplicate clause never offers
/// these species on routes.
pub fn explicit_pool(config: &LockeConfig, dex: &dyn GameData, gen: u8) -> Result<Option<CatchablePool>> {
    let pool: CatchablePool = match config.effective() {
        LockeConfig::Eevee => {
            let eevee = dex.species(EEVEE, gen)?;
            std::iter::once(eevee.name.clone())
                .chain(eevee.evolves_to.iter().filter(|n| dex.species(n, gen).is_ok()).cloned())
                .map(|name| PoolEntry::new(name, EEVEE).with_caught(true))
                .collect()
        }
        LockeConfig::Castform => single(dex, CASTFORM, gen)?,
        LockeConfig::Deoxys => single(dex, DEOXYS, gen)?,
        LockeConfig::Starter => {
            let mut pool = CatchablePool::new();
            for starter_gen in 1..=gen {
                for &starter in generation_starters(starter_gen) {
                    for name in line_from(dex, starter, gen)? {
                        pool.insert(PoolEntry::new(name, starter).with_caught(true));
                    }
                }
            }
            pool
        }
        _ => return Ok(None),
    };
    Ok(Some(pool))
}

fn single(dex: &dyn GameData, name: &str, gen: u8) -> Result<CatchablePool> {
    let species = dex.species(name, gen)?;
    Ok(std::iter::once(PoolEntry::new(species.name.clone(), species.name.clone()).with_caught(true)).collect())
}

/// `base` followed by its first registered evolution, repeatedly.
fn line_from(dex: &dyn GameData, base: &str, gen: u8) -> Result<Vec<String>> {
    let mut line = vec![dex.species(base, gen)?.name.clone()];
    while let Some(current) = line.last() {
        let next = dex
            .species(current, gen)?
            .evolves_to
            .iter()
            .find(|n| dex.species(n, gen).is_ok() && !line.contains(n))
            .cloned();
        match next {
            Some(name) => line.push(name),
            None => break,
        }
    }
    Ok(line)
}

/// Species caught when the run is created, in catch order.
///
/// The first one becomes the starter.
pub fn initial_catches(config: &LockeConfig, dex: &dyn GameData, gen: u8) -> Result<Vec<String>> {
    let names = match config.effective() {
        LockeConfig::Eevee => {
            let eevee = dex.species(EEVEE, gen)?;
            std::iter::once(eevee.name.clone())
                .chain(eevee.evolves_to.iter().filter(|n| dex.species(n, gen).is_ok()).cloned())
                .collect()
        }
        LockeConfig::Castform => vec![dex.species(CASTFORM, gen)?.name.clone(); FORM_COUNT],
        LockeConfig::Deoxys => vec![dex.species(DEOXYS, gen)?.name.clone(); FORM_COUNT],
        LockeConfig::Starter => {
            let mut names = Vec::new();
            for starter_gen in 1..=gen {
                for &starter in generation_starters(starter_gen) {
                    if dex.species(starter, gen).is_err() {
                        return Err(NotFound::Species {
                            name: starter.to_string(),
                            gen,
                        }
                        .into());
                    }
                    names.push(starter.to_string());
                }
            }
            names
        }
        _ => Vec::new(),
    };
    Ok(names)
}
