//! Catchable pool computation.

use tracing::debug;

use crate::rules::Locke;
use crate::run::{CatchablePool, PoolEntry};
use crate::species::GameData;

/// Pool of every species the variant allows in generation `gen`.
///
/// Lines are scanned final form first. Once the variant accepts a species,
/// every earlier form of the same line is accepted too, so a line enters
/// the pool from the first relevant form down to its base. Each entry
/// points at its line's base form.
#[must_use]
pub fn compute_pool(locke: &Locke, dex: &dyn GameData, gen: u8) -> CatchablePool {
    let mut pool = CatchablePool::new();
    for line in dex.evolution_lines(gen, true) {
        let Some(base) = line.last() else { continue };
        let mut relevant = false;
        for name in &line {
            let Ok(species) = dex.species(name, gen) else {
                continue;
            };
            relevant = relevant || locke.is_relevant(species);
            if relevant {
                pool.insert(PoolEntry::new(name.clone(), base.clone()));
            }
        }
    }
    debug!(gen, entries = pool.len(), "pool computed");
    pool
}
