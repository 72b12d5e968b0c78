//! Property tests for the invariants every variant must hold.
//!
//! Runs are driven directly through the variant's catch side effect and
//! arbitrary creature metadata, without the encounter flow, so the
//! properties cover states a player could reach in any order.

use locke_engine::core::{RunId, RunSettings, PARTY_SIZE};
use locke_engine::games::sample::{sample_pokedex, sample_species};
use locke_engine::rules::{ChessRole, Locke, LockeConfig};
use locke_engine::run::Run;
use locke_engine::species::{GameData, Pokedex, Species};
use locke_engine::steps::{StepContext, StepResolver};
use proptest::prelude::*;

fn configs() -> Vec<LockeConfig> {
    vec![
        LockeConfig::Base,
        LockeConfig::Unique,
        LockeConfig::Wrap,
        LockeConfig::Wed,
        LockeConfig::Chess,
        LockeConfig::Star,
        LockeConfig::Eevee,
    ]
}

fn game_for(gen: u8) -> &'static str {
    match gen {
        1 => "Red",
        2 => "Gold",
        _ => "Ruby",
    }
}

/// Catch `picks` (indices into the generation's species) under `config`.
fn play(dex: &Pokedex, config: &LockeConfig, gen: u8, picks: &[usize]) -> (Locke, Run) {
    let game = dex.game(game_for(gen)).unwrap();
    let locke = Locke::new(config.clone());
    let mut run = Run::new(RunId::new("prop"), "prop", game, config.clone(), RunSettings::new()).unwrap();
    let species: Vec<Species> = sample_species(gen);

    for &pick in picks {
        let mut scratch = run.clone();
        let pokemon = scratch.create_pokemon(&species[pick % species.len()]);
        if locke.catch(&mut scratch, pokemon).is_ok() {
            run = scratch;
        }
    }
    (locke, run)
}

/// Per-creature metadata choices: nickname, gender, role, dead.
type Tweaks = Vec<(bool, bool, Option<usize>, bool)>;

fn tweak(run: &mut Run, tweaks: &Tweaks) {
    let ids: Vec<_> = run.pokemon_box().iter().map(|p| p.id()).collect();
    for (i, (id, &(nickname, gender, role, dead))) in ids.iter().zip(tweaks.iter()).enumerate() {
        let Ok(pokemon) = run.pokemon_mut(*id) else { continue };
        if nickname {
            pokemon.metadata.nickname = Some(format!("Mon{i}"));
        }
        if gender {
            pokemon.metadata.gender = pokemon.genders.first().copied();
        }
        if let Some(role) = role {
            let role = ChessRole::ALL[role % ChessRole::ALL.len()];
            pokemon.metadata.role = Some(role);
            pokemon.metadata.original_role = Some(role);
        }
        if dead {
            pokemon.kill();
        }
    }
}

proptest! {
    #[test]
    fn party_never_exceeds_six(
        config in 0_usize..7,
        gen in 1_u8..=3,
        picks in prop::collection::vec(0_usize..200, 0..40),
    ) {
        let dex = sample_pokedex();
        let (_, run) = play(&dex, &configs()[config], gen, &picks);
        prop_assert!(run.party().len() <= PARTY_SIZE);
    }

    #[test]
    fn unique_party_never_shares_types(
        gen in 1_u8..=3,
        picks in prop::collection::vec(0_usize..200, 0..40),
    ) {
        let dex = sample_pokedex();
        let (_, run) = play(&dex, &LockeConfig::Unique, gen, &picks);
        let members: Vec<_> = run.party_members().collect();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                prop_assert!(!a.shares_type_with(&b.types), "{} and {} share a type", a.name, b.name);
            }
        }
    }

    #[test]
    fn rolling_window_pins_both_ends(
        gen in 1_u8..=3,
        picks in prop::collection::vec(0_usize..200, 6..40),
    ) {
        let dex = sample_pokedex();
        let (_, run) = play(&dex, &LockeConfig::Wrap, gen, &picks);
        prop_assert_eq!(run.party().len(), PARTY_SIZE);

        let mut by_capture: Vec<_> = run
            .pokemon_box()
            .iter()
            .map(|p| (p.metadata.capture_index, p.id()))
            .collect();
        by_capture.sort();
        let n = by_capture.len();
        for &(_, id) in by_capture[..2].iter().chain(&by_capture[n - 2..]) {
            prop_assert!(run.party().contains(id));
        }
    }

    #[test]
    fn offered_steps_respect_prerequisites(
        config in 0_usize..7,
        gen in 1_u8..=3,
        picks in prop::collection::vec(0_usize..200, 1..12),
        tweaks in prop::collection::vec(
            (any::<bool>(), any::<bool>(), prop::option::of(0_usize..6), prop::bool::weighted(0.2)),
            12,
        ),
    ) {
        let dex = sample_pokedex();
        let (locke, mut run) = play(&dex, &configs()[config], gen, &picks);
        tweak(&mut run, &tweaks);

        let graph = locke.step_graph(gen);
        let resolver = StepResolver::new(&graph, locke.catalog());
        let ctx = StepContext::new(&dex);
        for pokemon in run.pokemon_box().iter() {
            let offered = resolver.offered(&ctx, &run, pokemon);
            for info in graph.iter().filter(|s| offered.contains(&s.name)) {
                for prerequisite in &info.prerequisites {
                    prop_assert!(
                        !offered.contains(prerequisite),
                        "{:?} offered together with its prerequisite {:?}",
                        info.name,
                        prerequisite
                    );
                }
            }
            prop_assert_eq!(&offered, &resolver.offered(&ctx, &run, pokemon));
        }
    }
}
