//! Variant rule integration tests.
//!
//! Each test plays a short run of one variant on the sample catalog
//! through the run manager. Logs go to the test writer; run with
//! `RUST_LOG=locke_engine=debug` to see them.

use locke_engine::core::{CreatureId, RunId, RunSettings, ValidationError};
use locke_engine::creation::{RunCreator, WizardKey};
use locke_engine::games::sample_pokedex;
use locke_engine::manager::RunManager;
use locke_engine::rules::{ChessRole, LockeKind};
use locke_engine::run::{EncounterStatus, Run};
use locke_engine::species::Pokedex;
use locke_engine::steps::{RunEndCause, StepName, StepOutcome};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn new_run(dex: &Pokedex, kind: LockeKind, game: &str) -> Run {
    let mut creator = RunCreator::new(kind.name(), kind, RunSettings::new());
    creator.submit(dex, WizardKey::Game, game).unwrap();
    creator.finish(dex, RunId::new(kind.name())).unwrap()
}

fn catch(manager: &mut RunManager<'_>, route: &str, species: &str) -> CreatureId {
    manager.encounter(route, species).unwrap();
    manager
        .resolve_encounter(route, EncounterStatus::Caught)
        .unwrap()
        .unwrap()
}

/// Settle the mandatory steps of a generation 2 creature.
fn settle(manager: &mut RunManager<'_>, id: CreatureId, nickname: &str, gender: &str) {
    manager.execute_action(id, StepName::Nickname, Some(nickname)).unwrap();
    manager.execute_action(id, StepName::Gender, Some(gender)).unwrap();
}

// =============================================================================
// Unique types
// =============================================================================

/// A catch that shares a type with the party stays boxed, and can only
/// replace the member it clashes with.
#[test]
fn test_unique_types() {
    init_tracing();
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, LockeKind::Unique, "Red"), &dex).unwrap();
    let starter = manager.choose_starter("Charmander").unwrap();
    let pidgey = catch(&mut manager, "Route 1", "Pidgey");
    let rattata = catch(&mut manager, "Route 2", "Rattata");

    assert_eq!(manager.run().party().ids(), &[starter, pidgey]);
    manager.execute_action(rattata, StepName::Nickname, Some("Fang")).unwrap();

    let offered = manager.next_actions(rattata).unwrap();
    assert!(!offered.contains(&StepName::JoinParty));
    assert_eq!(
        manager.action_options(rattata, StepName::ReplacePartyMember).unwrap().choices,
        vec![pidgey.to_choice()]
    );

    let choice = pidgey.to_choice();
    manager
        .execute_action(rattata, StepName::ReplacePartyMember, Some(choice.as_str()))
        .unwrap();
    assert_eq!(manager.run().party().len(), 2);
    assert!(manager.run().party().contains(rattata));
    assert!(!manager.run().party().contains(pidgey));
}

// =============================================================================
// Rolling window
// =============================================================================

/// With a full party, the two oldest and two newest catches are pinned and
/// a new catch displaces the second-newest member.
#[test]
fn test_rolling_window() {
    init_tracing();
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, LockeKind::Wrap, "Red"), &dex).unwrap();

    let mut caught = vec![manager.choose_starter("Bulbasaur").unwrap()];
    for (route, species) in [
        ("Route 1", "Pidgey"),
        ("Route 2", "Rattata"),
        ("Viridian Forest", "Caterpie"),
        ("Route 25", "Abra"),
        ("Rock Tunnel", "Geodude"),
    ] {
        caught.push(catch(&mut manager, route, species));
    }
    assert_eq!(manager.run().party().ids(), caught.as_slice());

    let newest = catch(&mut manager, "Power Plant", "Voltorb");
    let party = manager.run().party();
    assert_eq!(party.len(), 6);
    assert!(party.contains(newest));
    assert!(party.contains(caught[5]));
    assert!(!party.contains(caught[4]));

    for (i, id) in caught.iter().enumerate() {
        manager
            .execute_action(*id, StepName::Nickname, Some(format!("Mon{i}").as_str()))
            .unwrap();
    }

    assert_eq!(
        manager.execute_action(caught[1], StepName::LeaveParty, None).unwrap_err(),
        ValidationError::StepNotOffered {
            step: StepName::LeaveParty,
            creature: caught[1],
        }
        .into()
    );
    manager.execute_action(caught[2], StepName::LeaveParty, None).unwrap();
    assert!(!manager.run().party().contains(caught[2]));
}

// =============================================================================
// Pairs
// =============================================================================

/// Partners join the party together and a death leaves the survivor
/// unpaired.
#[test]
fn test_wed_pairs() {
    init_tracing();
    let dex = sample_pokedex();
    let run = new_run(&dex, LockeKind::Wed, "Gold");
    assert!(!run.pool.contains("Magnemite"));
    let mut manager = RunManager::new(run, &dex).unwrap();

    let starter = manager.choose_starter("Chikorita").unwrap();
    settle(&mut manager, starter, "Leaf", "Male");
    let sentret = catch(&mut manager, "Route 29", "Sentret");
    assert!(!manager.run().party().contains(sentret));
    settle(&mut manager, sentret, "Scout", "Female");

    assert_eq!(
        manager.action_options(starter, StepName::Pair).unwrap().choices,
        vec![sentret.to_choice()]
    );
    let choice = sentret.to_choice();
    manager.execute_action(starter, StepName::Pair, Some(choice.as_str())).unwrap();
    assert_eq!(manager.run().party().len(), 2);
    assert_eq!(manager.run().pokemon(starter).unwrap().metadata.partner, Some(sentret));

    let outcome = manager.execute_action(sentret, StepName::Die, None).unwrap();
    assert_eq!(outcome.updated(), &[sentret, starter]);
    assert_eq!(manager.run().pokemon(starter).unwrap().metadata.partner, None);
    assert_eq!(manager.run().party().ids(), &[starter]);
}

// =============================================================================
// Roles
// =============================================================================

/// The starter is the King, pawns can be promoted and may not evolve, and
/// the King's death ends the run.
#[test]
fn test_chess_roles() {
    init_tracing();
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, LockeKind::Chess, "Gold"), &dex).unwrap();

    let king = manager.choose_starter("Cyndaquil").unwrap();
    settle(&mut manager, king, "Crown", "Male");
    assert_eq!(manager.next_actions(king).unwrap(), vec![StepName::AssignRole]);
    assert_eq!(
        manager.action_options(king, StepName::AssignRole).unwrap().choices,
        vec!["King"]
    );
    manager.execute_action(king, StepName::AssignRole, Some("King")).unwrap();

    let pawn = catch(&mut manager, "Route 29", "Pidgey");
    assert!(!manager.run().party().contains(pawn));
    settle(&mut manager, pawn, "Pip", "Female");
    assert_eq!(
        manager.action_options(pawn, StepName::AssignRole).unwrap().choices,
        vec!["Queen", "Bishop", "Knight", "Rook", "Pawn"]
    );
    manager.execute_action(pawn, StepName::AssignRole, Some("Pawn")).unwrap();

    let offered = manager.next_actions(pawn).unwrap();
    assert!(offered.contains(&StepName::PromotePawn));
    assert!(offered.contains(&StepName::JoinParty));
    assert!(!offered.contains(&StepName::Evolve));
    assert_eq!(
        manager.action_options(pawn, StepName::PromotePawn).unwrap().choices,
        vec!["Queen", "Bishop", "Knight", "Rook"]
    );

    manager.execute_action(pawn, StepName::JoinParty, None).unwrap();
    assert!(manager.execute_action(king, StepName::LeaveParty, None).unwrap_err().is_validation());

    let outcome = manager.execute_action(king, StepName::Die, None).unwrap();
    assert!(matches!(
        outcome,
        StepOutcome::RunEnded {
            cause: RunEndCause::KingFallen,
            ..
        }
    ));
    assert!(!manager.run().is_active());
    assert_eq!(
        manager.run().pokemon(pawn).unwrap().metadata.original_role,
        Some(ChessRole::Pawn)
    );
}
