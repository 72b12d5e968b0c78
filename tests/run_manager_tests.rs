//! Run manager integration tests.
//!
//! These tests drive complete runs on the sample catalog: starter choice,
//! encounters, creature steps, battles and the end of a run.

use locke_engine::core::{RunId, RunSettings, ValidationError};
use locke_engine::creation::{RunCreator, WizardKey};
use locke_engine::games::sample_pokedex;
use locke_engine::manager::RunManager;
use locke_engine::rules::LockeKind;
use locke_engine::run::{EncounterStatus, LifeStatus, Run};
use locke_engine::species::Pokedex;
use locke_engine::steps::{InputKind, RunEndCause, StepName, StepOutcome};

fn new_run(dex: &Pokedex, game: &str, settings: RunSettings) -> Run {
    let mut creator = RunCreator::new("integration", LockeKind::Base, settings);
    creator.submit(dex, WizardKey::Game, game).unwrap();
    creator.finish(dex, RunId::new("integration")).unwrap()
}

fn catch(manager: &mut RunManager<'_>, route: &str, species: &str) -> locke_engine::CreatureId {
    manager.encounter(route, species).unwrap();
    manager
        .resolve_encounter(route, EncounterStatus::Caught)
        .unwrap()
        .unwrap()
}

// =============================================================================
// Encounters
// =============================================================================

/// Catching on a route walks the encounter through unmet, met and caught,
/// adds exactly one creature to the box and puts it in a party with room.
#[test]
fn test_base_catch_on_route() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    manager.choose_starter("Charmander").unwrap();

    assert_eq!(manager.run().encounter("Route 1").unwrap().status(), EncounterStatus::Unmet);
    manager.encounter("Route 1", "Pidgey").unwrap();
    assert_eq!(manager.run().encounter("Route 1").unwrap().status(), EncounterStatus::Met);

    let boxed = manager.run().pokemon_box().len();
    let id = manager
        .resolve_encounter("Route 1", EncounterStatus::Caught)
        .unwrap()
        .unwrap();

    let run = manager.run();
    assert_eq!(run.encounter("Route 1").unwrap().status(), EncounterStatus::Caught);
    assert_eq!(run.pokemon_box().len(), boxed + 1);
    assert!(run.party().contains(id));
    assert_eq!(run.encounter_count(), 1);
}

/// Once the party is full, new catches stay in the box.
#[test]
fn test_catch_with_full_party_goes_to_box() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    manager.choose_starter("Squirtle").unwrap();

    for (route, species) in [
        ("Route 1", "Pidgey"),
        ("Route 2", "Rattata"),
        ("Viridian Forest", "Pikachu"),
        ("Route 25", "Abra"),
        ("Rock Tunnel", "Machop"),
    ] {
        let id = catch(&mut manager, route, species);
        assert!(manager.run().party().contains(id));
    }
    assert!(manager.run().party().is_full());

    let id = catch(&mut manager, "Celadon City", "Eevee");
    assert!(!manager.run().party().contains(id));
    assert_eq!(manager.run().party().len(), 6);
    assert_eq!(manager.run().pokemon_box().len(), 7);
}

/// An encounter can only be met while unmet and resolved while met.
#[test]
fn test_encounter_status_guards() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();

    let err = manager.resolve_encounter("Route 1", EncounterStatus::Ran).unwrap_err();
    assert!(err.is_validation());

    manager.encounter("Route 1", "Rattata").unwrap();
    assert!(manager.encounter("Route 1", "Pidgey").unwrap_err().is_validation());
    assert_eq!(
        manager.resolve_encounter("Route 1", EncounterStatus::Met).unwrap_err(),
        ValidationError::InvalidResolution(EncounterStatus::Met).into()
    );

    assert_eq!(manager.resolve_encounter("Route 1", EncounterStatus::Ran).unwrap(), None);
    assert!(manager.encounter("Route 1", "Pidgey").unwrap_err().is_validation());
}

/// Species that do not live on a route cannot be met there.
#[test]
fn test_encounter_species_must_live_on_route() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();

    assert_eq!(
        manager.encounter("Route 1", "Dratini").unwrap_err(),
        ValidationError::SpeciesNotAvailable("Dratini".to_string()).into()
    );
    assert!(manager.encounter("Route 404", "Pidgey").unwrap_err().is_not_found());
}

/// Randomized runs may meet any pool species anywhere.
#[test]
fn test_randomized_encounters() {
    let dex = sample_pokedex();
    let settings = RunSettings::new().with_randomized(true);
    let mut manager = RunManager::new(new_run(&dex, "Red", settings), &dex).unwrap();

    let options = manager.potential_encounters("Route 1").unwrap();
    assert!(options.iter().any(|s| s == "Dratini"));
    manager.encounter("Route 1", "Dratini").unwrap();
}

// =============================================================================
// Steps
// =============================================================================

/// A fresh creature is only offered its mandatory steps.
#[test]
fn test_mandatory_steps_come_first() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Gold", RunSettings::new()), &dex).unwrap();
    let id = manager.choose_starter("Totodile").unwrap();

    assert_eq!(manager.next_actions(id).unwrap(), vec![StepName::Nickname]);
    manager.execute_action(id, StepName::Nickname, Some("Chomp")).unwrap();
    assert_eq!(manager.next_actions(id).unwrap(), vec![StepName::Gender]);

    let options = manager.action_options(id, StepName::Gender).unwrap();
    assert_eq!(options.kind, InputKind::OneOf);
    assert_eq!(options.choices, vec!["Male", "Female"]);
    manager.execute_action(id, StepName::Gender, Some("Female")).unwrap();

    let offered = manager.next_actions(id).unwrap();
    assert!(offered.contains(&StepName::Evolve));
    assert!(offered.contains(&StepName::Die));
    assert!(!offered.contains(&StepName::Nickname));
}

/// Nicknames are unique within a run regardless of case.
#[test]
fn test_nickname_unique() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    let starter = manager.choose_starter("Bulbasaur").unwrap();
    let pidgey = catch(&mut manager, "Route 1", "Pidgey");

    manager.execute_action(starter, StepName::Nickname, Some("Leaf")).unwrap();
    assert_eq!(
        manager.execute_action(pidgey, StepName::Nickname, Some("leaf")).unwrap_err(),
        ValidationError::NicknameTaken("leaf".to_string()).into()
    );
    manager.execute_action(pidgey, StepName::Nickname, Some("Wing")).unwrap();
}

/// Evolution follows the pool and replaces the species in place.
#[test]
fn test_evolve() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    let id = manager.choose_starter("Bulbasaur").unwrap();
    manager.execute_action(id, StepName::Nickname, Some("Bulb")).unwrap();

    let options = manager.action_options(id, StepName::Evolve).unwrap();
    assert_eq!(options.choices, vec!["Ivysaur"]);
    assert!(manager.execute_action(id, StepName::Evolve, Some("Venusaur")).is_err());

    manager.execute_action(id, StepName::Evolve, Some("Ivysaur")).unwrap();
    assert_eq!(manager.run().pokemon(id).unwrap().name, "Ivysaur");
}

/// A boxed creature can swap with a party member.
#[test]
fn test_replace_party_member() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    let starter = manager.choose_starter("Bulbasaur").unwrap();
    manager.execute_action(starter, StepName::Nickname, Some("Bulb")).unwrap();
    let pidgey = catch(&mut manager, "Route 1", "Pidgey");
    manager.execute_action(pidgey, StepName::Nickname, Some("Wing")).unwrap();

    manager.execute_action(pidgey, StepName::LeaveParty, None).unwrap();
    assert!(!manager.run().party().contains(pidgey));
    assert!(!manager.next_actions(starter).unwrap().contains(&StepName::LeaveParty));

    let choice = starter.to_choice();
    manager
        .execute_action(pidgey, StepName::ReplacePartyMember, Some(choice.as_str()))
        .unwrap();
    assert_eq!(manager.run().party().ids(), &[pidgey]);
}

/// Killing a member of a larger party just removes it.
#[test]
fn test_die_outside_last_member() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    let starter = manager.choose_starter("Charmander").unwrap();
    let pidgey = catch(&mut manager, "Route 1", "Pidgey");
    manager.execute_action(pidgey, StepName::Nickname, Some("Wing")).unwrap();

    let outcome = manager.execute_action(pidgey, StepName::Die, None).unwrap();
    assert_eq!(outcome, StepOutcome::applied(vec![pidgey]));
    assert_eq!(manager.run().pokemon(pidgey).unwrap().status, LifeStatus::Dead);
    assert_eq!(manager.run().party().ids(), &[starter]);
    assert!(manager.next_actions(pidgey).unwrap().is_empty());
}

/// The last living party member dying ends the run.
#[test]
fn test_last_member_death_ends_run() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    let id = manager.choose_starter("Charmander").unwrap();
    manager.execute_action(id, StepName::Nickname, Some("Ember")).unwrap();

    let outcome = manager.execute_action(id, StepName::Die, None).unwrap();
    assert_eq!(
        outcome,
        StepOutcome::RunEnded {
            cause: RunEndCause::PartyWiped,
            updated: vec![id],
        }
    );
    assert!(!manager.run().is_active());
    assert_eq!(
        manager.encounter("Route 1", "Pidgey").unwrap_err(),
        ValidationError::RunFinished.into()
    );
}

/// Calling next_actions twice without a change returns the same list.
#[test]
fn test_next_actions_idempotent() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Gold", RunSettings::new()), &dex).unwrap();
    let id = manager.choose_starter("Chikorita").unwrap();
    manager.execute_action(id, StepName::Nickname, Some("Leafy")).unwrap();
    manager.execute_action(id, StepName::Gender, Some("Male")).unwrap();

    let first = manager.next_actions(id).unwrap();
    let second = manager.next_actions(id).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Battles and lifecycle
// =============================================================================

/// A second result against the same trainer replaces the first.
#[test]
fn test_battles_replace_by_opponent() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();

    manager.record_battle("Brock", false).unwrap();
    manager.win_battle("Brock").unwrap();
    manager.win_battle("Misty").unwrap();

    let run = manager.run();
    assert_eq!(run.battle_count(), 2);
    assert!(run.battles().all(|b| b.won));
}

/// A finished run refuses further changes.
#[test]
fn test_finish_run() {
    let dex = sample_pokedex();
    let mut manager = RunManager::new(new_run(&dex, "Red", RunSettings::new()), &dex).unwrap();
    manager.finish().unwrap();

    assert_eq!(manager.finish().unwrap_err(), ValidationError::RunFinished.into());
    assert_eq!(manager.win_battle("Brock").unwrap_err(), ValidationError::RunFinished.into());
}
