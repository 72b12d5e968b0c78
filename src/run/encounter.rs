//! Route encounters and their lifecycle.
//!
//! ## State machine
//!
//! ```text
//! Unmet --meet(species)--> Met --resolve--> Caught | Killed | Ran
//! ```
//!
//! Every transition is guarded. Meeting requires `Unmet`, resolving requires
//! `Met`, and resolving to `Caught` requires the ID of the creature that was
//! created for the catch.

use serde::{Deserialize, Serialize};

use crate::core::{CreatureId, ValidationError};

/// Where an encounter is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterStatus {
    #[default]
    Unmet,
    Met,
    Caught,
    Killed,
    Ran,
}

impl EncounterStatus {
    /// Whether this status ends the encounter.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Caught | Self::Killed | Self::Ran)
    }
}

impl std::fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unmet => "unmet",
            Self::Met => "met",
            Self::Caught => "caught",
            Self::Killed => "killed",
            Self::Ran => "ran",
        };
        f.write_str(name)
    }
}

/// What was found on the route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterSubject {
    #[default]
    Nothing,
    /// A wild species, not (yet) owned.
    Species(String),
    /// The owned creature created when the encounter was caught.
    Caught(CreatureId),
}

/// One route's encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub route: String,
    status: EncounterStatus,
    subject: EncounterSubject,
}

impl Encounter {
    /// A fresh, unmet encounter for `route`.
    #[must_use]
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            status: EncounterStatus::Unmet,
            subject: EncounterSubject::Nothing,
        }
    }

    #[must_use]
    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    #[must_use]
    pub fn subject(&self) -> &EncounterSubject {
        &self.subject
    }

    /// Species met on this route, if any has been met and not caught.
    #[must_use]
    pub fn species(&self) -> Option<&str> {
        match &self.subject {
            EncounterSubject::Species(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_caught(&self) -> bool {
        self.status == EncounterStatus::Caught && matches!(self.subject, EncounterSubject::Caught(_))
    }

    fn expect_status(&self, expected: EncounterStatus) -> Result<(), ValidationError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(ValidationError::EncounterStatus {
                route: self.route.clone(),
                expected,
                actual: self.status,
            })
        }
    }

    /// Record the species met on this route.
    pub fn meet(&mut self, species: impl Into<String>) -> Result<(), ValidationError> {
        self.expect_status(EncounterStatus::Unmet)?;
        self.status = EncounterStatus::Met;
        self.subject = EncounterSubject::Species(species.into());
        Ok(())
    }

    /// Check that the encounter may be resolved to `status`.
    ///
    /// Exposed separately so callers can validate before creating the
    /// creature a catch needs.
    pub fn check_resolve(&self, status: EncounterStatus) -> Result<(), ValidationError> {
        self.expect_status(EncounterStatus::Met)?;
        if !status.is_final() {
            return Err(ValidationError::InvalidResolution(status));
        }
        Ok(())
    }

    /// Resolve a met encounter as killed or ran.
    pub fn resolve(&mut self, status: EncounterStatus) -> Result<(), ValidationError> {
        self.check_resolve(status)?;
        if status == EncounterStatus::Caught {
            return Err(ValidationError::InvalidResolution(status));
        }
        self.status = status;
        Ok(())
    }

    /// Resolve a met encounter as caught by `creature`.
    pub fn resolve_caught(&mut self, creature: CreatureId) -> Result<(), ValidationError> {
        self.check_resolve(EncounterStatus::Caught)?;
        self.status = EncounterStatus::Caught;
        self.subject = EncounterSubject::Caught(creature);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unmet() {
        let enc = Encounter::new("Route 1");
        assert_eq!(enc.status(), EncounterStatus::Unmet);
        assert_eq!(enc.subject(), &EncounterSubject::Nothing);
        assert!(!enc.is_caught());
    }

    #[test]
    fn test_meet_then_catch() {
        let mut enc = Encounter::new("Route 1");
        enc.meet("Pidgey").unwrap();
        assert_eq!(enc.species(), Some("Pidgey"));

        enc.resolve_caught(CreatureId(3)).unwrap();
        assert!(enc.is_caught());
        assert_eq!(enc.subject(), &EncounterSubject::Caught(CreatureId(3)));
        assert!(enc.species().is_none());
    }

    #[test]
    fn test_meet_twice_fails() {
        let mut enc = Encounter::new("Route 1");
        enc.meet("Pidgey").unwrap();
        let err = enc.meet("Rattata").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::EncounterStatus { expected: EncounterStatus::Unmet, actual: EncounterStatus::Met, .. }
        ));
    }

    #[test]
    fn test_resolve_requires_met() {
        let mut enc = Encounter::new("Route 1");
        assert!(enc.resolve(EncounterStatus::Ran).is_err());
        assert!(enc.resolve_caught(CreatureId(0)).is_err());
    }

    #[test]
    fn test_resolve_rejects_non_final() {
        let mut enc = Encounter::new("Route 1");
        enc.meet("Pidgey").unwrap();
        assert_eq!(
            enc.resolve(EncounterStatus::Unmet),
            Err(ValidationError::InvalidResolution(EncounterStatus::Unmet))
        );
        assert_eq!(
            enc.resolve(EncounterStatus::Caught),
            Err(ValidationError::InvalidResolution(EncounterStatus::Caught))
        );
    }

    #[test]
    fn test_resolve_ran_keeps_species() {
        let mut enc = Encounter::new("Route 1");
        enc.meet("Pidgey").unwrap();
        enc.resolve(EncounterStatus::Ran).unwrap();
        assert_eq!(enc.status(), EncounterStatus::Ran);
        assert_eq!(enc.species(), Some("Pidgey"));
        assert!(enc.resolve(EncounterStatus::Killed).is_err());
    }
}
