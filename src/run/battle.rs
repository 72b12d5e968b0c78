//! Battle records. Only the outcome is tracked.

use serde::{Deserialize, Serialize};

/// Outcome of a fight against a named opponent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Battle {
    pub opponent: String,
    pub won: bool,
}

impl Battle {
    #[must_use]
    pub fn new(opponent: impl Into<String>, won: bool) -> Self {
        Self {
            opponent: opponent.into(),
            won,
        }
    }
}
