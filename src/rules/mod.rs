//! Variant rules.
//!
//! A run's [`LockeConfig`] is turned into a [`Locke`]: the capability
//! record the manager and wizard consult for everything variant-specific.
//!
//! ## Capabilities
//!
//! - rule text shown to the player
//! - oldest supported generation
//! - catch relevance predicate (drives the catchable pool)
//! - catch side effect
//! - step graph and step catalog

pub mod kind;
pub mod locke;
pub mod variants;

pub use kind::{LockeConfig, LockeKind};
pub use locke::{CatchRule, GraphShape, Locke};
pub use variants::ChessRole;
