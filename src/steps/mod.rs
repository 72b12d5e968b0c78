//! Creature-level actions and the resolver that orders them.
//!
//! ## Components
//!
//! - [`Step`]: one action (predicate, options, executor)
//! - [`StepCatalog`]: the steps a variant uses, with overrides applied
//! - [`StepResolver`]: which steps are offered, honoring prerequisites

pub mod step;
pub mod standard;
pub mod catalog;
pub mod resolver;

pub use step::{
    InputKind, RunEndCause, Step, StepContext, StepInfo, StepName, StepOptions, StepOutcome,
};
pub use catalog::StepCatalog;
pub use resolver::StepResolver;
