//! Run creation.
//!
//! A [`RunCreator`] asks for one [`WizardKey`] at a time until the
//! variant's configuration is complete, then freezes it into a
//! [`LockeConfig`](crate::rules::LockeConfig) and builds the [`Run`](crate::run::Run)
//! with its catchable pool and opening catches.

pub mod key;
pub mod pool;
pub mod creator;

pub use key::{Progress, WizardKey};
pub use pool::compute_pool;
pub use creator::RunCreator;
