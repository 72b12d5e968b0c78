//! Running a created run.
//!
//! ## Components
//!
//! - [`RunManager`]: every in-play operation on one loaded run
//! - [`RunStore`]: persistence contract, with [`MemoryStore`] as the
//!   in-process implementation
//! - [`RunService`]: load, mutate and save in one call

pub mod run_manager;
pub mod store;
pub mod service;

pub use run_manager::RunManager;
pub use store::{MemoryStore, RunStore};
pub use service::RunService;
