//! AvantGarde Menu Core Library
//!
//! Menu navigation and command dispatch engine for a game server, including:
//! - Menu catalog loading with atomic reload (`CatalogService`)
//! - Per-user navigation and the click state machine (`DispatchCoordinator`)
//! - The item command mini-language and multi-step admin flows
//!
//! The host server is reached only through the traits in [`traits`]: the engine
//! never executes commands, stores permissions or draws dialogs itself.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{MenuError, MenuResult};
pub use services::{AdminService, CatalogService, DispatchCoordinator, EngineContext};
pub use traits::{CatalogSource, HostEnvironment, IconSet, Scheduler, ViewPresenter};
