//! Host-side adapters for the engine ports.

mod file_catalog_source;
mod tick_scheduler;

pub use file_catalog_source::FileCatalogSource;
pub use tick_scheduler::TickScheduler;
