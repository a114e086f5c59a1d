//! Host environment abstraction trait definition

mod catalog_source;
mod host;
mod icon_set;
mod presenter;
mod scheduler;

pub use catalog_source::{CatalogDocuments, CatalogSource, SourceDocument};
pub use host::HostEnvironment;
pub use icon_set::{GenericIconSet, IconSet};
pub use presenter::ViewPresenter;
pub use scheduler::{ScheduledTask, Scheduler, Ticks};
