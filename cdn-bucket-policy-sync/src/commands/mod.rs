//! Commands module - service layer for policy synchronization operations

mod apply;
mod plan;
pub(crate) mod service;
mod sync;

pub use plan::plan;
pub use service::PolicySyncService;
