//! Service layer: orchestration over the ports.
//!
//! - [`HolderManager`]: validate-then-act mediation for every access
//! - [`HandleRegistry`]: key→manager deduplication with an explicit
//!   lifecycle
//! - [`StorageSlot`]: single-cell data-access object
//! - [`DiscreteStorage`]: indexed slot view over one holder
//! - [`StorageGroup`]: many storages as one, with cascading
//!   distribution

pub mod discrete;
pub mod group;
pub mod manager;
pub mod registry;
pub mod slot;

pub use discrete::DiscreteStorage;
pub use group::StorageGroup;
pub use manager::HolderManager;
pub use registry::{HandleKey, HandleRegistry};
pub use slot::StorageSlot;
