//! # Stockpile
//!
//! Indexed, slot-addressable storage over heterogeneous external item
//! holders (world containers, live actor inventories), plus grouping
//! of many storages into one logical storage with cascading
//! distribution.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure value types, no I/O
//!   - `Item` / `ItemKind`: comparable item values with exact and
//!     quantity-ignoring "similar" equality
//!   - `BlockLocation`: structural coordinate key, serde-persistable
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `Storage` + capability traits (`ItemQueryable`,
//!     `ItemReceiver`, `ItemSource`): driving API
//!   - `HolderAccess`, `HandleSource`, `WorldSource`, `ActorApi`:
//!     driven contracts the embedding host implements
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `HolderManager`: validate-then-act mediation on every access
//!   - `HandleRegistry`: key→manager deduplication with an explicit
//!     lifecycle and per-handle locks
//!   - `StorageSlot` / `DiscreteStorage`: indexed slot DAOs over one
//!     holder, with negative-index addressing and type/exact search
//!   - `StorageGroup`: ordered members, remainder-threading cascade
//!
//! - **Adapters Layer** (`adapters/`): Port implementations
//!   - in-memory universe/world/container backend
//!   - block- and actor-backed handle sources
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: every read/write validates the holder first;
//!   there is no cached last-known-good state across calls
//! - **INVARIANT-2**: a discrete storage's slot count is the holder
//!   capacity at construction time; live drift shows up only in the
//!   bulk contents calls
//! - **INVARIANT-3**: a group cascade never silently drops items:
//!   callers get full success or the exact undelivered remainder
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use stockpile::adapters::memory::MemoryUniverse;
//! use stockpile::domain::{BlockLocation, Item, ItemKind};
//! use stockpile::ports::{ItemReceiver, Storage};
//! use stockpile::service::{DiscreteStorage, HandleRegistry, StorageGroup};
//!
//! # fn main() -> Result<(), stockpile::StorageError> {
//! let universe = MemoryUniverse::new();
//! let world = universe.add_world("overworld");
//! world.place_container((0, 64, 0), "chest", 27);
//! world.place_container((0, 64, 1), "chest", 27);
//!
//! let registry = HandleRegistry::new(universe);
//! let left = DiscreteStorage::new(registry.block_manager(BlockLocation::new(0, 64, 0, "overworld")))?;
//! let right = DiscreteStorage::new(registry.block_manager(BlockLocation::new(0, 64, 1, "overworld")))?;
//!
//! let group = StorageGroup::with_members("double-chest", [
//!     Arc::new(left) as Arc<dyn Storage>,
//!     Arc::new(right) as Arc<dyn Storage>,
//! ]);
//! group.add_all(vec![Item::new(ItemKind::new("stone"), 96)])?;
//! assert_eq!(group.size()?, 54);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{ActorHandleSource, BlockHandleSource, MemoryActor, MemoryHolder, MemoryUniverse, MemoryWorld};
pub use domain::{BlockLocation, Item, ItemKind};
pub use error::StorageError;
pub use ports::{
    ActorApi, Handle, HandleSource, HolderAccess, ItemQueryable, ItemReceiver, ItemSource,
    Storage, WorldAccess, WorldSource,
};
pub use service::{DiscreteStorage, HandleKey, HandleRegistry, HolderManager, StorageGroup, StorageSlot};
