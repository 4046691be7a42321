//! Adapters layer: concrete implementations of the outbound ports.
//!
//! - `memory`: in-memory universe/world/container holders, used by the
//!   test suites and by embedders that want a self-contained backend
//! - `block`: handle source resolving a container through a world
//!   lookup, with lazy world caching
//! - `actor`: handle source over a live actor's inventory

pub mod actor;
pub mod block;
pub mod memory;

pub use actor::{ActorHandleSource, MemoryActor};
pub use block::BlockHandleSource;
pub use memory::{MemoryHolder, MemoryUniverse, MemoryWorld};
