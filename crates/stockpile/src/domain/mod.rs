//! Domain layer: pure value types, no I/O.

pub mod item;
pub mod location;

pub use item::{Item, ItemKind, DEFAULT_MAX_STACK};
pub use location::BlockLocation;
