//! # Block Locations
//!
//! A stable coordinate key naming one block position in one world.
//! Locations deduplicate handle managers; they never identify item
//! values.
//!
//! ## Persistence
//!
//! Serializes to the flat record `{x, y, z, world}` and round-trips
//! exactly. An unresolvable world name at deserialize time is not an
//! error: resolution is deferred to the first `validate()` against a
//! live world source, consistent with the lazy-resolution model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block position in a named world. Immutable once constructed.
///
/// Equality and hashing are structural over all four fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockLocation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub world: String,
}

impl BlockLocation {
    pub fn new(x: i32, y: i32, z: i32, world: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            world: world.into(),
        }
    }

    /// Convenience constructor from a world name and coordinate
    /// triple.
    pub fn of(world: impl Into<String>, (x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z, world)
    }

    /// The coordinate triple without the world component.
    pub fn coordinates(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}, {})", self.world, self.x, self.y, self.z)
    }
}
