//! # Block Handle Source
//!
//! Resolves the container holder at a block location: world lookup by
//! name, then a container lookup at the coordinates. The resolved
//! world is cached lazily with first-write-wins semantics; a failed
//! world lookup is never cached, so resolution retries on every call
//! until it first succeeds. The container itself is re-resolved on
//! every call, because the block can change between calls.

use crate::domain::BlockLocation;
use crate::error::StorageError;
use crate::ports::{Handle, HandleSource, WorldAccess, WorldSource};
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle source for a container at a fixed block location.
pub struct BlockHandleSource {
    location: BlockLocation,
    worlds: Arc<dyn WorldSource>,
    resolved_world: RwLock<Option<Arc<dyn WorldAccess>>>,
}

impl BlockHandleSource {
    pub fn new(location: BlockLocation, worlds: Arc<dyn WorldSource>) -> Self {
        Self {
            location,
            worlds,
            resolved_world: RwLock::new(None),
        }
    }

    pub fn location(&self) -> &BlockLocation {
        &self.location
    }

    /// The cached world, resolving it on first success. When two
    /// threads race the first resolution, the first write wins and the
    /// loser adopts it.
    fn world(&self) -> Option<Arc<dyn WorldAccess>> {
        if let Some(world) = self.resolved_world.read().as_ref() {
            return Some(Arc::clone(world));
        }
        let fresh = self.worlds.world(&self.location.world)?;
        let mut cached = self.resolved_world.write();
        Some(Arc::clone(cached.get_or_insert(fresh)))
    }
}

impl HandleSource for BlockHandleSource {
    fn resolve(&self) -> Result<Handle, StorageError> {
        let world = self.world().ok_or_else(|| {
            StorageError::invalid(format!("world '{}' is not loaded", self.location.world))
        })?;
        world.container_at(self.location.x, self.location.y, self.location.z)
    }
}
