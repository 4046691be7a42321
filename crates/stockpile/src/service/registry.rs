//! # Handle Registry
//!
//! Deduplicates holder managers: one manager per distinct block
//! location, one per actor identity, shared by every storage that
//! addresses it. Get-or-create is atomic; when two callers race on the
//! first access for a key, the loser discards its candidate and uses
//! the winner's.
//!
//! The registry is an explicit object with a defined lifecycle:
//! construct it at session start, hand it to callers, call [`clear`]
//! on session teardown. There is no process-wide static instance.
//!
//! It also hands out the per-handle locks callers need to make a
//! read-then-write sequence atomic against concurrent callers; the
//! managers themselves never lock across calls.
//!
//! [`clear`]: HandleRegistry::clear

use crate::adapters::actor::ActorHandleSource;
use crate::adapters::block::BlockHandleSource;
use crate::domain::BlockLocation;
use crate::error::StorageError;
use crate::ports::{ActorApi, WorldSource};
use crate::service::HolderManager;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Identity of a managed handle, for the per-handle lock table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandleKey {
    Block(BlockLocation),
    Actor(Uuid),
}

/// Session-scoped key→manager registry.
pub struct HandleRegistry {
    worlds: Arc<dyn WorldSource>,
    blocks: DashMap<BlockLocation, Arc<HolderManager>>,
    actors: DashMap<Uuid, Arc<HolderManager>>,
    locks: DashMap<HandleKey, Arc<Mutex<()>>>,
}

impl HandleRegistry {
    /// Create a registry resolving block holders against the given
    /// world source.
    pub fn new(worlds: Arc<dyn WorldSource>) -> Self {
        Self {
            worlds,
            blocks: DashMap::new(),
            actors: DashMap::new(),
            locks: DashMap::new(),
        }
    }

    /// The shared manager for a block location, created lazily on
    /// first access.
    ///
    /// Creation never touches the world: an unreachable holder only
    /// surfaces as `HolderInvalid` from the eventual `validate()`.
    pub fn block_manager(&self, location: BlockLocation) -> Arc<HolderManager> {
        self.blocks
            .entry(location.clone())
            .or_insert_with(|| {
                debug!(%location, "creating block holder manager");
                Arc::new(HolderManager::new(Box::new(BlockHandleSource::new(
                    location,
                    Arc::clone(&self.worlds),
                ))))
            })
            .clone()
    }

    /// Like [`block_manager`], but eagerly pre-validates the holder
    /// before returning, for callers that want resolution failures at
    /// acquisition time instead of first use.
    ///
    /// [`block_manager`]: HandleRegistry::block_manager
    pub fn validated_block_manager(
        &self,
        location: BlockLocation,
    ) -> Result<Arc<HolderManager>, StorageError> {
        let manager = self.block_manager(location);
        manager.validate()?;
        Ok(manager)
    }

    /// The shared manager for an actor's inventory, keyed by the
    /// actor's stable identity.
    pub fn actor_manager(&self, actor: Arc<dyn ActorApi>) -> Arc<HolderManager> {
        self.actors
            .entry(actor.id())
            .or_insert_with(|| {
                debug!(actor = %actor.name(), id = %actor.id(), "creating actor holder manager");
                Arc::new(HolderManager::new(Box::new(ActorHandleSource::new(actor))))
            })
            .clone()
    }

    /// The mutual-exclusion lock for one handle. Callers hold it
    /// around any multi-call sequence (read-modify-write) that must be
    /// atomic against other callers of the same handle.
    pub fn handle_lock(&self, key: HandleKey) -> Arc<Mutex<()>> {
        self.locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of managers currently held (blocks + actors).
    pub fn len(&self) -> usize {
        self.blocks.len() + self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.actors.is_empty()
    }

    /// Drop every manager and lock. Called on world or session
    /// teardown; managers already handed out keep working but are no
    /// longer shared with new callers.
    pub fn clear(&self) {
        self.blocks.clear();
        self.actors.clear();
        self.locks.clear();
    }
}
