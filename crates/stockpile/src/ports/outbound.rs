//! Outbound Ports (Driven Ports)
//!
//! Contracts the embedding host implements: raw holder access, handle
//! resolution per holder kind, and the world/actor collaborators the
//! built-in handle sources resolve against.

use crate::domain::Item;
use crate::error::StorageError;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A live reference to an external holder.
///
/// Handles are produced by [`HandleSource::resolve`] and are only
/// trusted for the duration of a single manager call; the next call
/// re-resolves.
pub type Handle = Arc<dyn HolderAccess>;

/// Raw positional access to an external holder's contents.
///
/// This is the full holder provider contract; every storage operation
/// ultimately bottoms out here.
pub trait HolderAccess: Send + Sync {
    /// Display name of the holder.
    fn name(&self) -> Result<String, StorageError>;

    /// Current live capacity in slots.
    fn size(&self) -> Result<usize, StorageError>;

    /// Item at a position, `None` when the slot is empty.
    ///
    /// Fails with `IndexOutOfBounds` past the live capacity.
    fn item_at(&self, index: usize) -> Result<Option<Item>, StorageError>;

    /// Replace the item at a position; `None` clears the slot.
    fn set_item_at(&self, index: usize, item: Option<Item>) -> Result<(), StorageError>;

    /// Snapshot of the full contents array.
    fn contents(&self) -> Result<Vec<Option<Item>>, StorageError>;

    /// Replace the full contents array. Inputs shorter than the
    /// capacity leave the tail empty; inputs longer than the capacity
    /// fail with `IndexOutOfBounds`.
    fn set_contents(&self, items: &[Option<Item>]) -> Result<(), StorageError>;

    /// Empty every slot.
    fn clear(&self) -> Result<(), StorageError>;

    /// Whether at least `amount` units of the kind are present.
    fn contains_kind(&self, kind: &crate::domain::ItemKind, amount: u64)
        -> Result<bool, StorageError>;

    /// Whether at least `amount` units similar to `item` are present.
    fn contains_similar(&self, item: &Item, amount: u64) -> Result<bool, StorageError>;

    /// Whether at least `amount` stacks exactly equal to `item` are
    /// present.
    fn contains_exact(&self, item: &Item, amount: u64) -> Result<bool, StorageError>;

    /// Stack items into the holder, returning the undelivered
    /// remainder.
    fn add_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError>;

    /// Take items out of the holder, returning the not-found
    /// remainder.
    fn remove_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError>;

    /// Post-update hook. The manager invokes this once after every
    /// successful mutating call so the holder can propagate the change
    /// (refresh viewers, mark state dirty).
    fn commit(&self) -> Result<(), StorageError>;
}

// Opaque: reading the holder's contents for Debug output would be an
// unvalidated backend call.
impl fmt::Debug for dyn HolderAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HolderAccess")
    }
}

/// Resolves a handle for one specific holder.
///
/// One source exists per holder identity (a block location, an actor).
/// `resolve` runs on **every** manager call: a holder valid on one
/// call may be gone on the next. Implementations must not cache a
/// failed resolution.
pub trait HandleSource: Send + Sync {
    fn resolve(&self) -> Result<Handle, StorageError>;
}

impl<T: HandleSource + ?Sized> HandleSource for Arc<T> {
    fn resolve(&self) -> Result<Handle, StorageError> {
        (**self).resolve()
    }
}

/// Entry point into the world collaborator: named world lookup.
pub trait WorldSource: Send + Sync {
    /// The loaded world with this name, if any. A `None` here is not
    /// remembered; the next resolution retries.
    fn world(&self, name: &str) -> Option<Arc<dyn WorldAccess>>;
}

/// One loaded world that can resolve container holders by coordinate.
pub trait WorldAccess: Send + Sync {
    fn name(&self) -> String;

    /// The container-shaped holder at a block position.
    ///
    /// Fails with `HolderInvalid` when the position does not currently
    /// hold a container (broken, replaced, never placed). May block on
    /// slow region loading.
    fn container_at(&self, x: i32, y: i32, z: i32) -> Result<Handle, StorageError>;
}

/// A live actor whose inventory backs a storage.
pub trait ActorApi: Send + Sync {
    /// Stable identity used to deduplicate managers.
    fn id(&self) -> Uuid;

    fn name(&self) -> String;

    /// Whether the actor is still eligible (connected, alive).
    fn is_valid(&self) -> bool;

    /// The actor's inventory holder.
    fn inventory(&self) -> Handle;

    /// Notify the actor that its inventory changed (client refresh).
    fn notify_updated(&self);
}
