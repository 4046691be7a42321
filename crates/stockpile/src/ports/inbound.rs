//! Inbound Ports (Driving Ports)
//!
//! Capability traits callers use to talk to any storage. They are
//! split so a type can be only a source, only a receiver, or only
//! queryable; [`Storage`] composes all three for fully-featured
//! storages (discrete storages, groups).
//!
//! Bulk add/remove report their outcome as a **remainder value** (the
//! items not yet delivered or removed) rather than as error control
//! flow; the group cascade threads that remainder from member to
//! member. The provided `*_all`/`*_item` wrappers convert a non-empty
//! remainder into [`StorageError::PartialTransfer`] for callers that
//! want all-or-error semantics.

use crate::domain::{Item, ItemKind};
use crate::error::StorageError;

/// An object that may be tested for the presence of items.
pub trait ItemQueryable {
    /// Whether at least one item of the kind is present.
    fn contains(&self, kind: &ItemKind) -> Result<bool, StorageError> {
        self.contains_at_least(kind, 1)
    }

    /// Whether at least `amount` units of the kind are present,
    /// summed across stacks.
    fn contains_at_least(&self, kind: &ItemKind, amount: u64) -> Result<bool, StorageError>;

    /// Whether at least `amount` units similar to `item` are present
    /// (kind and metadata match, quantity ignored). Useful for
    /// stackable items.
    fn contains_similar(&self, item: &Item, amount: u64) -> Result<bool, StorageError>;

    /// Whether at least `amount` stacks exactly equal to `item` are
    /// present (kind, quantity and metadata all match).
    fn contains_exact(&self, item: &Item, amount: u64) -> Result<bool, StorageError>;
}

/// An object to which items may be given.
pub trait ItemReceiver {
    /// Add items, returning the undelivered remainder.
    ///
    /// An empty remainder means full delivery. A hard error means the
    /// backend could not be driven at all; nothing is reported
    /// delivered in that case.
    fn add_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError>;

    /// Add items, failing with `PartialTransfer` if any are left over.
    fn add_all(&self, items: Vec<Item>) -> Result<(), StorageError> {
        let leftover = self.add_items(items)?;
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(StorageError::PartialTransfer { leftover })
        }
    }

    /// Add a single stack, failing with `PartialTransfer` if it does
    /// not fit completely.
    fn add_item(&self, item: Item) -> Result<(), StorageError> {
        self.add_all(vec![item])
    }
}

/// An object from which items may be taken.
pub trait ItemSource {
    /// Remove items, returning the not-yet-removed remainder.
    fn remove_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError>;

    /// Remove items, failing with `PartialTransfer` if any could not
    /// be removed.
    fn remove_all(&self, items: Vec<Item>) -> Result<(), StorageError> {
        let leftover = self.remove_items(items)?;
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(StorageError::PartialTransfer { leftover })
        }
    }

    /// Remove a single stack, failing with `PartialTransfer` if it
    /// could not be removed in full.
    fn remove_item(&self, item: Item) -> Result<(), StorageError> {
        self.remove_all(vec![item])
    }

    /// Clear every stack of the given kind. Returns whether anything
    /// was removed.
    fn remove_kind(&self, kind: &ItemKind) -> Result<bool, StorageError>;

    /// Clear every stack exactly equal to `item` (kind, quantity and
    /// metadata). Returns whether anything was removed.
    fn remove_exact(&self, item: &Item) -> Result<bool, StorageError>;
}

/// A fully-featured item storage.
///
/// Object safe: groups hold their members as `Arc<dyn Storage>`.
pub trait Storage: ItemQueryable + ItemReceiver + ItemSource + Send + Sync {
    /// Human-readable name of the storage.
    fn name(&self) -> Result<String, StorageError>;

    /// Capacity of the storage in slots.
    fn size(&self) -> Result<usize, StorageError>;

    /// Clear the entire storage.
    fn clear(&self) -> Result<(), StorageError>;
}
