//! # Discrete Storage
//!
//! An ordered sequence of independently mutable slots materialized
//! from one holder. The slot count is a snapshot of the holder's
//! capacity at construction time; later live-capacity changes show up
//! only in the bulk contents calls, which talk to the holder directly.
//!
//! ## Indexing
//!
//! `slot(index)` accepts negative indices counting from the end:
//! `-1` is the last slot, `-2` the second-to-last. The valid range is
//! `[-len, len - 1]` inclusive on both ends; anything else fails with
//! `IndexOutOfBounds`.

use crate::domain::{Item, ItemKind};
use crate::error::StorageError;
use crate::ports::{ItemQueryable, ItemReceiver, ItemSource, Storage};
use crate::service::{HolderManager, StorageSlot};
use std::sync::Arc;

/// Indexed slot view over one managed holder.
pub struct DiscreteStorage {
    manager: Arc<HolderManager>,
    slots: Vec<StorageSlot>,
}

impl DiscreteStorage {
    /// Materialize one slot per position of the holder's current
    /// capacity. Fails if the holder cannot be validated.
    pub fn new(manager: Arc<HolderManager>) -> Result<Self, StorageError> {
        let size = manager.query(|holder| holder.size())?;
        let slots = (0..size)
            .map(|index| StorageSlot::new(index, Arc::clone(&manager)))
            .collect();
        Ok(Self { manager, slots })
    }

    /// Number of slots (the construction-time capacity snapshot).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot at `index`; negative indices count from the end.
    pub fn slot(&self, index: isize) -> Result<&StorageSlot, StorageError> {
        let size = self.slots.len();
        let resolved = if index < 0 {
            index + size as isize
        } else {
            index
        };
        if resolved < 0 || resolved >= size as isize {
            return Err(StorageError::IndexOutOfBounds { index, size });
        }
        Ok(&self.slots[resolved as usize])
    }

    /// Clear the slot at `index`.
    pub fn clear_slot(&self, index: isize) -> Result<(), StorageError> {
        self.slot(index)?.set_item(None)
    }

    /// Replace the item at `index`; `None` clears the slot.
    pub fn set_slot_item(&self, index: isize, item: Option<Item>) -> Result<(), StorageError> {
        self.slot(index)?.set_item(item)
    }

    /// Slots whose current contents match the kind, in ascending index
    /// order. Empty slots never match.
    pub fn find(&self, kind: &ItemKind) -> Result<Vec<&StorageSlot>, StorageError> {
        let mut matches = Vec::new();
        for slot in &self.slots {
            if slot.item()?.is_some_and(|item| item.kind == *kind) {
                matches.push(slot);
            }
        }
        Ok(matches)
    }

    /// Slots whose current contents equal `item` exactly (kind,
    /// quantity and metadata), in ascending index order.
    pub fn find_exact(&self, item: &Item) -> Result<Vec<&StorageSlot>, StorageError> {
        let mut matches = Vec::new();
        for slot in &self.slots {
            if slot.item()?.as_ref() == Some(item) {
                matches.push(slot);
            }
        }
        Ok(matches)
    }

    /// Full contents snapshot, straight from the holder.
    ///
    /// Bypasses the per-slot path, so it reflects the holder's live
    /// capacity even when it has drifted from the slot count.
    pub fn contents(&self) -> Result<Vec<Option<Item>>, StorageError> {
        self.manager.query(|holder| holder.contents())
    }

    /// Replace the holder's contents wholesale. Fails with
    /// `IndexOutOfBounds` if `items` exceeds the holder's live
    /// capacity.
    pub fn set_contents(&self, items: &[Option<Item>]) -> Result<(), StorageError> {
        self.manager.update(|holder| holder.set_contents(items))
    }

    /// Restartable iterator over the slots in ascending index order.
    ///
    /// Slots are DAOs: mutating one mid-iteration is permitted and
    /// visible to later steps of the same iteration.
    pub fn iter(&self) -> impl Iterator<Item = &StorageSlot> {
        self.slots.iter()
    }
}

impl<'a> IntoIterator for &'a DiscreteStorage {
    type Item = &'a StorageSlot;
    type IntoIter = std::slice::Iter<'a, StorageSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl ItemQueryable for DiscreteStorage {
    fn contains_at_least(&self, kind: &ItemKind, amount: u64) -> Result<bool, StorageError> {
        self.manager.query(|holder| holder.contains_kind(kind, amount))
    }

    fn contains_similar(&self, item: &Item, amount: u64) -> Result<bool, StorageError> {
        self.manager
            .query(|holder| holder.contains_similar(item, amount))
    }

    fn contains_exact(&self, item: &Item, amount: u64) -> Result<bool, StorageError> {
        self.manager
            .query(|holder| holder.contains_exact(item, amount))
    }
}

impl ItemReceiver for DiscreteStorage {
    fn add_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        self.manager.update(|holder| holder.add_items(items))
    }
}

impl ItemSource for DiscreteStorage {
    fn remove_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        self.manager.update(|holder| holder.remove_items(items))
    }

    fn remove_kind(&self, kind: &ItemKind) -> Result<bool, StorageError> {
        let mut removed = false;
        for slot in &self.slots {
            if slot.item()?.is_some_and(|item| item.kind == *kind) {
                slot.set_item(None)?;
                removed = true;
            }
        }
        Ok(removed)
    }

    fn remove_exact(&self, item: &Item) -> Result<bool, StorageError> {
        let mut removed = false;
        for slot in &self.slots {
            if slot.item()?.as_ref() == Some(item) {
                slot.set_item(None)?;
                removed = true;
            }
        }
        Ok(removed)
    }
}

impl Storage for DiscreteStorage {
    fn name(&self) -> Result<String, StorageError> {
        self.manager.query(|holder| holder.name())
    }

    fn size(&self) -> Result<usize, StorageError> {
        Ok(self.slots.len())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.manager.update(|holder| holder.clear())
    }
}
