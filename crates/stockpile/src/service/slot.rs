//! # Storage Slots
//!
//! A slot is a data-access object over one cell of a holder: it keeps
//! an index and a manager, never the item itself. Every read and write
//! routes through the manager's validate-then-act step.
//!
//! The compound operations (`update`, `get_and_update`,
//! `update_and_get`) are conveniences built from `item`/`set_item`.
//! Each compound operation issues two separate manager calls, so none
//! of them is atomic against concurrent external mutation.

use crate::domain::Item;
use crate::error::StorageError;
use crate::service::HolderManager;
use std::fmt;
use std::sync::Arc;

/// Single-cell DAO addressing one position of a holder.
pub struct StorageSlot {
    index: usize,
    manager: Arc<HolderManager>,
}

impl StorageSlot {
    pub(crate) fn new(index: usize, manager: Arc<HolderManager>) -> Self {
        Self { index, manager }
    }

    /// Index of this slot, assigned once at storage construction.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current contents of the slot.
    pub fn item(&self) -> Result<Option<Item>, StorageError> {
        self.manager.query(|holder| holder.item_at(self.index))
    }

    /// Replace the contents of the slot; `None` clears it.
    pub fn set_item(&self, item: Option<Item>) -> Result<(), StorageError> {
        self.manager
            .update(|holder| holder.set_item_at(self.index, item))
    }

    /// Replace the contents using the output of a producer.
    pub fn set(&self, producer: impl FnOnce() -> Option<Item>) -> Result<(), StorageError> {
        self.set_item(producer())
    }

    /// Apply a transform to the current contents and store the result.
    /// Empty is a legal input and output of the transform.
    pub fn update(
        &self,
        transform: impl FnOnce(Option<Item>) -> Option<Item>,
    ) -> Result<(), StorageError> {
        let current = self.item()?;
        self.set_item(transform(current))
    }

    /// Apply a transform and return the **pre-update** contents.
    pub fn get_and_update(
        &self,
        transform: impl FnOnce(Option<Item>) -> Option<Item>,
    ) -> Result<Option<Item>, StorageError> {
        let original = self.item()?;
        self.set_item(transform(original.clone()))?;
        Ok(original)
    }

    /// Apply a transform and return the **post-update** contents.
    pub fn update_and_get(
        &self,
        transform: impl FnOnce(Option<Item>) -> Option<Item>,
    ) -> Result<Option<Item>, StorageError> {
        self.update(transform)?;
        self.item()
    }
}

impl fmt::Debug for StorageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSlot")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
