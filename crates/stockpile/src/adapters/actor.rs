//! # Actor Handle Source
//!
//! Resolves a live actor's inventory as a holder. Validation checks
//! the actor's eligibility on every call; a disconnected actor fails
//! `HolderInvalid` until it is valid again. The post-update commit
//! hook notifies the actor that its inventory changed, in addition to
//! the inventory's own commit.

use crate::domain::{Item, ItemKind};
use crate::error::StorageError;
use crate::ports::{ActorApi, Handle, HandleSource, HolderAccess};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use super::memory::MemoryHolder;

/// Handle source over one actor's inventory.
pub struct ActorHandleSource {
    actor: Arc<dyn ActorApi>,
}

impl ActorHandleSource {
    pub fn new(actor: Arc<dyn ActorApi>) -> Self {
        Self { actor }
    }
}

impl HandleSource for ActorHandleSource {
    fn resolve(&self) -> Result<Handle, StorageError> {
        if !self.actor.is_valid() {
            return Err(StorageError::invalid(format!(
                "actor '{}' is no longer connected",
                self.actor.name()
            )));
        }
        Ok(Arc::new(ActorInventoryHandle {
            actor: Arc::clone(&self.actor),
        }))
    }
}

/// Handle wrapping an actor's inventory so that commits also notify
/// the actor.
struct ActorInventoryHandle {
    actor: Arc<dyn ActorApi>,
}

impl HolderAccess for ActorInventoryHandle {
    fn name(&self) -> Result<String, StorageError> {
        Ok(self.actor.name())
    }

    fn size(&self) -> Result<usize, StorageError> {
        self.actor.inventory().size()
    }

    fn item_at(&self, index: usize) -> Result<Option<Item>, StorageError> {
        self.actor.inventory().item_at(index)
    }

    fn set_item_at(&self, index: usize, item: Option<Item>) -> Result<(), StorageError> {
        self.actor.inventory().set_item_at(index, item)
    }

    fn contents(&self) -> Result<Vec<Option<Item>>, StorageError> {
        self.actor.inventory().contents()
    }

    fn set_contents(&self, items: &[Option<Item>]) -> Result<(), StorageError> {
        self.actor.inventory().set_contents(items)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.actor.inventory().clear()
    }

    fn contains_kind(&self, kind: &ItemKind, amount: u64) -> Result<bool, StorageError> {
        self.actor.inventory().contains_kind(kind, amount)
    }

    fn contains_similar(&self, item: &Item, amount: u64) -> Result<bool, StorageError> {
        self.actor.inventory().contains_similar(item, amount)
    }

    fn contains_exact(&self, item: &Item, amount: u64) -> Result<bool, StorageError> {
        self.actor.inventory().contains_exact(item, amount)
    }

    fn add_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        self.actor.inventory().add_items(items)
    }

    fn remove_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        self.actor.inventory().remove_items(items)
    }

    fn commit(&self) -> Result<(), StorageError> {
        self.actor.inventory().commit()?;
        self.actor.notify_updated();
        Ok(())
    }
}

/// In-memory `ActorApi` with a switchable connected state.
pub struct MemoryActor {
    id: Uuid,
    name: String,
    connected: AtomicBool,
    inventory: Arc<MemoryHolder>,
    updates: AtomicU64,
}

impl MemoryActor {
    pub fn new(name: impl Into<String>, inventory_capacity: usize) -> Arc<Self> {
        let name = name.into();
        Arc::new(Self {
            id: Uuid::new_v4(),
            inventory: MemoryHolder::new(format!("{name}'s inventory"), inventory_capacity),
            name,
            connected: AtomicBool::new(true),
            updates: AtomicU64::new(0),
        })
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn reconnect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    /// How many inventory-changed notifications the actor received.
    pub fn update_notifications(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }

    /// Direct access to the backing holder for assertions.
    pub fn raw_inventory(&self) -> &Arc<MemoryHolder> {
        &self.inventory
    }
}

impl ActorApi for MemoryActor {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_valid(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn inventory(&self) -> Handle {
        Arc::clone(&self.inventory) as Handle
    }

    fn notify_updated(&self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }
}
