//! # In-Memory World Backend
//!
//! Self-contained implementations of the holder and world ports. The
//! holder reproduces the usual container semantics: per-slot stacks
//! with a per-kind ceiling, stacking-aware bulk add (top up similar
//! stacks first, then fill empty slots), and quantity-aware bulk
//! remove. Containers can be placed and broken at world coordinates;
//! a broken container makes every later validation fail.

use crate::domain::{Item, ItemKind};
use crate::error::StorageError;
use crate::ports::{Handle, HolderAccess, WorldAccess, WorldSource};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory implementation of `HolderAccess`.
pub struct MemoryHolder {
    name: String,
    slots: RwLock<Vec<Option<Item>>>,
    revision: AtomicU64,
}

impl MemoryHolder {
    pub fn new(name: impl Into<String>, capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            slots: RwLock::new(vec![None; capacity]),
            revision: AtomicU64::new(0),
        })
    }

    /// How many times the post-update commit hook has run.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Change the live capacity, truncating or padding with empties.
    /// Storages built earlier keep their construction-time slot count.
    pub fn resize(&self, capacity: usize) {
        self.slots.write().resize(capacity, None);
    }

    /// Direct contents snapshot for assertions, without going through
    /// a manager.
    pub fn contents_snapshot(&self) -> Vec<Option<Item>> {
        self.slots.read().clone()
    }
}

impl HolderAccess for MemoryHolder {
    fn name(&self) -> Result<String, StorageError> {
        Ok(self.name.clone())
    }

    fn size(&self) -> Result<usize, StorageError> {
        Ok(self.slots.read().len())
    }

    fn item_at(&self, index: usize) -> Result<Option<Item>, StorageError> {
        let slots = self.slots.read();
        match slots.get(index) {
            Some(slot) => Ok(slot.clone()),
            None => Err(StorageError::IndexOutOfBounds {
                index: index as isize,
                size: slots.len(),
            }),
        }
    }

    fn set_item_at(&self, index: usize, item: Option<Item>) -> Result<(), StorageError> {
        let mut slots = self.slots.write();
        let size = slots.len();
        match slots.get_mut(index) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(StorageError::IndexOutOfBounds {
                index: index as isize,
                size,
            }),
        }
    }

    fn contents(&self) -> Result<Vec<Option<Item>>, StorageError> {
        Ok(self.slots.read().clone())
    }

    fn set_contents(&self, items: &[Option<Item>]) -> Result<(), StorageError> {
        let mut slots = self.slots.write();
        if items.len() > slots.len() {
            return Err(StorageError::IndexOutOfBounds {
                index: items.len() as isize,
                size: slots.len(),
            });
        }
        for (position, slot) in slots.iter_mut().enumerate() {
            *slot = items.get(position).cloned().flatten();
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        for slot in self.slots.write().iter_mut() {
            *slot = None;
        }
        Ok(())
    }

    fn contains_kind(&self, kind: &ItemKind, amount: u64) -> Result<bool, StorageError> {
        let total: u64 = self
            .slots
            .read()
            .iter()
            .flatten()
            .filter(|item| item.kind == *kind)
            .map(|item| u64::from(item.quantity))
            .sum();
        Ok(total >= amount)
    }

    fn contains_similar(&self, wanted: &Item, amount: u64) -> Result<bool, StorageError> {
        let total: u64 = self
            .slots
            .read()
            .iter()
            .flatten()
            .filter(|item| item.is_similar(wanted))
            .map(|item| u64::from(item.quantity))
            .sum();
        Ok(total >= amount)
    }

    fn contains_exact(&self, wanted: &Item, amount: u64) -> Result<bool, StorageError> {
        let stacks = self
            .slots
            .read()
            .iter()
            .flatten()
            .filter(|item| *item == wanted)
            .count() as u64;
        Ok(stacks >= amount)
    }

    fn add_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        let mut slots = self.slots.write();
        let mut leftover = Vec::new();

        for item in items {
            let mut remaining = item.quantity;

            // First pass: top up similar stacks with spare room.
            for slot in slots.iter_mut() {
                if remaining == 0 {
                    break;
                }
                if let Some(existing) = slot {
                    let ceiling = existing.kind.max_stack();
                    if existing.is_similar(&item) && existing.quantity < ceiling {
                        let moved = (ceiling - existing.quantity).min(remaining);
                        existing.quantity += moved;
                        remaining -= moved;
                    }
                }
            }

            // Second pass: fill empty slots, splitting by the ceiling.
            for slot in slots.iter_mut() {
                if remaining == 0 {
                    break;
                }
                if slot.is_none() {
                    let moved = item.kind.max_stack().min(remaining);
                    *slot = Some(item.with_quantity(moved));
                    remaining -= moved;
                }
            }

            if remaining > 0 {
                leftover.push(item.with_quantity(remaining));
            }
        }
        Ok(leftover)
    }

    fn remove_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        let mut slots = self.slots.write();
        let mut leftover = Vec::new();

        for item in items {
            let mut remaining = item.quantity;
            for slot in slots.iter_mut() {
                if remaining == 0 {
                    break;
                }
                let emptied = match slot {
                    Some(existing) if existing.is_similar(&item) => {
                        let taken = existing.quantity.min(remaining);
                        existing.quantity -= taken;
                        remaining -= taken;
                        existing.quantity == 0
                    }
                    _ => false,
                };
                if emptied {
                    *slot = None;
                }
            }
            if remaining > 0 {
                leftover.push(item.with_quantity(remaining));
            }
        }
        Ok(leftover)
    }

    fn commit(&self) -> Result<(), StorageError> {
        self.revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One in-memory world holding containers by coordinate.
pub struct MemoryWorld {
    name: String,
    containers: DashMap<(i32, i32, i32), Arc<MemoryHolder>>,
}

impl MemoryWorld {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            containers: DashMap::new(),
        })
    }

    /// Place a container at a coordinate, replacing whatever was
    /// there.
    pub fn place_container(
        &self,
        position: (i32, i32, i32),
        name: impl Into<String>,
        capacity: usize,
    ) -> Arc<MemoryHolder> {
        let holder = MemoryHolder::new(name, capacity);
        self.containers.insert(position, Arc::clone(&holder));
        holder
    }

    /// Break the container at a coordinate. Existing storages over it
    /// fail `HolderInvalid` on their next access.
    pub fn break_container(&self, position: (i32, i32, i32)) {
        self.containers.remove(&position);
    }
}

impl WorldAccess for MemoryWorld {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn container_at(&self, x: i32, y: i32, z: i32) -> Result<Handle, StorageError> {
        self.containers
            .get(&(x, y, z))
            .map(|entry| Arc::clone(entry.value()) as Handle)
            .ok_or_else(|| {
                StorageError::invalid(format!(
                    "no container at ({x}, {y}, {z}) in world '{}'",
                    self.name
                ))
            })
    }
}

/// In-memory `WorldSource`: a set of named worlds.
pub struct MemoryUniverse {
    worlds: DashMap<String, Arc<MemoryWorld>>,
}

impl MemoryUniverse {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            worlds: DashMap::new(),
        })
    }

    pub fn add_world(&self, name: impl Into<String>) -> Arc<MemoryWorld> {
        let world = MemoryWorld::new(name.into());
        self.worlds.insert(world.name.clone(), Arc::clone(&world));
        world
    }

    /// Unload a world; locations in it stop resolving.
    pub fn remove_world(&self, name: &str) {
        self.worlds.remove(name);
    }
}

impl WorldSource for MemoryUniverse {
    fn world(&self, name: &str) -> Option<Arc<dyn WorldAccess>> {
        self.worlds
            .get(name)
            .map(|entry| Arc::clone(entry.value()) as Arc<dyn WorldAccess>)
    }
}
