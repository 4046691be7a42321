//! # Storage Group
//!
//! Composes an ordered list of member storages into one logical
//! storage. Every call is a stateless fan-out over the current member
//! list; member order is both the add-cascade and remove-cascade
//! order and is never reordered implicitly.
//!
//! ## Cascade distribution
//!
//! `add_items` walks the members in order carrying a remainder that
//! starts as the full input. Each member consumes what it can and
//! hands the leftover to the next. A member's hard backend failure
//! counts as zero progress and the cascade continues, except on the
//! last member, where the failure propagates. The cascade never
//! silently drops items: whatever survives the last member comes back
//! as the final remainder.
//!
//! `remove_items` is the symmetric cascade over not-yet-removed items.
//!
//! No cross-member atomicity: a cascade that fails partway leaves
//! earlier members already mutated.

use crate::domain::{Item, ItemKind};
use crate::error::StorageError;
use crate::ports::{ItemQueryable, ItemReceiver, ItemSource, Storage};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Many storages addressed as one.
pub struct StorageGroup {
    name: String,
    members: RwLock<Vec<Arc<dyn Storage>>>,
}

impl StorageGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: RwLock::new(Vec::new()),
        }
    }

    /// Create a group from an initial member list, in cascade order.
    pub fn with_members(
        name: impl Into<String>,
        members: impl IntoIterator<Item = Arc<dyn Storage>>,
    ) -> Self {
        Self {
            name: name.into(),
            members: RwLock::new(members.into_iter().collect()),
        }
    }

    /// Append a member at the end of the cascade order.
    ///
    /// No uniqueness constraint: a duplicate reference is visited
    /// twice during cascades.
    pub fn add_storage(&self, storage: Arc<dyn Storage>) {
        self.members.write().push(storage);
    }

    /// Remove the first occurrence of this member (by reference
    /// identity). Returns whether anything was removed.
    pub fn remove_storage(&self, storage: &Arc<dyn Storage>) -> bool {
        let mut members = self.members.write();
        match members.iter().position(|m| Arc::ptr_eq(m, storage)) {
            Some(position) => {
                members.remove(position);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the current member list in cascade order.
    pub fn members(&self) -> Vec<Arc<dyn Storage>> {
        self.members.read().clone()
    }

    /// Walk the members in order, letting each consume from the
    /// remainder. `describe` labels the operation in logs.
    fn cascade(
        &self,
        items: Vec<Item>,
        describe: &str,
        apply: impl Fn(&Arc<dyn Storage>, Vec<Item>) -> Result<Vec<Item>, StorageError>,
    ) -> Result<Vec<Item>, StorageError> {
        let members = self.members();
        let last = members.len().checked_sub(1);
        let mut remainder = items;

        for (position, member) in members.iter().enumerate() {
            if remainder.is_empty() {
                break;
            }
            match apply(member, remainder.clone()) {
                Ok(leftover) => {
                    debug!(
                        group = %self.name,
                        member = position,
                        leftover = leftover.len(),
                        "{} cascade step", describe
                    );
                    remainder = leftover;
                }
                // Hard failure: zero progress, remainder unchanged.
                // Only the last member's failure reaches the caller.
                Err(err) if Some(position) != last => {
                    warn!(
                        group = %self.name,
                        member = position,
                        error = %err,
                        "member failed mid-cascade, carrying remainder on"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(remainder)
    }
}

impl ItemQueryable for StorageGroup {
    fn contains_at_least(&self, kind: &ItemKind, amount: u64) -> Result<bool, StorageError> {
        self.any_member(|member| member.contains_at_least(kind, amount))
    }

    fn contains_similar(&self, item: &Item, amount: u64) -> Result<bool, StorageError> {
        self.any_member(|member| member.contains_similar(item, amount))
    }

    fn contains_exact(&self, item: &Item, amount: u64) -> Result<bool, StorageError> {
        self.any_member(|member| member.contains_exact(item, amount))
    }
}

impl StorageGroup {
    /// Short-circuiting OR over the members in order. A member that
    /// cannot answer is logged and skipped; the group reports the best
    /// available affirmative answer rather than failing.
    fn any_member(
        &self,
        predicate: impl Fn(&Arc<dyn Storage>) -> Result<bool, StorageError>,
    ) -> Result<bool, StorageError> {
        for (position, member) in self.members().iter().enumerate() {
            match predicate(member) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        group = %self.name,
                        member = position,
                        error = %err,
                        "member could not answer predicate, skipping"
                    );
                }
            }
        }
        Ok(false)
    }
}

impl ItemReceiver for StorageGroup {
    fn add_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        self.cascade(items, "add", |member, batch| member.add_items(batch))
    }
}

impl ItemSource for StorageGroup {
    fn remove_items(&self, items: Vec<Item>) -> Result<Vec<Item>, StorageError> {
        self.cascade(items, "remove", |member, batch| member.remove_items(batch))
    }

    /// Not a cascade: every member is visited unconditionally and the
    /// per-member results are ORed. A match cleared anywhere counts.
    fn remove_kind(&self, kind: &ItemKind) -> Result<bool, StorageError> {
        let mut removed = false;
        for (position, member) in self.members().iter().enumerate() {
            match member.remove_kind(kind) {
                Ok(r) => removed |= r,
                Err(err) => {
                    warn!(
                        group = %self.name,
                        member = position,
                        error = %err,
                        "member failed remove_kind, skipping"
                    );
                }
            }
        }
        Ok(removed)
    }

    fn remove_exact(&self, item: &Item) -> Result<bool, StorageError> {
        let mut removed = false;
        for (position, member) in self.members().iter().enumerate() {
            match member.remove_exact(item) {
                Ok(r) => removed |= r,
                Err(err) => {
                    warn!(
                        group = %self.name,
                        member = position,
                        error = %err,
                        "member failed remove_exact, skipping"
                    );
                }
            }
        }
        Ok(removed)
    }
}

impl Storage for StorageGroup {
    fn name(&self) -> Result<String, StorageError> {
        Ok(self.name.clone())
    }

    /// Sum of member sizes, recomputed on demand.
    fn size(&self) -> Result<usize, StorageError> {
        let mut total = 0;
        for member in self.members() {
            total += member.size()?;
        }
        Ok(total)
    }

    /// Best-effort: every member is attempted; the first error is
    /// reported only after all members were tried.
    fn clear(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for member in self.members() {
            if let Err(err) = member.clear() {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
