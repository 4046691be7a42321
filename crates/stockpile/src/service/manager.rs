//! # Holder Manager
//!
//! Mediates every read and write through a revalidation step, because
//! the backing holder can become invalid between calls: the container
//! is broken, the world unloads, the actor disconnects.
//!
//! ## Contract
//!
//! - `validate` resolves the holder fresh; there is no cached
//!   last-known-good state across calls.
//! - `query` validates, then applies a read-only closure.
//! - `update` validates, applies a mutating closure, then runs the
//!   holder's post-update commit hook before returning.
//!
//! A single `query` or `update` is indivisible from this layer's point
//! of view, but a query followed by a separate update is **not** atomic
//! as a pair. Callers needing read-modify-write atomicity against
//! concurrent callers must hold the per-handle lock from
//! [`HandleRegistry::handle_lock`](crate::service::HandleRegistry::handle_lock)
//! around the whole sequence.

use crate::error::StorageError;
use crate::ports::{Handle, HandleSource, HolderAccess};
use std::fmt;

/// Validated access to one external holder.
pub struct HolderManager {
    source: Box<dyn HandleSource>,
}

impl HolderManager {
    /// Create a manager over a handle source.
    ///
    /// Construction never touches the holder; the first `validate`
    /// does. Resolution may block on slow external steps (region
    /// loading), so callers should treat manager calls as potentially
    /// latent.
    pub fn new(source: Box<dyn HandleSource>) -> Self {
        Self { source }
    }

    /// Resolve and re-check the holder.
    pub fn validate(&self) -> Result<Handle, StorageError> {
        self.source.resolve()
    }

    /// Validate the holder, then apply a read-only operation to it.
    pub fn query<R>(
        &self,
        f: impl FnOnce(&dyn HolderAccess) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        let handle = self.validate()?;
        f(handle.as_ref())
    }

    /// Validate the holder, apply a mutating operation, then run the
    /// post-update commit hook.
    pub fn update<R>(
        &self,
        f: impl FnOnce(&dyn HolderAccess) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        let handle = self.validate()?;
        let out = f(handle.as_ref())?;
        handle.commit()?;
        Ok(out)
    }
}

impl fmt::Debug for HolderManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HolderManager").finish_non_exhaustive()
    }
}
