//! Ports layer: trait seams between the storage services and their
//! collaborators.
//!
//! - `inbound`: the driving API callers program against (capability
//!   traits and the composed [`Storage`] trait)
//! - `outbound`: the driven contracts an embedding host implements
//!   (holder access, handle resolution, world and actor collaborators)

pub mod inbound;
pub mod outbound;

pub use inbound::{ItemQueryable, ItemReceiver, ItemSource, Storage};
pub use outbound::{ActorApi, Handle, HandleSource, HolderAccess, WorldAccess, WorldSource};
