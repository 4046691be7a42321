//! # Item Values
//!
//! Opaque, comparable item values: a kind, a stack quantity and
//! free-form metadata.
//!
//! Two equality notions exist:
//!
//! - **Exact**: kind + quantity + metadata (`==`, used by
//!   `find_exact` / `contains_exact`)
//! - **Similar**: kind + metadata, quantity ignored
//!   ([`Item::is_similar`], used for stackable presence checks)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stack ceiling applied when a kind does not declare its own.
pub const DEFAULT_MAX_STACK: u32 = 64;

/// A named item type with a per-kind stack ceiling.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKind {
    name: String,
    max_stack: u32,
}

impl ItemKind {
    /// Create a kind with the default stack ceiling.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_stack: DEFAULT_MAX_STACK,
        }
    }

    /// Create a kind with a custom stack ceiling (clamped to >= 1).
    pub fn with_max_stack(name: impl Into<String>, max_stack: u32) -> Self {
        Self {
            name: name.into(),
            max_stack: max_stack.max(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Largest quantity a single slot may hold of this kind.
    pub fn max_stack(&self) -> u32 {
        self.max_stack
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A stack of items of one kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub quantity: u32,
    pub metadata: BTreeMap<String, String>,
}

impl Item {
    /// Create a stack with empty metadata.
    pub fn new(kind: ItemKind, quantity: u32) -> Self {
        Self {
            kind,
            quantity,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Copy of this stack with a different quantity.
    ///
    /// Used when splitting a stack across slots or carrying a
    /// partially-processed remainder between cascade members.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            kind: self.kind.clone(),
            quantity,
            metadata: self.metadata.clone(),
        }
    }

    /// Equality ignoring quantity: same kind, same metadata.
    pub fn is_similar(&self, other: &Item) -> bool {
        self.kind == other.kind && self.metadata == other.metadata
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.quantity, self.kind)
    }
}
