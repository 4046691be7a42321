//! # Stockpile Test Suite
//!
//! Unified test crate for cross-component scenarios that span
//! registry, storages and groups:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── cascade.rs      # group distribution across live storages
//!     ├── lifecycle.rs    # holder invalidation, registry teardown
//!     ├── concurrency.rs  # lost updates and the per-handle lock
//!     └── persistence.rs  # location record round trips
//! ```
//!
//! Run with `cargo test -p stockpile-tests`.

pub mod integration;
