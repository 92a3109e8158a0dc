//! Persistent store subsystem.
//!
//! # Data Flow
//! ```text
//! WorkspacePath
//!     → opener.rs (StoreOpener::open, awaited by the bootstrap)
//!     → db.rs (sled database + fixed partition set)
//!     → Store handle, moved into the API router
//! ```
//!
//! # Design Decisions
//! - No global handle: the only way to reach data is the `Store` value the
//!   opener returns, so nothing can read it before the open resolves
//! - Partitions are opened eagerly with the database, never lazily
//! - Values are JSON documents; the layout inside them is not the store's concern

pub mod db;
pub mod opener;

pub use db::{Partition, Store, StoreError, StoreInitError, PARTITIONS, STORE_DIR};
pub use opener::{SledOpener, StoreOpener};
