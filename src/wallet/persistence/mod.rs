//! Wallet persistence
//!
//! - `repositories`: the host-facing [`DataStore`] trait with file and in-memory implementations.
//! - `state_persistence`: saves and restores whole-wallet snapshots through a `DataStore`.

/// Storage backends behind the host retrieve/store boundary
pub mod repositories;
/// Snapshot save/restore on top of a storage backend
pub mod state_persistence;

pub use repositories::{DataStore, FileDataStore, MemoryDataStore};
pub use state_persistence::{PersistenceConfig, StatePersistenceService};
