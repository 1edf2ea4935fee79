//! Webcash wallet core
//!
//! - `seed`: root seed creation from caller entropy and a strong random source.
//! - `chain`: the four HD chains (receive, payment, change, mining) and their depth counters.
//! - `derivation`: tagged-hash derivation of secrets from chaincode and depth.
//! - `ledger`: owned collections of secrets and outputs.
//! - `balance`: unspent-value accounting.
//! - `persistence`: the host storage boundary and snapshot save/restore.
//! - `payment`: the host-supplied payment generation boundary.
//! - `service`: the [`WebcashWallet`] handle exposing every operation.

pub mod balance;
pub mod chain;
pub mod derivation;
pub mod ledger;
pub mod payment;
pub mod persistence;
pub mod seed;
pub mod service;
pub mod state;
pub mod types;

pub use chain::{ChainType, HdChain};
pub use derivation::derive_secret;
pub use payment::{PaymentGenerator, PaymentKey};
pub use persistence::{
	DataStore, FileDataStore, MemoryDataStore, PersistenceConfig, StatePersistenceService,
};
pub use seed::{OsRandom, RandomSource, Seed};
pub use service::WebcashWallet;
pub use types::*;
