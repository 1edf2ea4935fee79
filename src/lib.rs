//! Core of a webcash wallet: deterministic secret derivation over four HD chains, an in-memory
//! ledger of secrets and outputs, and balance accounting.

pub mod utils;
pub mod wallet;

pub use wallet::{
	Amount, ChainType, DataStore, FileDataStore, MemoryDataStore, OutputId, PersistenceConfig,
	Secret, SecretId, WalletError, WebcashWallet,
};
