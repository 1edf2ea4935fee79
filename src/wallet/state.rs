use crate::wallet::chain::{ChainRegistry, ChainType, HdChain};
use crate::wallet::ledger::WalletLedger;
use crate::wallet::seed::Seed;
use crate::wallet::types::RecordKey;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root version written by this crate. Zero means uninitialized.
pub const ROOT_VERSION: u32 = 1;

/// HD root: the seed and the four chains hanging off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdRoot {
	pub(crate) key: RecordKey,
	pub(crate) seed: Seed,
	pub(crate) version: u32,
	pub(crate) chains: ChainRegistry,
}

impl HdRoot {
	pub fn new(seed: Seed, timestamp: i64) -> Self {
		Self {
			key: RecordKey::new(0, timestamp),
			seed,
			version: ROOT_VERSION,
			chains: ChainRegistry::new(timestamp),
		}
	}

	pub fn key(&self) -> RecordKey {
		self.key
	}

	pub fn seed(&self) -> &Seed {
		&self.seed
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn chain(&self, chain_type: ChainType) -> &HdChain {
		self.chains.get(chain_type)
	}

	pub fn chains(&self) -> impl Iterator<Item = &HdChain> {
		self.chains.iter()
	}
}

/// Everything an initialized wallet owns. This is also the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
	pub(crate) root: HdRoot,
	pub(crate) ledger: WalletLedger,
	pub(crate) derived_key_count: u64,
}

impl WalletState {
	pub fn new(seed: Seed, timestamp: i64) -> Self {
		Self {
			root: HdRoot::new(seed, timestamp),
			ledger: WalletLedger::new(),
			derived_key_count: 0,
		}
	}

	pub fn root(&self) -> &HdRoot {
		&self.root
	}

	pub fn ledger(&self) -> &WalletLedger {
		&self.ledger
	}

	pub fn derived_key_count(&self) -> u64 {
		self.derived_key_count
	}

	/// Structural checks applied to restored snapshots.
	///
	/// Derived key ids must be unique and below `derived_key_count`, and every key must point
	/// at a stored secret.
	pub(crate) fn is_consistent(&self) -> bool {
		let mut key_ids = HashSet::new();
		self.root.chains.is_consistent()
			&& self.ledger.is_consistent()
			&& self
				.root
				.chains()
				.flat_map(|c| c.keys.iter())
				.all(|k| {
					k.key.id < self.derived_key_count
						&& key_ids.insert(k.key.id)
						&& self.ledger.secret(k.secret).is_ok()
				})
	}
}
