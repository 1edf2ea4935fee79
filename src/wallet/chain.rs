//! The four canonical HD chains.
//!
//! Every secret a wallet derives belongs to exactly one chain, selected by the `(mine, sweep)`
//! pair. `mine` says whether the value is wallet-internal and `sweep` whether it is always
//! redeemed immediately. Each chain keeps its own depth counter, so reserving on one chain never
//! advances another.

use crate::wallet::types::{HdKey, RecordKey};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Number of chains a wallet root holds.
pub const CHAIN_COUNT: usize = 4;

/// Chain identity. The discriminant is the value packed into the low 2 bits of the chaincode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
	/// Externally visible incoming funds. Always redeemed into change on import, since the
	/// sender may still know the secret.
	Receive = 0,
	/// Secrets handed out as payments. Kept so the payer can recover if delivery fails.
	Payment = 1,
	/// Internal value counted in the balance but not shown explicitly.
	Change = 2,
	/// Mining income. Always redeemed into change right away, since mining reports may be
	/// published.
	Mining = 3,
}

impl ChainType {
	pub const ALL: [ChainType; CHAIN_COUNT] = [
		ChainType::Receive,
		ChainType::Payment,
		ChainType::Change,
		ChainType::Mining,
	];

	/// Select the chain for a `(mine, sweep)` pair.
	pub fn from_flags(mine: bool, sweep: bool) -> Self {
		match (mine, sweep) {
			(false, true) => ChainType::Receive,
			(false, false) => ChainType::Payment,
			(true, false) => ChainType::Change,
			(true, true) => ChainType::Mining,
		}
	}

	pub fn mine(self) -> bool {
		matches!(self, ChainType::Change | ChainType::Mining)
	}

	pub fn sweep(self) -> bool {
		matches!(self, ChainType::Receive | ChainType::Mining)
	}

	pub fn index(self) -> usize {
		self as usize
	}

	/// 64-bit chaincode. The upper 62 bits are reserved and currently zero.
	pub fn chaincode(self) -> u64 {
		self as u64 & 0b11
	}

	/// Chaincode as fed to the derivation hash: 8 bytes, big-endian.
	pub fn chaincode_bytes(self) -> [u8; 8] {
		self.chaincode().to_be_bytes()
	}

	pub fn name(self) -> &'static str {
		match self {
			ChainType::Receive => "receive",
			ChainType::Payment => "payment",
			ChainType::Change => "change",
			ChainType::Mining => "mining",
		}
	}
}

impl fmt::Display for ChainType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One HD chain and the keys derived on it so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdChain {
	pub(crate) key: RecordKey,
	pub(crate) chain_type: ChainType,
	pub(crate) mine: bool,
	pub(crate) sweep: bool,
	pub(crate) min_depth: u64,
	/// Next depth to allocate. Only ever increases.
	pub(crate) max_depth: u64,
	/// Oldest first; [`HdChain::keys`] iterates newest first.
	pub(crate) keys: Vec<HdKey>,
}

impl HdChain {
	pub fn new(chain_type: ChainType, timestamp: i64) -> Self {
		Self {
			key: RecordKey::new(0, timestamp),
			chain_type,
			mine: chain_type.mine(),
			sweep: chain_type.sweep(),
			min_depth: 0,
			max_depth: 0,
			keys: Vec::new(),
		}
	}

	pub fn key(&self) -> RecordKey {
		self.key
	}

	pub fn chain_type(&self) -> ChainType {
		self.chain_type
	}

	pub fn mine(&self) -> bool {
		self.mine
	}

	pub fn sweep(&self) -> bool {
		self.sweep
	}

	pub fn min_depth(&self) -> u64 {
		self.min_depth
	}

	pub fn max_depth(&self) -> u64 {
		self.max_depth
	}

	/// Derived keys, most recently derived first.
	pub fn keys(&self) -> impl Iterator<Item = &HdKey> {
		self.keys.iter().rev()
	}

	/// Hand out the next depth and advance the counter.
	pub(crate) fn next_depth(&mut self) -> u64 {
		let depth = self.max_depth;
		self.max_depth += 1;
		depth
	}
}

/// The four chains of a wallet root, indexed by [`ChainType::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRegistry {
	chains: [HdChain; CHAIN_COUNT],
}

impl ChainRegistry {
	pub fn new(timestamp: i64) -> Self {
		Self {
			chains: ChainType::ALL.map(|chain_type| HdChain::new(chain_type, timestamp)),
		}
	}

	pub fn get(&self, chain_type: ChainType) -> &HdChain {
		&self.chains[chain_type.index()]
	}

	pub fn get_mut(&mut self, chain_type: ChainType) -> &mut HdChain {
		&mut self.chains[chain_type.index()]
	}

	/// Route a `(mine, sweep)` pair to its chain.
	pub fn select_mut(&mut self, mine: bool, sweep: bool) -> &mut HdChain {
		self.get_mut(ChainType::from_flags(mine, sweep))
	}

	pub fn iter(&self) -> impl Iterator<Item = &HdChain> {
		self.chains.iter()
	}

	/// Check that every slot holds the chain its index claims, with matching flags, and that
	/// every derived depth lies below the chain's next depth and appears only once.
	pub(crate) fn is_consistent(&self) -> bool {
		self.chains.iter().zip(ChainType::ALL).all(|(chain, expected)| {
			let mut depths = HashSet::with_capacity(chain.keys.len());
			chain.chain_type == expected
				&& chain.mine == expected.mine()
				&& chain.sweep == expected.sweep()
				&& chain.min_depth <= chain.max_depth
				&& chain.keys.iter().all(|k| {
					k.depth >= chain.min_depth && k.depth < chain.max_depth && depths.insert(k.depth)
				})
		})
	}
}
