use serde::{Deserialize, Serialize};
use std::fmt;

/// Indivisible webcash units. One webcash is 10^8 units.
pub type Amount = u64;

/// Synthetic identity shared by every persisted wallet record.
///
/// `id` is handed out by the counter that owns the collection and is unique within it.
/// `timestamp` is whatever creation time the caller supplied, in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKey {
	pub id: u64,
	pub timestamp: i64,
}

impl RecordKey {
	pub fn new(id: u64, timestamp: i64) -> Self {
		Self { id, timestamp }
	}
}

/// Handle to a [`Secret`] owned by a wallet ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SecretId(pub u64);

/// Handle to an [`Output`] owned by a wallet ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutputId(pub u64);

impl fmt::Display for SecretId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "secret#{}", self.0)
	}
}

impl fmt::Display for OutputId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "output#{}", self.0)
	}
}

/// A 256-bit secret value, either derived from an HD chain or imported.
///
/// Immutable once created. The `mine`/`sweep` flags record the chain it belongs to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
	pub(crate) key: RecordKey,
	pub(crate) value: String,
	pub(crate) mine: bool,
	pub(crate) sweep: bool,
}

impl Secret {
	pub fn id(&self) -> SecretId {
		SecretId(self.key.id)
	}

	pub fn key(&self) -> RecordKey {
		self.key
	}

	/// The secret as 64 lowercase hex characters.
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn mine(&self) -> bool {
		self.mine
	}

	pub fn sweep(&self) -> bool {
		self.sweep
	}
}

// Secret values must not end up in logs.
impl fmt::Debug for Secret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Secret")
			.field("key", &self.key)
			.field("value", &"<redacted>")
			.field("mine", &self.mine)
			.field("sweep", &self.sweep)
			.finish()
	}
}

/// One derivation on an HD chain: the depth that was consumed and the secret it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdKey {
	pub(crate) key: RecordKey,
	pub(crate) depth: u64,
	pub(crate) secret: SecretId,
}

impl HdKey {
	pub fn key(&self) -> RecordKey {
		self.key
	}

	pub fn depth(&self) -> u64 {
		self.depth
	}

	pub fn secret(&self) -> SecretId {
		self.secret
	}
}

/// A unit of value the wallet controls.
///
/// Outputs are never deleted; spending only flips `spent` to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
	pub(crate) key: RecordKey,
	#[serde(with = "hex::serde")]
	pub(crate) hash: [u8; 32],
	pub(crate) secret: SecretId,
	pub(crate) amount: Amount,
	pub(crate) spent: bool,
}

impl Output {
	pub fn id(&self) -> OutputId {
		OutputId(self.key.id)
	}

	pub fn key(&self) -> RecordKey {
		self.key
	}

	/// Public hash of the redeeming secret.
	pub fn hash(&self) -> &[u8; 32] {
		&self.hash
	}

	pub fn secret(&self) -> SecretId {
		self.secret
	}

	pub fn amount(&self) -> Amount {
		self.amount
	}

	pub fn is_spent(&self) -> bool {
		self.spent
	}
}

/// Errors surfaced by every wallet operation
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
	#[error("Wallet already initialized")]
	AlreadyInitialized,

	#[error("Wallet not initialized")]
	NotInitialized,

	#[error("Random source unavailable: {0}")]
	RandomSourceUnavailable(String),

	#[error("Random source exhausted: produced {produced} of 32 bytes")]
	RandomSourceExhausted { produced: usize },

	#[error("Out of memory")]
	OutOfMemory,

	#[error("Unknown secret: {0}")]
	UnknownSecret(SecretId),

	#[error("Unknown output: {0}")]
	UnknownOutput(OutputId),

	#[error("Invalid secret: {0}")]
	InvalidSecret(String),

	#[error("Unsupported wallet version: {0}")]
	UnsupportedVersion(u32),

	#[error("Storage error: {0}")]
	Storage(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl From<std::collections::TryReserveError> for WalletError {
	fn from(_: std::collections::TryReserveError) -> Self {
		WalletError::OutOfMemory
	}
}
