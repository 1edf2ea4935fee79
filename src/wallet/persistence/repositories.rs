use crate::wallet::WalletError;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Host-provided key/value storage for wallet state.
///
/// Keys are opaque strings chosen by the wallet. Values are opaque bytes.
pub trait DataStore {
	/// Look up `key`, returning `None` if nothing was stored under it.
	fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, WalletError>;
	/// Write `data` under `key`, replacing any previous value.
	fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError>;
}

/// File-based implementation of DataStore: one file per key under a directory.
pub struct FileDataStore {
	data_dir: PathBuf,
}

impl FileDataStore {
	pub fn new(data_dir: PathBuf) -> Self {
		Self { data_dir }
	}

	pub fn data_dir(&self) -> &Path {
		&self.data_dir
	}

	fn get_filename(&self, key: &str) -> Result<PathBuf, WalletError> {
		let valid = !key.is_empty()
			&& !key.starts_with('.')
			&& key
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
		if !valid {
			return Err(WalletError::Storage(format!("Invalid storage key: {:?}", key)));
		}
		Ok(self.data_dir.join(format!("{}.dat", key)))
	}
}

impl DataStore for FileDataStore {
	fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, WalletError> {
		let filename = self.get_filename(key)?;

		if !filename.exists() {
			debug!("No stored data at {:?}", filename);
			return Ok(None);
		}

		let data = std::fs::read(&filename).map_err(|e| {
			WalletError::Storage(format!("Failed to read {:?}: {}", filename, e))
		})?;

		debug!("Read {} bytes from {:?}", data.len(), filename);
		Ok(Some(data))
	}

	fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError> {
		let filename = self.get_filename(key)?;
		std::fs::create_dir_all(&self.data_dir)?;

		// Write beside the target and rename, so a crash never leaves a truncated file.
		let tmp_filename = filename.with_extension("dat.tmp");
		std::fs::write(&tmp_filename, data).map_err(|e| {
			WalletError::Storage(format!("Failed to write {:?}: {}", tmp_filename, e))
		})?;
		std::fs::rename(&tmp_filename, &filename).map_err(|e| {
			WalletError::Storage(format!("Failed to replace {:?}: {}", filename, e))
		})?;

		info!("Stored {} bytes to {:?}", data.len(), filename);
		Ok(())
	}
}

/// In-memory implementation of DataStore.
///
/// Clones share the same map, so a host can hand one clone to a wallet and keep another.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataStore {
	entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryDataStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl DataStore for MemoryDataStore {
	fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, WalletError> {
		let entries = self
			.entries
			.lock()
			.map_err(|e| WalletError::Storage(format!("Store lock poisoned: {}", e)))?;
		Ok(entries.get(key).cloned())
	}

	fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError> {
		let mut entries = self
			.entries
			.lock()
			.map_err(|e| WalletError::Storage(format!("Store lock poisoned: {}", e)))?;
		entries.insert(key.to_string(), data.to_vec());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_store_clones_share_entries() {
		let store = MemoryDataStore::new();
		let other = store.clone();
		assert!(store.is_empty());
		store.store("wallet", b"state").unwrap();
		assert_eq!(other.retrieve("wallet").unwrap(), Some(b"state".to_vec()));
		assert_eq!(other.retrieve("missing").unwrap(), None);
		assert_eq!(other.len(), 1);
	}

	#[test]
	fn len_survives_a_poisoned_lock() {
		let store = MemoryDataStore::new();
		store.store("wallet", b"state").unwrap();

		let shared = store.clone();
		let result = std::thread::spawn(move || {
			let _guard = shared.entries.lock().unwrap();
			panic!("writer died holding the lock");
		})
		.join();
		assert!(result.is_err());
		assert!(store.entries.is_poisoned());

		assert_eq!(store.len(), 1);
		assert!(!store.is_empty());
		assert!(matches!(
			store.retrieve("wallet"),
			Err(WalletError::Storage(_))
		));
	}

	#[test]
	fn file_store_round_trips_and_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileDataStore::new(dir.path().join("nested"));
		assert_eq!(store.retrieve("wallet").unwrap(), None);

		store.store("wallet", b"first").unwrap();
		store.store("wallet", b"second").unwrap();
		assert_eq!(store.retrieve("wallet").unwrap(), Some(b"second".to_vec()));
		assert!(!store.data_dir().join("wallet.dat.tmp").exists());
	}

	#[test]
	fn file_store_rejects_path_like_keys() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileDataStore::new(dir.path().to_path_buf());
		for key in ["", "../escape", "a/b", ".hidden"] {
			assert!(matches!(
				store.store(key, b"x"),
				Err(WalletError::Storage(_))
			));
		}
	}
}
