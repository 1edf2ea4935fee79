//! State persistence service for the wallet.
//!
//! This module provides the `StatePersistenceService`, which saves and restores the complete
//! wallet state through a host-supplied [`DataStore`]. The state is written as a JSON snapshot
//! under one key, with a small JSON metadata record beside it.
//!
//! Restored snapshots are version-checked and structurally validated before the wallet adopts
//! them. Rewound depth counters, duplicate ids and outputs or keys pointing at missing secrets
//! all surface as [`WalletError::Storage`] rather than as a wallet that reuses depths.

use crate::wallet::WalletError;
use crate::wallet::persistence::repositories::DataStore;
use crate::wallet::state::{ROOT_VERSION, WalletState};

use std::path::PathBuf;
use tracing::{info, warn};

/// Service for saving and loading wallet state.
pub struct StatePersistenceService {
	store: Box<dyn DataStore + Send + Sync>,
	state_key: String,
}

impl StatePersistenceService {
	/// Create a persistence service writing under `state_key` in `store`.
	pub fn new(store: Box<dyn DataStore + Send + Sync>, state_key: impl Into<String>) -> Self {
		Self {
			store,
			state_key: state_key.into(),
		}
	}

	pub fn state_key(&self) -> &str {
		&self.state_key
	}

	fn metadata_key(&self) -> String {
		format!("{}.meta", self.state_key)
	}

	/// Save the wallet state and its metadata.
	///
	/// Fails only if the snapshot cannot be written. A failed metadata write is logged and
	/// ignored, since restore never reads it.
	pub fn save_state(&self, state: &WalletState) -> Result<(), WalletError> {
		let state_bytes = serde_json::to_vec(state)?;
		self.store.store(&self.state_key, &state_bytes)?;

		let metadata = serde_json::json!({
			"version": state.root().version(),
			"saved_at": chrono::Utc::now().to_rfc3339(),
			"secrets": state.ledger().secret_count(),
			"outputs": state.ledger().output_count(),
		});
		if let Err(e) = self
			.store
			.store(&self.metadata_key(), &serde_json::to_vec_pretty(&metadata)?)
		{
			warn!("Failed to write wallet metadata under {:?}: {}", self.metadata_key(), e);
		}

		info!(
			"Saved wallet state under {:?}: {} secrets, {} outputs",
			self.state_key,
			state.ledger().secret_count(),
			state.ledger().output_count()
		);
		Ok(())
	}

	/// Restore the wallet state, returning `None` if nothing has been saved yet.
	pub fn restore_state(&self) -> Result<Option<WalletState>, WalletError> {
		let Some(state_bytes) = self.store.retrieve(&self.state_key)? else {
			info!("No saved wallet state under {:?}", self.state_key);
			return Ok(None);
		};

		let state: WalletState = serde_json::from_slice(&state_bytes)?;

		let version = state.root().version();
		if version != ROOT_VERSION {
			warn!("Saved wallet state has unsupported version {}", version);
			return Err(WalletError::UnsupportedVersion(version));
		}
		if !state.is_consistent() {
			warn!("Saved wallet state under {:?} failed validation", self.state_key);
			return Err(WalletError::Storage(
				"Saved wallet state is inconsistent".to_string(),
			));
		}

		info!(
			"Restored wallet state from {:?}: {} secrets, {} outputs",
			self.state_key,
			state.ledger().secret_count(),
			state.ledger().output_count()
		);
		Ok(Some(state))
	}
}

/// Configuration for where wallet state is persisted.
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
	/// Directory for file-backed storage.
	pub data_dir: PathBuf,
	/// Store key the wallet snapshot is written under.
	pub state_key: String,
}

impl PersistenceConfig {
	/// Defaults overridden by `WEBCASH_DATA_DIR` and `WEBCASH_STATE_KEY` when set.
	pub fn from_env() -> Self {
		let mut config = Self::default();
		if let Ok(dir) = std::env::var("WEBCASH_DATA_DIR") {
			config.data_dir = PathBuf::from(dir);
		}
		if let Ok(key) = std::env::var("WEBCASH_STATE_KEY") {
			config.state_key = key;
		}
		config
	}
}

impl Default for PersistenceConfig {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from("webcash-data"),
			state_key: "webcash_wallet".to_string(),
		}
	}
}
