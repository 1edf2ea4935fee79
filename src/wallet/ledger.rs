//! In-memory wallet ledger.
//!
//! The ledger owns every [`Secret`] and [`Output`] record of a wallet. Records are kept in
//! insertion order and exposed newest first. Other records refer to them by id, never by
//! reference, and every id is checked against the owning collection on use.

use crate::wallet::WalletError;
use crate::wallet::balance::unspent_balance;
use crate::wallet::derivation::public_hash;
use crate::wallet::types::{Amount, Output, OutputId, RecordKey, Secret, SecretId};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletLedger {
	secrets: Vec<Secret>,
	outputs: Vec<Output>,
	next_secret_id: u64,
	next_output_id: u64,
}

impl WalletLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a secret and return its id. Fails only if the collection cannot grow.
	pub fn insert_secret(
		&mut self,
		timestamp: i64,
		value: String,
		mine: bool,
		sweep: bool,
	) -> Result<SecretId, WalletError> {
		self.secrets.try_reserve(1)?;
		let id = self.next_secret_id;
		self.next_secret_id += 1;
		self.secrets.push(Secret {
			key: RecordKey::new(id, timestamp),
			value,
			mine,
			sweep,
		});
		Ok(SecretId(id))
	}

	/// Record a new unspent output redeemed by `secret`.
	pub fn insert_output(
		&mut self,
		timestamp: i64,
		secret: SecretId,
		amount: Amount,
	) -> Result<OutputId, WalletError> {
		let hash = public_hash(self.secret(secret)?.value());
		self.outputs.try_reserve(1)?;
		let id = self.next_output_id;
		self.next_output_id += 1;
		self.outputs.push(Output {
			key: RecordKey::new(id, timestamp),
			hash,
			secret,
			amount,
			spent: false,
		});
		debug!("Recorded {} of {} units for {}", OutputId(id), amount, secret);
		Ok(OutputId(id))
	}

	/// Mark an output spent. Returns whether it was unspent before the call.
	pub fn spend_output(&mut self, id: OutputId) -> Result<bool, WalletError> {
		let output = self
			.outputs
			.iter_mut()
			.find(|o| o.key.id == id.0)
			.ok_or(WalletError::UnknownOutput(id))?;
		let was_unspent = !output.spent;
		output.spent = true;
		Ok(was_unspent)
	}

	pub fn secret(&self, id: SecretId) -> Result<&Secret, WalletError> {
		self.secrets
			.iter()
			.find(|s| s.key.id == id.0)
			.ok_or(WalletError::UnknownSecret(id))
	}

	pub fn output(&self, id: OutputId) -> Result<&Output, WalletError> {
		self.outputs
			.iter()
			.find(|o| o.key.id == id.0)
			.ok_or(WalletError::UnknownOutput(id))
	}

	pub fn find_secret_by_value(&self, value: &str) -> Option<&Secret> {
		self.secrets.iter().find(|s| s.value == value)
	}

	/// All secrets, most recently inserted first.
	pub fn secrets(&self) -> impl Iterator<Item = &Secret> {
		self.secrets.iter().rev()
	}

	/// All outputs, most recently inserted first.
	pub fn outputs(&self) -> impl Iterator<Item = &Output> {
		self.outputs.iter().rev()
	}

	pub fn secret_count(&self) -> usize {
		self.secrets.len()
	}

	pub fn output_count(&self) -> usize {
		self.outputs.len()
	}

	pub fn balance(&self) -> Amount {
		unspent_balance(&self.outputs)
	}

	/// Ids must be unique and below their counters, and every output must point at a stored
	/// secret. Restored state failing this could reuse ids or count unredeemable value.
	pub(crate) fn is_consistent(&self) -> bool {
		let mut secret_ids = HashSet::with_capacity(self.secrets.len());
		let mut output_ids = HashSet::with_capacity(self.outputs.len());
		self.secrets
			.iter()
			.all(|s| s.key.id < self.next_secret_id && secret_ids.insert(s.key.id))
			&& self.outputs.iter().all(|o| {
				o.key.id < self.next_output_id
					&& output_ids.insert(o.key.id)
					&& secret_ids.contains(&o.secret.0)
			})
	}
}
