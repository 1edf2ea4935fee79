use crate::utils::{decode_hex32, encode_hex32, format_amount};
use crate::wallet::WalletError;
use crate::wallet::chain::{ChainType, HdChain};
use crate::wallet::derivation::derive_secret;
use crate::wallet::payment::{PaymentGenerator, PaymentKey};
use crate::wallet::persistence::{DataStore, StatePersistenceService};
use crate::wallet::seed::{OsRandom, RandomSource, Seed};
use crate::wallet::state::WalletState;
use crate::wallet::types::{Amount, HdKey, Output, OutputId, RecordKey, Secret, SecretId};

use tracing::{debug, info, warn};

/// Default store key for the wallet snapshot.
pub const DEFAULT_STATE_KEY: &str = "webcash_wallet";

/// A webcash wallet handle.
///
/// A handle starts out uninitialized. [`WebcashWallet::init`] loads state saved by a previous
/// session; [`WebcashWallet::create`] makes a fresh wallet. Every other operation fails with
/// [`WalletError::NotInitialized`] until one of them has succeeded.
pub struct WebcashWallet {
	persistence: StatePersistenceService,
	random: Box<dyn RandomSource>,
	state: Option<WalletState>,
}

impl WebcashWallet {
	/// Create an uninitialized wallet backed by `store`, using the OS random source.
	pub fn new(store: Box<dyn DataStore + Send + Sync>) -> Self {
		Self::with_state_key(store, DEFAULT_STATE_KEY)
	}

	pub fn with_state_key(
		store: Box<dyn DataStore + Send + Sync>,
		state_key: impl Into<String>,
	) -> Self {
		Self {
			persistence: StatePersistenceService::new(store, state_key),
			random: Box::new(OsRandom),
			state: None,
		}
	}

	/// Replace the random source used by [`WebcashWallet::create`].
	pub fn with_random_source(mut self, random: Box<dyn RandomSource>) -> Self {
		self.random = random;
		self
	}

	pub fn is_initialized(&self) -> bool {
		self.state.is_some()
	}

	fn state(&self) -> Result<&WalletState, WalletError> {
		self.state.as_ref().ok_or(WalletError::NotInitialized)
	}

	fn state_mut(&mut self) -> Result<&mut WalletState, WalletError> {
		self.state.as_mut().ok_or(WalletError::NotInitialized)
	}

	/// Load state from a previous session.
	///
	/// Returns whether saved state was found. When it returns `false` the handle is still
	/// uninitialized and the host should call [`WebcashWallet::create`].
	pub fn init(&mut self) -> Result<bool, WalletError> {
		if self.is_initialized() {
			warn!("init() called on an initialized wallet");
			return Err(WalletError::AlreadyInitialized);
		}

		match self.persistence.restore_state()? {
			Some(state) => {
				info!(
					"Loaded wallet with {} secrets and {} outputs",
					state.ledger.secret_count(),
					state.ledger.output_count()
				);
				self.state = Some(state);
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// Create a new wallet from fresh randomness and optional caller entropy.
	pub fn create(&mut self, entropy: Option<&[u8; 32]>) -> Result<(), WalletError> {
		if self.is_initialized() {
			warn!("create() called on an existing wallet");
			return Err(WalletError::AlreadyInitialized);
		}

		let seed = Seed::generate(self.random.as_mut(), entropy)?;
		let timestamp = chrono::Utc::now().timestamp();
		self.state = Some(WalletState::new(seed, timestamp));

		info!("Created new wallet");
		Ok(())
	}

	/// Derive the next secret on the chain selected by `(mine, sweep)`.
	pub fn reserve_secret(
		&mut self,
		timestamp: i64,
		mine: bool,
		sweep: bool,
	) -> Result<&Secret, WalletError> {
		let state = self.state_mut()?;
		let chain_type = ChainType::from_flags(mine, sweep);

		// Grow both collections before touching any counter, so a failed allocation leaves
		// the wallet unchanged.
		state.root.chains.get_mut(chain_type).keys.try_reserve(1)?;
		let value = encode_hex32(&derive_secret(
			chain_type,
			state.root.chains.get(chain_type).max_depth,
		));
		let secret_id = state.ledger.insert_secret(timestamp, value, mine, sweep)?;

		let chain = state.root.chains.get_mut(chain_type);
		let depth = chain.next_depth();
		let key_id = state.derived_key_count;
		state.derived_key_count += 1;
		chain.keys.push(HdKey {
			key: RecordKey::new(key_id, timestamp),
			depth,
			secret: secret_id,
		});

		debug!(
			"Reserved {} at depth {} on {} chain",
			secret_id, depth, chain_type
		);
		state.ledger.secret(secret_id)
	}

	/// Total value of all unspent outputs.
	pub fn get_balance(&self) -> Result<Amount, WalletError> {
		Ok(self.state()?.ledger.balance())
	}

	/// Import a secret received from outside the wallet.
	///
	/// Imported secrets are always swept. Importing a value the wallet already holds returns
	/// the existing id and keeps the flags of the first import, even if `mine` differs.
	pub fn insert(
		&mut self,
		timestamp: i64,
		secret: &str,
		mine: bool,
	) -> Result<SecretId, WalletError> {
		let state = self.state_mut()?;
		let value = encode_hex32(&decode_hex32(secret)?);

		if let Some(existing) = state.ledger.find_secret_by_value(&value) {
			if existing.mine() != mine {
				warn!(
					"Secret already present as {} with mine: {}; ignoring mine: {}",
					existing.id(),
					existing.mine(),
					mine
				);
			} else {
				debug!("Secret already present as {}", existing.id());
			}
			return Ok(existing.id());
		}

		let id = state.ledger.insert_secret(timestamp, value, mine, true)?;
		info!("Imported {} (mine: {})", id, mine);
		Ok(id)
	}

	/// Record an unspent output redeemed by `secret`.
	pub fn insert_output(
		&mut self,
		timestamp: i64,
		secret: SecretId,
		amount: Amount,
	) -> Result<OutputId, WalletError> {
		self.state_mut()?
			.ledger
			.insert_output(timestamp, secret, amount)
	}

	/// Mark an output spent. Returns whether it was unspent before the call.
	pub fn spend_output(&mut self, id: OutputId) -> Result<bool, WalletError> {
		let ledger = &mut self.state_mut()?.ledger;
		let spent_now = ledger.spend_output(id)?;
		if spent_now {
			debug!(
				"Spent {}; balance now {}",
				id,
				format_amount(ledger.balance())
			);
		}
		Ok(spent_now)
	}

	/// Persist the wallet through the data store.
	pub fn save(&self) -> Result<(), WalletError> {
		let state = self.state()?;
		self.persistence.save_state(state)
	}

	/// Build a payment through `generator` and deliver the outcome to `callback`.
	///
	/// `callback` runs exactly once, with either the payment key or the error.
	pub fn generate_payment<G, F>(&mut self, amount: Amount, generator: &mut G, callback: F)
	where
		G: PaymentGenerator + ?Sized,
		F: FnOnce(Result<PaymentKey, WalletError>),
	{
		let result = if self.is_initialized() {
			generator.generate(self, amount)
		} else {
			Err(WalletError::NotInitialized)
		};
		if let Err(e) = &result {
			warn!(
				"Payment of {} failed: {}",
				format_amount(amount),
				e
			);
		}
		callback(result);
	}

	pub fn chain(&self, chain_type: ChainType) -> Result<&HdChain, WalletError> {
		Ok(self.state()?.root.chain(chain_type))
	}

	pub fn secret(&self, id: SecretId) -> Result<&Secret, WalletError> {
		self.state()?.ledger.secret(id)
	}

	pub fn output(&self, id: OutputId) -> Result<&Output, WalletError> {
		self.state()?.ledger.output(id)
	}

	/// All secrets, most recently created first.
	pub fn secrets(&self) -> Result<impl Iterator<Item = &Secret>, WalletError> {
		Ok(self.state()?.ledger.secrets())
	}

	/// All outputs, most recently created first.
	pub fn outputs(&self) -> Result<impl Iterator<Item = &Output>, WalletError> {
		Ok(self.state()?.ledger.outputs())
	}

	/// Number of derivations performed over the wallet's lifetime.
	pub fn derived_key_count(&self) -> Result<u64, WalletError> {
		Ok(self.state()?.derived_key_count)
	}

	/// Root record version: 0 before the wallet is created or loaded.
	pub fn version(&self) -> u32 {
		self.state.as_ref().map_or(0, |s| s.root.version())
	}
}
