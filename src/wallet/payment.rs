//! Payment generation boundary.
//!
//! The wallet does not decide which outputs fund a payment or how change is minted. A host
//! supplies that policy as a [`PaymentGenerator`]. The wallet gates the call on initialization
//! and delivers the outcome to the caller's callback exactly once.

use crate::wallet::WalletError;
use crate::wallet::service::WebcashWallet;
use crate::wallet::types::Amount;

/// Serialized webcash handed to the payee.
pub type PaymentKey = String;

/// Coin selection and change construction, provided by the host.
pub trait PaymentGenerator {
	/// Build a payment of `amount` from `wallet`.
	///
	/// Implementations reserve payment/change secrets and spend outputs through the wallet's
	/// public operations.
	fn generate(
		&mut self,
		wallet: &mut WebcashWallet,
		amount: Amount,
	) -> Result<PaymentKey, WalletError>;
}
