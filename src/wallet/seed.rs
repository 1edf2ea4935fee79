//! Root seed creation.
//!
//! A seed is `SHA256(entropy || random)`, where `entropy` is optional caller-supplied bytes and
//! `random` is 32 bytes from a strong random source. The OS source is used unless the host injects
//! another [`RandomSource`].

use crate::wallet::WalletError;

use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, error};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of random bytes mixed into every seed.
pub const SEED_RANDOM_BYTES: usize = 32;

/// Source of strong randomness for seed creation.
pub trait RandomSource: Send {
	/// Fill as much of `buf` as possible and return how many bytes were written.
	///
	/// An error means the source could not be used at all.
	fn fill(&mut self, buf: &mut [u8]) -> Result<usize, WalletError>;
}

/// The operating system's random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
	fn fill(&mut self, buf: &mut [u8]) -> Result<usize, WalletError> {
		OsRng.try_fill_bytes(buf).map_err(|e| {
			error!("Failed to read from OS random source: {}", e);
			WalletError::RandomSourceUnavailable(e.to_string())
		})?;
		Ok(buf.len())
	}
}

/// 32-byte wallet root seed. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Seed(#[serde(with = "hex::serde")] [u8; 32]);

impl Seed {
	pub fn from_bytes(bytes: [u8; 32]) -> Self {
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	/// Mix optional entropy with fresh bytes from `source` into a new seed.
	pub fn generate(
		source: &mut dyn RandomSource,
		entropy: Option<&[u8; 32]>,
	) -> Result<Self, WalletError> {
		let mut random = [0u8; SEED_RANDOM_BYTES];
		let produced = source.fill(&mut random)?;
		if produced < SEED_RANDOM_BYTES {
			random.zeroize();
			error!(
				"Random source produced {} of {} bytes",
				produced, SEED_RANDOM_BYTES
			);
			return Err(WalletError::RandomSourceExhausted { produced });
		}

		let mut hasher = Sha256::new();
		if let Some(entropy) = entropy {
			hasher.update(entropy);
		}
		hasher.update(random);
		random.zeroize();

		debug!(
			"Generated wallet seed (caller entropy: {})",
			entropy.is_some()
		);
		Ok(Self(hasher.finalize().into()))
	}
}

impl fmt::Debug for Seed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Seed(<redacted>)")
	}
}
