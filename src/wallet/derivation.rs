//! Deterministic secret derivation.
//!
//! Secrets are symmetric 256-bit values produced by a tagged SHA-256 hash over the chaincode and
//! depth. The tag digest is fed twice before the payload, which keeps these hashes apart from any
//! other SHA-256 use in the protocol. The same `(chain, depth)` always yields the same secret, so a
//! wallet can be rebuilt by replaying depths.

use crate::wallet::chain::ChainType;

use sha2::{Digest, Sha256};

/// Tag string for wallet secret derivation.
pub const DERIVATION_TAG: &str = "webcashwalletv1";

/// A SHA-256 context preloaded with `SHA256(tag) || SHA256(tag)`.
pub fn tagged_hasher(tag: &str) -> Sha256 {
	let tag_hash = Sha256::digest(tag.as_bytes());
	let mut hasher = Sha256::new();
	hasher.update(tag_hash);
	hasher.update(tag_hash);
	hasher
}

/// Derive the secret at `depth` on `chain`.
pub fn derive_secret(chain: ChainType, depth: u64) -> [u8; 32] {
	let mut hasher = tagged_hasher(DERIVATION_TAG);
	hasher.update(chain.chaincode_bytes());
	hasher.update(depth.to_be_bytes());
	hasher.finalize().into()
}

/// Public webcash hash of a secret: SHA-256 over its hex string.
pub fn public_hash(secret_hex: &str) -> [u8; 32] {
	Sha256::digest(secret_hex.as_bytes()).into()
}
