use crate::wallet::WalletError;

/// Encode 32 raw bytes as 64 lowercase hex characters.
pub fn encode_hex32(bytes: &[u8; 32]) -> String {
	hex::encode(bytes)
}

/// Decode exactly 64 hex characters (either case) into 32 bytes.
pub fn decode_hex32(s: &str) -> Result<[u8; 32], WalletError> {
	if s.len() != 64 {
		return Err(WalletError::InvalidSecret(format!(
			"expected 64 hex characters, got {}",
			s.len()
		)));
	}
	let mut out = [0u8; 32];
	hex::decode_to_slice(s, &mut out)
		.map_err(|e| WalletError::InvalidSecret(format!("Failed to decode hex: {}", e)))?;
	Ok(out)
}
