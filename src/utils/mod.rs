//!
//! Utility module for the webcash wallet.
//!
//! Re-exports amount formatting and 32-byte hex helpers used throughout the codebase.
/// Amount formatting for display and logs
pub mod amount;
/// Hex encoding of secrets and hashes
pub mod encoding;

pub use amount::{WEBCASH_DECIMALS, format_amount};
pub use encoding::{decode_hex32, encode_hex32};
