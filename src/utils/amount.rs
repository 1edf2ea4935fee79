use crate::wallet::Amount;

/// Number of decimal places in one webcash.
pub const WEBCASH_DECIMALS: u32 = 8;

/// Render an amount of indivisible units as a decimal webcash string.
pub fn format_amount(amount: Amount) -> String {
	let unit = 10u64.pow(WEBCASH_DECIMALS);
	format!(
		"{}.{:0width$}",
		amount / unit,
		amount % unit,
		width = WEBCASH_DECIMALS as usize
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_whole_and_fractional_units() {
		assert_eq!(format_amount(0), "0.00000000");
		assert_eq!(format_amount(1), "0.00000001");
		assert_eq!(format_amount(100_000_000), "1.00000000");
		assert_eq!(format_amount(123_456_789), "1.23456789");
	}

	#[test]
	fn formats_max_amount_without_precision_loss() {
		assert_eq!(format_amount(u64::MAX), "184467440737.09551615");
	}
}
