use crate::wallet::types::{Amount, Output};

/// Sum the amounts of every unspent output.
///
/// Full scan with no caching; cost grows with the number of outputs ever recorded.
pub fn unspent_balance<'a, I>(outputs: I) -> Amount
where
	I: IntoIterator<Item = &'a Output>,
{
	outputs
		.into_iter()
		.filter(|output| !output.spent)
		.fold(0, |balance: Amount, output| balance.saturating_add(output.amount))
}
