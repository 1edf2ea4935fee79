use tracing::{error, info};

use webcash_wallet::utils::format_amount;
use webcash_wallet::wallet::ChainType;
use webcash_wallet::{FileDataStore, PersistenceConfig, WebcashWallet};

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.init();

	let config = PersistenceConfig::from_env();
	info!("Starting webcash wallet in {:?}", config.data_dir);

	let store = FileDataStore::new(config.data_dir.clone());
	let mut wallet = WebcashWallet::with_state_key(Box::new(store), config.state_key.clone());

	match wallet.init() {
		Ok(true) => info!("Loaded existing wallet"),
		Ok(false) => {
			info!("No existing wallet found, creating a new one");
			if let Err(e) = wallet.create(None) {
				error!("Failed to create wallet: {}", e);
				return;
			}
		}
		Err(e) => {
			error!("Failed to load wallet: {}", e);
			return;
		}
	}

	let timestamp = chrono::Utc::now().timestamp();
	match wallet.reserve_secret(timestamp, false, true) {
		Ok(secret) => info!("Reserved receive {}", secret.id()),
		Err(e) => {
			error!("Failed to reserve secret: {}", e);
			return;
		}
	}

	for chain_type in ChainType::ALL {
		if let Ok(chain) = wallet.chain(chain_type) {
			info!("{} chain at depth {}", chain_type, chain.max_depth());
		}
	}

	match wallet.get_balance() {
		Ok(balance) => info!("Wallet balance: {} webcash", format_amount(balance)),
		Err(e) => error!("Failed to compute balance: {}", e),
	}

	if let Err(e) = wallet.save() {
		error!("Failed to save wallet: {}", e);
	}
}
