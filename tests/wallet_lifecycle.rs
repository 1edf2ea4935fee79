use webcash_wallet::utils::{decode_hex32, encode_hex32};
use webcash_wallet::wallet::{RandomSource, derive_secret};
use webcash_wallet::{
	ChainType, DataStore, FileDataStore, MemoryDataStore, WalletError, WebcashWallet,
};

struct CountingRandom(u8);

impl RandomSource for CountingRandom {
	fn fill(&mut self, buf: &mut [u8]) -> Result<usize, WalletError> {
		for b in buf.iter_mut() {
			*b = self.0;
			self.0 = self.0.wrapping_add(1);
		}
		Ok(buf.len())
	}
}

fn created(store: MemoryDataStore) -> WebcashWallet {
	let mut wallet = WebcashWallet::new(Box::new(store)).with_random_source(Box::new(CountingRandom(0)));
	assert!(!wallet.init().unwrap());
	wallet.create(None).unwrap();
	wallet
}

#[test]
fn fresh_wallet_reserves_distinct_receive_secrets() {
	let mut wallet = created(MemoryDataStore::new());
	let a = wallet.reserve_secret(100, false, true).unwrap().value().to_string();
	let b = wallet.reserve_secret(101, false, true).unwrap().value().to_string();

	assert_eq!(a.len(), 64);
	assert_eq!(b.len(), 64);
	assert_ne!(a, b);
	assert_eq!(wallet.chain(ChainType::Receive).unwrap().max_depth(), 2);
	assert_eq!(encode_hex32(&decode_hex32(&a).unwrap()), a);
}

#[test]
fn balance_of_mixed_outputs() {
	let mut wallet = created(MemoryDataStore::new());
	let secret = wallet.reserve_secret(0, true, false).unwrap().id();
	wallet.insert_output(0, secret, 100).unwrap();
	let spent = wallet.insert_output(0, secret, 50).unwrap();
	wallet.spend_output(spent).unwrap();
	assert_eq!(wallet.get_balance().unwrap(), 100);
}

#[test]
fn uninitialized_and_double_create() {
	let wallet = WebcashWallet::new(Box::new(MemoryDataStore::new()));
	assert!(matches!(
		wallet.get_balance(),
		Err(WalletError::NotInitialized)
	));

	let mut wallet = created(MemoryDataStore::new());
	assert!(matches!(
		wallet.create(None),
		Err(WalletError::AlreadyInitialized)
	));
}

#[test]
fn saved_wallet_resumes_where_it_left_off() {
	let store = MemoryDataStore::new();
	let mut wallet = created(store.clone());
	wallet.reserve_secret(1, false, true).unwrap();
	wallet.reserve_secret(2, false, true).unwrap();
	let change = wallet.reserve_secret(3, true, false).unwrap().id();
	let output = wallet.insert_output(4, change, 2_500).unwrap();
	let imported = wallet.insert(5, &"42".repeat(32), false).unwrap();
	wallet.save().unwrap();

	let mut restored = WebcashWallet::new(Box::new(store.clone()));
	assert!(restored.init().unwrap());
	assert_eq!(restored.version(), 1);
	assert_eq!(restored.get_balance().unwrap(), 2_500);
	assert_eq!(restored.chain(ChainType::Receive).unwrap().max_depth(), 2);
	assert_eq!(restored.chain(ChainType::Change).unwrap().max_depth(), 1);
	assert_eq!(restored.derived_key_count().unwrap(), 3);
	assert_eq!(restored.output(output).unwrap().amount(), 2_500);
	assert!(restored.secret(imported).unwrap().sweep());

	// Derivation continues from the restored depth and ids stay unique.
	let next = restored.reserve_secret(6, false, true).unwrap();
	assert_eq!(next.value(), encode_hex32(&derive_secret(ChainType::Receive, 2)));
	let next_id = next.id();
	assert!(restored.secrets().unwrap().filter(|s| s.id() == next_id).count() == 1);
	assert_eq!(restored.secrets().unwrap().count(), 5);
}

#[test]
fn file_store_persists_across_handles() {
	let dir = tempfile::tempdir().unwrap();

	let mut wallet = WebcashWallet::new(Box::new(FileDataStore::new(dir.path().to_path_buf())))
		.with_random_source(Box::new(CountingRandom(200)));
	assert!(!wallet.init().unwrap());
	wallet.create(Some(&[1u8; 32])).unwrap();
	let mined = wallet.reserve_secret(10, true, true).unwrap().id();
	wallet.insert_output(10, mined, 7).unwrap();
	wallet.save().unwrap();

	let mut reopened = WebcashWallet::new(Box::new(FileDataStore::new(dir.path().to_path_buf())));
	assert!(reopened.init().unwrap());
	assert_eq!(reopened.get_balance().unwrap(), 7);
	assert_eq!(reopened.chain(ChainType::Mining).unwrap().max_depth(), 1);
	assert!(dir.path().join("webcash_wallet.dat").exists());
	assert!(dir.path().join("webcash_wallet.meta.dat").exists());
}

#[test]
fn init_rejects_a_rewound_snapshot() {
	let store = MemoryDataStore::new();
	let mut wallet = created(store.clone());
	let receive = wallet.reserve_secret(1, false, true).unwrap().id();
	wallet.insert_output(2, receive, 5).unwrap();
	wallet.save().unwrap();

	let mut json: serde_json::Value =
		serde_json::from_slice(&store.retrieve("webcash_wallet").unwrap().unwrap()).unwrap();
	json["root"]["chains"]["chains"][0]["max_depth"] = 0.into();
	store
		.store("webcash_wallet", &serde_json::to_vec(&json).unwrap())
		.unwrap();

	let mut restored = WebcashWallet::new(Box::new(store));
	assert!(matches!(restored.init(), Err(WalletError::Storage(_))));
	assert_eq!(restored.version(), 0);
}
