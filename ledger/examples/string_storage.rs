//! Alice and Bob write openly, Charlie writes through the signed path and a
//! replayed signature is refused. Run with `RUST_LOG=debug` to see the ledger
//! and verifier events.

use ledger::{Address, Ledger, LedgerConfig, LedgerError, StringStorage};
use schnorr::{SigningKey, content_hash, keccak256};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG: &str = r#"
max_entries_per_account = 16
max_content_bytes = 256
"#;

fn account_key(name: &str) -> SigningKey {
    SigningKey::from_bytes(&keccak256(name.as_bytes())).expect("name hash is a valid key")
}

fn main() -> Result<(), LedgerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    let ledger = Ledger::new(LedgerConfig::from_toml_str(CONFIG)?);

    for name in ["alice", "bob"] {
        let key = account_key(name);
        let account = Address::from_public_key(&key.public_key()).expect("full key");
        let content = format!("Hello from {name}");
        let index = ledger.add_string(account, &content)?;
        info!(%account, index, "{name} stored {:?}", ledger.get_string(account, index)?);
    }

    let charlie = account_key("charlie");
    let pk = charlie.public_key();
    let account = Address::from_public_key(&pk).expect("full key");
    let pk_bytes = pk.to_uncompressed().expect("full key");

    let content = "some Charlie string";
    let sig = charlie
        .sign(&content_hash(content), &[0u8; 32])
        .expect("sign")
        .to_bytes();

    let index = StringStorage::add_string_secure(&ledger, account, content, &sig, &pk_bytes)?;
    info!(%account, index, "charlie stored {:?}", ledger.get_string(account, index)?);

    match StringStorage::add_string_secure(
        &ledger,
        account,
        "another invalid string",
        &sig,
        &pk_bytes,
    ) {
        Err(LedgerError::InvalidSignature) => {
            info!(%account, len = ledger.length(account), "replayed signature refused")
        }
        Err(err) => return Err(err),
        Ok(index) => panic!("replayed signature accepted at index {index}"),
    }

    Ok(())
}
