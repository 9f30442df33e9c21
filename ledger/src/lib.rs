//! Per-account append-only string ledger with a signature-gated write path.
//!
//! Two write paths append to an account's sequence:
//! - [`Ledger::add_string_open`] appends unconditionally
//! - [`Ledger::add_string_secure`] appends only if a BIP-340 signature over
//!   the keccak-256 hash of the string verifies under the supplied key
//!
//! Indices are 0-based, dense and stable. Nothing is ever removed or
//! rewritten. A rejected write changes nothing.
//!
//! # Example
//!
//! ```
//! use ledger::{Address, Ledger, LedgerConfig, LedgerError};
//! use schnorr::{SigningKey, content_hash};
//!
//! let ledger = Ledger::new(LedgerConfig::default());
//!
//! let sk = SigningKey::from_bytes(&schnorr::keccak256(b"charlie")).unwrap();
//! let pk = sk.public_key();
//! let charlie = Address::from_public_key(&pk).unwrap();
//!
//! let sig = sk.sign(&content_hash("some Charlie string"), &[0u8; 32]).unwrap();
//! assert_eq!(ledger.add_string_secure(charlie, "some Charlie string", &sig, &pk).unwrap(), 0);
//!
//! let replay = ledger.add_string_secure(charlie, "another invalid string", &sig, &pk);
//! assert!(matches!(replay, Err(LedgerError::InvalidSignature)));
//! assert_eq!(ledger.length(charlie), 1);
//! ```

mod address;
mod config;
mod error;
mod ledger;
mod storage;

pub use address::{ADDRESS_SIZE, Address};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use ledger::{Bip340, Ledger, SignatureScheme};
pub use storage::StringStorage;
