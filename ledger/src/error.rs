//! Error types for the account ledger.

use schnorr::SchnorrError;
use thiserror::Error;

use crate::address::Address;

/// Errors that can occur during ledger operations.
///
/// Every variant leaves the ledger unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The signature does not verify for the content hash and public key.
    #[error("invalid signature")]
    InvalidSignature,

    /// Read past the end of an account's sequence.
    #[error("index {index} out of range for account {account} (length {len})")]
    IndexOutOfRange {
        account: Address,
        index: usize,
        len: usize,
    },

    /// The account already holds the configured maximum number of entries.
    #[error("ledger for account {account} is full ({capacity} entries)")]
    LedgerFull { account: Address, capacity: usize },

    /// The string exceeds the configured maximum size.
    #[error("content is {len} bytes, limit is {max}")]
    ContentTooLarge { len: usize, max: usize },

    /// A signature or public key blob had the wrong size.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] SchnorrError),

    /// The ledger configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
