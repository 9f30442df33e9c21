//! The operation set exposed to external callers.

use schnorr::{PublicKey, Signature};

use crate::address::Address;
use crate::error::Result;
use crate::ledger::{Ledger, SignatureScheme};

/// Synchronous string storage over raw wire values.
///
/// `account` is the caller's binding for the write. For secure writes it is
/// trusted as given; only the signature is checked against `pubkey` and the
/// content hash.
pub trait StringStorage {
    fn add_string(&self, account: Address, content: &str) -> Result<usize>;

    /// `signature` is 64 bytes; `pubkey` is 64 bytes (x || y) or 32 bytes
    /// x-only. Other sizes fail with
    /// [`LedgerError::MalformedInput`](crate::LedgerError::MalformedInput).
    fn add_string_secure(
        &self,
        account: Address,
        content: &str,
        signature: &[u8],
        pubkey: &[u8],
    ) -> Result<usize>;

    fn get_string(&self, account: Address, index: usize) -> Result<String>;
}

impl<S: SignatureScheme> StringStorage for Ledger<S> {
    fn add_string(&self, account: Address, content: &str) -> Result<usize> {
        self.add_string_open(account, content)
    }

    fn add_string_secure(
        &self,
        account: Address,
        content: &str,
        signature: &[u8],
        pubkey: &[u8],
    ) -> Result<usize> {
        let signature = Signature::from_slice(signature)?;
        let pubkey = PublicKey::from_slice(pubkey)?;
        Ledger::<S>::add_string_secure(self, account, content, &signature, &pubkey)
    }

    fn get_string(&self, account: Address, index: usize) -> Result<String> {
        Ledger::<S>::get_string(self, account, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::error::LedgerError;

    #[test]
    fn test_malformed_blobs() {
        let ledger = Ledger::new(LedgerConfig::default());
        let storage: &dyn StringStorage = &ledger;
        let account = Address::new([7; 20]);

        let err = storage
            .add_string_secure(account, "x", &[0u8; 63], &[0u8; 64])
            .unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(_)));

        let err = storage
            .add_string_secure(account, "x", &[0u8; 64], &[0u8; 65])
            .unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(_)));

        // well-sized garbage is a signature failure, not a format failure
        let err = storage
            .add_string_secure(account, "x", &[0u8; 64], &[0u8; 64])
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSignature));
        assert_eq!(ledger.length(account), 0);
    }

    #[test]
    fn test_open_path_through_trait() {
        let ledger = Ledger::new(LedgerConfig::default());
        let account = Address::new([1; 20]);

        assert_eq!(StringStorage::add_string(&ledger, account, "hi").unwrap(), 0);
        assert_eq!(StringStorage::get_string(&ledger, account, 0).unwrap(), "hi");
    }
}
