//! Per-account append-only string ledger.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use schnorr::{MessageHash, PublicKey, Signature};
use tracing::{debug, warn};

use crate::address::Address;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

/// The hash-and-verify pair guarding secure writes.
pub trait SignatureScheme: Send + Sync {
    /// Digest of the string's UTF-8 bytes; this is what the signer signs.
    fn content_hash(&self, content: &str) -> MessageHash;

    /// Must be total: malformed input is `false`, never a panic.
    fn verify(&self, msg: &MessageHash, sig: &Signature, pubkey: &PublicKey) -> bool;
}

/// keccak-256 content hash with BIP-340 verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip340;

impl SignatureScheme for Bip340 {
    fn content_hash(&self, content: &str) -> MessageHash {
        schnorr::content_hash(content)
    }

    fn verify(&self, msg: &MessageHash, sig: &Signature, pubkey: &PublicKey) -> bool {
        schnorr::verify(msg, sig, pubkey)
    }
}

/// Append-only string sequences keyed by account.
///
/// Appends to one account are serialized by the map's entry lock, so indices
/// are dense and assigned in append order. Accounts in different shards do
/// not contend. Signature verification runs before any lock is taken.
pub struct Ledger<S = Bip340> {
    accounts: DashMap<Address, Vec<String>>,
    config: LedgerConfig,
    scheme: S,
}

impl Ledger<Bip340> {
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_scheme(config, Bip340)
    }
}

impl Default for Ledger<Bip340> {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<S: SignatureScheme> Ledger<S> {
    pub fn with_scheme(config: LedgerConfig, scheme: S) -> Self {
        Self {
            accounts: DashMap::new(),
            config,
            scheme,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Appends `content` to `account`'s sequence and returns its index.
    ///
    /// Fails only when a configured limit is hit.
    pub fn add_string_open(&self, account: Address, content: &str) -> Result<usize> {
        self.check_content_size(content)?;
        self.append(account, content)
    }

    /// Appends `content` only if `sig` verifies over its content hash under
    /// `pubkey`. A rejected write leaves the ledger unchanged.
    pub fn add_string_secure(
        &self,
        account: Address,
        content: &str,
        sig: &Signature,
        pubkey: &PublicKey,
    ) -> Result<usize> {
        self.check_content_size(content)?;

        let hash = self.scheme.content_hash(content);
        if !self.scheme.verify(&hash, sig, pubkey) {
            warn!(%account, "ledger: rejected secure write, invalid signature");
            return Err(LedgerError::InvalidSignature);
        }

        self.append(account, content)
    }

    pub fn get_string(&self, account: Address, index: usize) -> Result<String> {
        let out_of_range = |len| LedgerError::IndexOutOfRange {
            account,
            index,
            len,
        };
        match self.accounts.get(&account) {
            Some(entries) => entries
                .get(index)
                .cloned()
                .ok_or_else(|| out_of_range(entries.len())),
            None => Err(out_of_range(0)),
        }
    }

    /// Number of entries for `account`, zero if it never wrote.
    pub fn length(&self, account: Address) -> usize {
        self.accounts.get(&account).map_or(0, |entries| entries.len())
    }

    /// Number of accounts with at least one entry.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Snapshot of `account`'s sequence.
    pub fn entries(&self, account: Address) -> Vec<String> {
        self.accounts
            .get(&account)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    fn check_content_size(&self, content: &str) -> Result<()> {
        match self.config.max_content_bytes {
            Some(max) if content.len() > max => Err(LedgerError::ContentTooLarge {
                len: content.len(),
                max,
            }),
            _ => Ok(()),
        }
    }

    fn append(&self, account: Address, content: &str) -> Result<usize> {
        let capacity = self.config.max_entries_per_account;
        let full = |len: usize| capacity.is_some_and(|cap| len >= cap);

        let index = match self.accounts.entry(account) {
            Entry::Occupied(mut occupied) => {
                let entries = occupied.get_mut();
                if full(entries.len()) {
                    return Err(LedgerError::LedgerFull {
                        account,
                        capacity: entries.len(),
                    });
                }
                entries.push(content.to_owned());
                entries.len() - 1
            }
            Entry::Vacant(vacant) => {
                if full(0) {
                    return Err(LedgerError::LedgerFull {
                        account,
                        capacity: 0,
                    });
                }
                vacant.insert(vec![content.to_owned()]);
                0
            }
        };

        debug!(%account, index, len = content.len(), "ledger: appended entry");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts a signature iff its first byte is 1.
    struct FlagScheme;

    impl SignatureScheme for FlagScheme {
        fn content_hash(&self, content: &str) -> MessageHash {
            schnorr::content_hash(content)
        }

        fn verify(&self, _msg: &MessageHash, sig: &Signature, _pubkey: &PublicKey) -> bool {
            sig.r[0] == 1
        }
    }

    fn sig(flag: u8) -> Signature {
        Signature {
            r: [flag; 32],
            s: [0; 32],
        }
    }

    fn account(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    #[test]
    fn test_open_appends_are_dense() {
        let ledger = Ledger::new(LedgerConfig::default());
        let alice = account(0xa1);

        assert_eq!(ledger.length(alice), 0);
        assert_eq!(ledger.add_string_open(alice, "first").unwrap(), 0);
        assert_eq!(ledger.add_string_open(alice, "second").unwrap(), 1);
        assert_eq!(ledger.add_string_open(alice, "").unwrap(), 2);

        assert_eq!(ledger.length(alice), 3);
        assert_eq!(ledger.get_string(alice, 1).unwrap(), "second");
        assert_eq!(ledger.get_string(alice, 2).unwrap(), "");
        assert_eq!(ledger.entries(alice), vec!["first", "second", ""]);
    }

    #[test]
    fn test_accounts_are_independent() {
        let ledger = Ledger::new(LedgerConfig::default());
        ledger.add_string_open(account(1), "a").unwrap();
        assert_eq!(ledger.add_string_open(account(2), "b").unwrap(), 0);
        assert_eq!(ledger.account_count(), 2);
        assert_eq!(ledger.get_string(account(2), 0).unwrap(), "b");
    }

    #[test]
    fn test_get_out_of_range() {
        let ledger = Ledger::new(LedgerConfig::default());
        let bob = account(0xb0);

        let err = ledger.get_string(bob, 0).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::IndexOutOfRange { index: 0, len: 0, .. }
        ));

        ledger.add_string_open(bob, "only").unwrap();
        let err = ledger.get_string(bob, 1).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::IndexOutOfRange { index: 1, len: 1, .. }
        ));
    }

    #[test]
    fn test_secure_write_uses_scheme() {
        let ledger = Ledger::with_scheme(LedgerConfig::default(), FlagScheme);
        let carol = account(0xc0);
        let pk = PublicKey::from_x_only([0; 32]);

        assert_eq!(ledger.add_string_secure(carol, "ok", &sig(1), &pk).unwrap(), 0);

        let err = ledger.add_string_secure(carol, "no", &sig(0), &pk).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSignature));
        assert_eq!(ledger.entries(carol), vec!["ok"]);
    }

    #[test]
    fn test_rejected_first_write_creates_no_account() {
        let ledger = Ledger::with_scheme(LedgerConfig::default(), FlagScheme);
        let pk = PublicKey::from_x_only([0; 32]);

        assert!(ledger.add_string_secure(account(9), "x", &sig(0), &pk).is_err());
        assert_eq!(ledger.account_count(), 0);
        assert_eq!(ledger.length(account(9)), 0);
    }

    #[test]
    fn test_ledger_full() {
        let config = LedgerConfig {
            max_entries_per_account: Some(2),
            ..Default::default()
        };
        let ledger = Ledger::new(config);
        let dave = account(0xd0);

        ledger.add_string_open(dave, "1").unwrap();
        ledger.add_string_open(dave, "2").unwrap();
        let err = ledger.add_string_open(dave, "3").unwrap_err();
        assert!(matches!(err, LedgerError::LedgerFull { capacity: 2, .. }));
        assert_eq!(ledger.length(dave), 2);

        // other accounts have their own budget
        assert_eq!(ledger.add_string_open(account(0xd1), "1").unwrap(), 0);
    }

    #[test]
    fn test_zero_capacity() {
        let config = LedgerConfig {
            max_entries_per_account: Some(0),
            ..Default::default()
        };
        let ledger = Ledger::new(config);
        assert!(matches!(
            ledger.add_string_open(account(1), "x"),
            Err(LedgerError::LedgerFull { capacity: 0, .. })
        ));
        assert_eq!(ledger.account_count(), 0);
    }

    #[test]
    fn test_content_too_large() {
        let config = LedgerConfig {
            max_content_bytes: Some(4),
            ..Default::default()
        };
        let ledger = Ledger::with_scheme(config, FlagScheme);
        let pk = PublicKey::from_x_only([0; 32]);

        assert_eq!(ledger.add_string_open(account(1), "four").unwrap(), 0);
        assert!(matches!(
            ledger.add_string_open(account(1), "fives"),
            Err(LedgerError::ContentTooLarge { len: 5, max: 4 })
        ));
        // checked before the signature
        assert!(matches!(
            ledger.add_string_secure(account(1), "fives", &sig(0), &pk),
            Err(LedgerError::ContentTooLarge { .. })
        ));
        // multi-byte characters count as bytes
        assert!(ledger.add_string_open(account(1), "ééé").is_err());
        assert_eq!(ledger.length(account(1)), 1);
    }
}
