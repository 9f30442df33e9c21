//! Account identities.

use std::fmt;
use std::str::FromStr;

use schnorr::{PK_SIZE, PublicKey, keccak256};
use serde::{Deserialize, Serialize};

pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte account identity.
///
/// Callers derive it from the 64-byte public key as the last 20 bytes of its
/// keccak-256 hash. The ledger itself never derives it: the account binding
/// for a write is whatever the caller supplies.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Address of an uncompressed (x || y) key.
    pub fn from_uncompressed(key: &[u8; PK_SIZE]) -> Self {
        let digest = keccak256(key);
        let mut out = [0u8; ADDRESS_SIZE];
        out.copy_from_slice(&digest[32 - ADDRESS_SIZE..]);
        Self(out)
    }

    /// Address of a public key. `None` for x-only keys, which do not carry
    /// the y-coordinate the hash is taken over.
    pub fn from_public_key(key: &PublicKey) -> Option<Self> {
        key.to_uncompressed().map(|xy| Self::from_uncompressed(&xy))
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    /// Parses 40 hex digits, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut out = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(digits, &mut out)?;
        Ok(Self(out))
    }
}
