//! Hash primitives: keccak-256 for content, SHA-256 tagged hashes for BIP-340.

use core::fmt;

use p3_keccak::Keccak256Hash;
use p3_symmetric::CryptographicHasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::HASH_SIZE;
use crate::errors::SchnorrError;

/// The 32-byte digest a signature commits to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHash([u8; HASH_SIZE]);

impl MessageHash {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let array: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| SchnorrError::InvalidLength {
            what: "message hash",
            expected: HASH_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for MessageHash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for MessageHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageHash(0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Ethereum-flavoured keccak-256 (original Keccak padding, not SHA3).
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    Keccak256Hash.hash_iter(bytes.iter().copied())
}

/// Content hash of a stored string: keccak-256 of its UTF-8 bytes.
pub fn content_hash(content: &str) -> MessageHash {
    MessageHash(keccak256(content.as_bytes()))
}

/// BIP-340 tagged hash: SHA256(SHA256(tag) || SHA256(tag) || parts...).
pub fn tagged_hash(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag.as_bytes());

    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
