//! Signature types and challenge hashing for the Schnorr signature scheme.

use curve::ScalarField;
use serde::{Deserialize, Serialize};

use crate::constants::{CHALLENGE_TAG, SIG_SIZE};
use crate::errors::SchnorrError;
use crate::hash::{MessageHash, tagged_hash};

/// A BIP-340 Schnorr signature `(r, s)`.
///
/// - `r` is the big-endian x-coordinate of the nonce point R (the commitment)
/// - `s` is the big-endian response scalar
///
/// Both halves are kept as raw bytes: range checks against p and n belong to
/// verification, where an out-of-range value means "invalid", not "malformed".
///
/// # Structure
///
/// The signature satisfies `s * G == R + e * P`, where
/// `e = H_challenge(r || x(P) || m) mod n` and R, P both have even y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// x(R), where R = k * G for the signing nonce k
    pub r: [u8; 32],
    /// s = k + e * d mod n, where d is the (parity-adjusted) secret key
    pub s: [u8; 32],
}

impl Signature {
    pub fn from_bytes(bytes: &[u8; SIG_SIZE]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Self { r, s }
    }

    /// Decode a signature blob, rejecting anything that is not 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let array: &[u8; SIG_SIZE] = bytes.try_into().map_err(|_| SchnorrError::InvalidLength {
            what: "signature",
            expected: SIG_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self::from_bytes(array))
    }

    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }
}

/// Computes the Fiat-Shamir challenge
/// `e = tagged_hash("BIP0340/challenge", r || px || msg) mod n`.
pub(crate) fn hash_challenge(r: &[u8; 32], px: &[u8; 32], msg: &MessageHash) -> ScalarField {
    let digest = tagged_hash(
        CHALLENGE_TAG,
        &[r.as_slice(), px.as_slice(), msg.as_bytes().as_slice()],
    );
    ScalarField::from_bytes_be_reduced(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_layout() {
        let mut bytes = [0u8; 64];
        bytes[0] = 0xaa;
        bytes[63] = 0xbb;
        let sig = Signature::from_bytes(&bytes);
        assert_eq!(sig.r[0], 0xaa);
        assert_eq!(sig.s[31], 0xbb);
        assert_eq!(sig.to_bytes(), bytes);
    }

    #[test]
    fn test_from_slice_rejects_wrong_size() {
        assert_eq!(
            Signature::from_slice(&[0u8; 65]),
            Err(SchnorrError::InvalidLength {
                what: "signature",
                expected: 64,
                actual: 65
            })
        );
        assert!(Signature::from_slice(&[]).is_err());
        assert!(Signature::from_slice(&[1u8; 64]).is_ok());
    }

    #[test]
    fn test_challenge_depends_on_every_input() {
        let r = [1u8; 32];
        let px = [2u8; 32];
        let m = MessageHash::new([3u8; 32]);
        let e = hash_challenge(&r, &px, &m);
        assert_ne!(e, hash_challenge(&[9u8; 32], &px, &m));
        assert_ne!(e, hash_challenge(&r, &[9u8; 32], &m));
        assert_ne!(e, hash_challenge(&r, &px, &MessageHash::new([9u8; 32])));
    }
}
