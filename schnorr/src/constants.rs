//! Constants used in the Schnorr signature scheme implementation.

/// Size of an x-only public key in bytes (BIP-340 form).
pub const XONLY_PK_SIZE: usize = 32;

/// Size of an uncompressed public key without its 0x04 prefix.
///
/// The key is the big-endian x-coordinate followed by the big-endian
/// y-coordinate.
pub const PK_SIZE: usize = 64;

/// Size of a serialized secret signing key in bytes.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - The x-coordinate r of the nonce point R (32 bytes)
/// - A scalar s (32 bytes)
pub const SIG_SIZE: usize = 64;

/// Size of a message hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Tag for the Fiat-Shamir challenge hash.
pub(crate) const CHALLENGE_TAG: &str = "BIP0340/challenge";

/// Tag for masking the secret key with auxiliary randomness.
pub(crate) const AUX_TAG: &str = "BIP0340/aux";

/// Tag for deriving the signing nonce.
pub(crate) const NONCE_TAG: &str = "BIP0340/nonce";
