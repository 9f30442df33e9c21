//! BIP-340 Schnorr signatures over secp256k1.
//!
//! This library implements:
//! - Verification of 64-byte `(r, s)` signatures over 32-byte message hashes
//! - Public keys in x-only (32-byte) or uncompressed (64-byte) form
//! - Deterministic-with-aux-randomness signing, as specified by BIP-340
//! - keccak-256 content hashing and SHA-256 tagged hashing
//!
//! # Overview
//!
//! A message is signed as its 32-byte hash. The content hash used by callers
//! is keccak-256 over the message bytes; the challenge hash is the BIP-340
//! tagged SHA-256, so signatures from any standard BIP-340 signer verify.
//!
//! Verification is total: malformed encodings, off-curve keys and wrong
//! signatures all produce `false`, never an error.
//!
//! # Example
//!
//! ```
//! use schnorr::{SigningKey, content_hash};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let signing_key = SigningKey::random(&mut rng);
//! let public_key = signing_key.public_key();
//!
//! let hash = content_hash("some Charlie string");
//! let signature = signing_key.sign_with_rng(&mut rng, &hash).expect("signing failed");
//!
//! assert!(public_key.verify(&hash, &signature));
//! assert!(!public_key.verify(&content_hash("another invalid string"), &signature));
//! ```
//!
//! # Public key y-coordinate
//!
//! A 64-byte key carries a y-coordinate. It must satisfy the curve equation
//! with x, but only x is used: the verification point is always the even-y
//! lift, exactly as for an x-only key. Keys whose full point has odd y
//! therefore verify signatures produced by a BIP-340 signer.

mod constants;
mod errors;
mod hash;
mod keys;
mod signatures;
mod verifier;


pub use constants::{HASH_SIZE, PK_SIZE, SIG_SIZE, SK_SIZE, XONLY_PK_SIZE};
pub use errors::SchnorrError;
pub use hash::{MessageHash, content_hash, keccak256, tagged_hash};
pub use keys::{PublicKey, SigningKey};
pub use signatures::Signature;
pub use verifier::{verify, verify_raw};
