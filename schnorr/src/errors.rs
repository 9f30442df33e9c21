//! Error types for the Schnorr signature scheme.

use curve::CurveError;
use thiserror::Error;

/// Errors that can occur while decoding keys and signatures or signing.
///
/// Verification itself never produces an error; see [`crate::verify()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SchnorrError {
    /// A byte blob had the wrong size for what it encodes.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The secret key is zero or not below the group order.
    #[error("secret key is out of range")]
    InvalidSecretKey,

    /// The derived nonce reduced to zero. Signing with different auxiliary
    /// randomness succeeds.
    #[error("derived nonce is zero")]
    InvalidNonce,

    /// A coordinate failed to decode.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
