//! Error types for field and curve operations.

use thiserror::Error;

/// Errors raised by the curve arithmetic engine.
///
/// These are local invariant checks. Well-formed callers only see them when
/// decoding untrusted bytes into field elements or points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A coordinate or scalar encoding is not below its modulus.
    #[error("field element is not canonical (value >= modulus)")]
    InvalidFieldElement,

    /// The x-coordinate has no square root for x^3 + 7, or an (x, y) pair
    /// does not satisfy the curve equation.
    #[error("point is not on the secp256k1 curve")]
    PointNotOnCurve,

    /// Inverse of zero was requested.
    #[error("division by zero")]
    DivisionByZero,
}
