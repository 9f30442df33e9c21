//! Scalar field of secp256k1. n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arith::{
    add_mod, is_canonical, is_zero, limbs_from_be_bytes, limbs_to_be_bytes, montgomery_mul,
    neg_mod, sub_mod, sub_with_borrow,
};
use crate::error::CurveError;

/// Scalar field element for the curve
/// Represented in Montgomery form with [u64; 4]
#[derive(Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// Montgomery form: value * R mod n, where R = 2^256
    limbs: [u64; 4],
}

// Group order: n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
pub(crate) const MODULUS: [u64; 4] = [
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

// R = 2^256 mod n (Montgomery parameter)
const R: [u64; 4] = [
    0x402da1732fc9bebf,
    0x4551231950b75fc4,
    0x0000000000000001,
    0x0000000000000000,
];

// R^2 = 2^512 mod n (for Montgomery conversion)
const R2: [u64; 4] = [
    0x896cf21467d7d140,
    0x741496c20e7cf878,
    0xe697f5e45bcd07c6,
    0x9d671cd581c69bc5,
];

// -n^{-1} mod 2^64 (Montgomery parameter mu)
const MU: u64 = 0x4b0dff665588b13f;

// n - 2 for Fermat's little theorem
const N_MINUS_2: [u64; 4] = [
    0xbfd25e8cd036413f,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

impl ScalarField {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = ScalarField {
        limbs: [0, 0, 0, 0],
    };

    /// One element (in Montgomery form: R mod n)
    pub const ONE: Self = ScalarField { limbs: R };

    /// Create a new scalar field element from a u64 value
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    /// Convert from Montgomery form to canonical form
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        montgomery_mul(self.limbs, [1, 0, 0, 0], MODULUS, MU)
    }

    #[inline]
    pub(crate) fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        ScalarField {
            limbs: montgomery_mul(limbs, R2, MODULUS, MU),
        }
    }

    /// Decode a 32-byte big-endian integer, rejecting values >= n.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        let limbs = limbs_from_be_bytes(bytes);
        if !is_canonical(limbs, MODULUS) {
            return Err(CurveError::InvalidFieldElement);
        }
        Ok(Self::from_canonical_limbs(limbs))
    }

    /// Decode a 32-byte big-endian integer and reduce it mod n.
    ///
    /// Any 256-bit value is below 2n, so one conditional subtraction suffices.
    pub fn from_bytes_be_reduced(bytes: &[u8; 32]) -> Self {
        let limbs = limbs_from_be_bytes(bytes);
        let (reduced, borrow) = sub_with_borrow(limbs, MODULUS);
        if borrow {
            Self::from_canonical_limbs(limbs)
        } else {
            Self::from_canonical_limbs(reduced)
        }
    }

    /// 32-byte big-endian encoding of the canonical value.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        limbs_to_be_bytes(self.to_canonical_limbs())
    }

    /// Check if this field element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        is_zero(self.limbs)
    }

    /// Compute multiplicative inverse using Fermat's little theorem: a^{-1} = a^{n-2}
    pub fn inverse(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow_vartime(N_MINUS_2))
    }

    /// Variable-time exponentiation
    fn pow_vartime(&self, exp: [u64; 4]) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        // Process bits from least significant to most significant
        for &limb in exp.iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base * base;
                remaining >>= 1;
            }
        }

        result
    }

    pub fn as_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes_be())
    }

    /// The group order n.
    pub fn order() -> BigUint {
        BigUint::from_bytes_be(&limbs_to_be_bytes(MODULUS))
    }

    /// The group order n as raw canonical limbs.
    pub const fn order_limbs() -> [u64; 4] {
        MODULUS
    }
}

impl Distribution<ScalarField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalarField {
        // Rejection sampling; n is within 2^-127 of 2^256 so this almost never loops.
        loop {
            let bytes: [u8; 32] = rng.random();
            if let Ok(scalar) = ScalarField::from_bytes_be(&bytes) {
                if !scalar.is_zero() {
                    return scalar;
                }
            }
        }
    }
}

// Arithmetic operations
impl Add for ScalarField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ScalarField {
            limbs: add_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl AddAssign for ScalarField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ScalarField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        ScalarField {
            limbs: sub_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl SubAssign for ScalarField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for ScalarField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ScalarField {
            limbs: neg_mod(self.limbs, MODULUS),
        }
    }
}

impl Mul for ScalarField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        ScalarField {
            limbs: montgomery_mul(self.limbs, rhs.limbs, MODULUS, MU),
        }
    }
}

impl MulAssign for ScalarField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Display and Debug
impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField({})", self)
    }
}

impl Hash for ScalarField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}
