//! Base field of secp256k1. p = 2^256 - 2^32 - 977
//!
//! Elements are kept in Montgomery form as [u64; 4] in little-endian order.
//! Every value that leaves this module through the public API is fully
//! reduced mod p.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::arith::{
    add_mod, is_canonical, is_zero, limbs_from_be_bytes, limbs_to_be_bytes, montgomery_mul,
    neg_mod, sub_mod,
};
use crate::error::CurveError;

/// Element of the secp256k1 base field.
#[derive(Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseField {
    /// Montgomery form: value * R mod p, where R = 2^256
    limbs: [u64; 4],
}

// Field modulus: p = 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
pub(crate) const MODULUS: [u64; 4] = [
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// R = 2^256 mod p
const R: [u64; 4] = [0x00000001000003d1, 0, 0, 0];

// R^2 = 2^512 mod p
const R2: [u64; 4] = [0x000007a2000e90a1, 0x0000000000000001, 0, 0];

// -p^{-1} mod 2^64
const MU: u64 = 0xd838091dd2253531;

// p - 2, exponent for Fermat inversion
const P_MINUS_2: [u64; 4] = [
    0xfffffffefffffc2d,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// (p + 1) / 4, exponent for square roots since p = 3 mod 4
const SQRT_EXP: [u64; 4] = [
    0xffffffffbfffff0c,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
];

impl BaseField {
    /// Zero element
    pub const ZERO: Self = BaseField {
        limbs: [0, 0, 0, 0],
    };

    /// One element (R mod p)
    pub const ONE: Self = BaseField { limbs: R };

    /// Curve coefficient b = 7, in Montgomery form.
    pub const SEVEN: Self = BaseField {
        limbs: [0x0000000700001ab7, 0, 0, 0],
    };

    /// Build an element directly from Montgomery limbs.
    pub(crate) const fn from_montgomery(limbs: [u64; 4]) -> Self {
        BaseField { limbs }
    }

    /// Create a field element from a u64 value.
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    /// Convert canonical limbs (already < p) to Montgomery form.
    #[inline]
    pub(crate) fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        BaseField {
            limbs: montgomery_mul(limbs, R2, MODULUS, MU),
        }
    }

    /// Canonical (non-Montgomery) limbs of this element.
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        montgomery_mul(self.limbs, [1, 0, 0, 0], MODULUS, MU)
    }

    /// Decode a 32-byte big-endian integer, rejecting values >= p.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        let limbs = limbs_from_be_bytes(bytes);
        if !is_canonical(limbs, MODULUS) {
            return Err(CurveError::InvalidFieldElement);
        }
        Ok(Self::from_canonical_limbs(limbs))
    }

    /// 32-byte big-endian encoding of the canonical value.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        limbs_to_be_bytes(self.to_canonical_limbs())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        is_zero(self.limbs)
    }

    /// Parity of the canonical value.
    #[inline]
    pub fn is_even(&self) -> bool {
        self.to_canonical_limbs()[0] & 1 == 0
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Variable-time exponentiation by a canonical exponent.
    pub fn pow_vartime(&self, exp: [u64; 4]) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        for &limb in exp.iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                remaining >>= 1;
            }
        }

        result
    }

    /// Multiplicative inverse via Fermat's little theorem: a^{-1} = a^{p-2}.
    pub fn inverse(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow_vartime(P_MINUS_2))
    }

    /// Square root, if one exists.
    ///
    /// Since p = 3 mod 4 the candidate is a^((p+1)/4); it is a root exactly
    /// when a is a quadratic residue. The returned root has no fixed parity.
    pub fn sqrt(&self) -> Option<Self> {
        let candidate = self.pow_vartime(SQRT_EXP);
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }

    pub fn as_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes_be())
    }

    pub fn modulus() -> BigUint {
        BigUint::from_bytes_be(&limbs_to_be_bytes(MODULUS))
    }
}

impl Add for BaseField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        BaseField {
            limbs: add_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl AddAssign for BaseField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for BaseField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        BaseField {
            limbs: sub_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl SubAssign for BaseField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for BaseField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        BaseField {
            limbs: neg_mod(self.limbs, MODULUS),
        }
    }
}

impl Mul for BaseField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        BaseField {
            limbs: montgomery_mul(self.limbs, rhs.limbs, MODULUS, MU),
        }
    }
}

impl MulAssign for BaseField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Display for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BaseField({})", self)
    }
}

impl Hash for BaseField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p() -> BigUint {
        BaseField::modulus()
    }

    fn from_big(v: &BigUint) -> BaseField {
        let bytes = v.to_bytes_be();
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(&bytes);
        BaseField::from_bytes_be(&buf).unwrap()
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(BaseField::ZERO + BaseField::ZERO, BaseField::ZERO);
        assert_eq!(BaseField::ONE * BaseField::ONE, BaseField::ONE);
        assert_eq!(BaseField::ZERO * BaseField::ONE, BaseField::ZERO);
        assert_eq!(BaseField::ONE, BaseField::from_canonical_u64(1));
        assert_eq!(BaseField::SEVEN, BaseField::from_canonical_u64(7));
    }

    #[test]
    fn test_small_arithmetic() {
        let a = BaseField::from_canonical_u64(6);
        let b = BaseField::from_canonical_u64(7);
        assert_eq!(a * b, BaseField::from_canonical_u64(42));
        assert_eq!(a + b, BaseField::from_canonical_u64(13));
        assert_eq!(b - a, BaseField::ONE);
        assert_eq!(a - b, -BaseField::ONE);
    }

    #[test]
    fn test_modulus_constant() {
        let expected = (BigUint::from(1u8) << 256usize)
            - (BigUint::from(1u8) << 32usize)
            - BigUint::from(977u32);
        assert_eq!(p(), expected);
    }

    #[test]
    fn test_rejects_non_canonical_bytes() {
        let p_bytes = limbs_to_be_bytes(MODULUS);
        assert_eq!(
            BaseField::from_bytes_be(&p_bytes),
            Err(CurveError::InvalidFieldElement)
        );
        assert_eq!(
            BaseField::from_bytes_be(&[0xff; 32]),
            Err(CurveError::InvalidFieldElement)
        );

        let mut p_minus_one = p_bytes;
        p_minus_one[31] -= 1;
        let v = BaseField::from_bytes_be(&p_minus_one).unwrap();
        assert_eq!(v, -BaseField::ONE);
        assert_eq!(v.to_bytes_be(), p_minus_one);
    }

    #[test]
    fn test_inverse_of_zero() {
        assert_eq!(BaseField::ZERO.inverse(), Err(CurveError::DivisionByZero));
    }

    #[test]
    fn test_inverse() {
        let a = BaseField::from_canonical_u64(5);
        let a_inv = a.inverse().unwrap();
        assert_eq!(a * a_inv, BaseField::ONE);
    }

    #[test]
    fn test_sqrt() {
        let four = BaseField::from_canonical_u64(4);
        let root = four.sqrt().unwrap();
        assert_eq!(root.square(), four);

        // -1 is a non-residue because p = 3 mod 4
        assert!((-BaseField::ONE).sqrt().is_none());
    }

    #[test]
    fn test_parity() {
        assert!(BaseField::ZERO.is_even());
        assert!(!BaseField::ONE.is_even());
        // p - 1 is even
        assert!((-BaseField::ONE).is_even());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_matches_biguint(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let a_big = BigUint::from_bytes_be(&a) % p();
            let b_big = BigUint::from_bytes_be(&b) % p();
            let fa = from_big(&a_big);
            let fb = from_big(&b_big);

            prop_assert_eq!((fa + fb).as_biguint(), (&a_big + &b_big) % p());
            prop_assert_eq!((fa * fb).as_biguint(), (&a_big * &b_big) % p());
            prop_assert_eq!((fa - fb).as_biguint(), (&a_big + p() - &b_big) % p());
            prop_assert_eq!((-fa).as_biguint(), (p() - &a_big) % p());
        }

        #[test]
        fn prop_inverse(a in any::<[u8; 32]>()) {
            let a_big = BigUint::from_bytes_be(&a) % p();
            let fa = from_big(&a_big);
            prop_assume!(!fa.is_zero());
            prop_assert_eq!(fa * fa.inverse().unwrap(), BaseField::ONE);
        }

        #[test]
        fn prop_sqrt_of_square(a in any::<[u8; 32]>()) {
            let fa = from_big(&(BigUint::from_bytes_be(&a) % p()));
            let sq = fa.square();
            let root = sq.sqrt().unwrap();
            prop_assert!(root == fa || root == -fa);
        }
    }
}
