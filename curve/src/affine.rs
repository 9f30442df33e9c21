// secp256k1 : y^2 = x^3 + 7 over GF(p), p = 2^256 - 2^32 - 977
// Generator G = (0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798,
//                0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8)
// Group order n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
// Cofactor: 1

use crate::basefield::BaseField;
use crate::error::CurveError;
use crate::projective::Projective;
use crate::{double_scalar_mul_basepoint_affine, mul_generator_affine, Group, ScalarBits, ScalarField};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affine {
    /// The x-coordinate of the point
    pub x: BaseField,
    /// The y-coordinate of the point
    pub y: BaseField,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: BaseField::ZERO,
        y: BaseField::ZERO,
        is_infinity: true,
    };

    // Generator coordinates in Montgomery form.
    const GENERATOR: Self = Affine {
        x: BaseField::from_montgomery([
            0xd7362e5a487e2097,
            0x231e295329bc66db,
            0x979f48c033fd129c,
            0x9981e643e9089f48,
        ]),
        y: BaseField::from_montgomery([
            0xb15ea6d2d3dbabe2,
            0x8dfc5d5d1f1dc64d,
            0x70b6b59aac19c136,
            0xcf3f851fd4a582d6,
        ]),
        is_infinity: false,
    };

    /// Create a new affine point without checking the curve equation.
    pub(crate) fn new(x: BaseField, y: BaseField) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    /// Create a point from coordinates, checking the curve equation.
    pub fn from_coordinates(x: BaseField, y: BaseField) -> Result<Self, CurveError> {
        let point = Self::new(x, y);
        if !point.is_on_curve() {
            return Err(CurveError::PointNotOnCurve);
        }
        Ok(point)
    }

    /// Decode a 64-byte (x || y) big-endian coordinate pair.
    ///
    /// Coordinates >= p fail with `InvalidFieldElement`; pairs off the curve
    /// fail with `PointNotOnCurve`.
    pub fn from_uncompressed(bytes: &[u8; 64]) -> Result<Self, CurveError> {
        let mut x_bytes = [0u8; 32];
        let mut y_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&bytes[..32]);
        y_bytes.copy_from_slice(&bytes[32..]);

        let x = BaseField::from_bytes_be(&x_bytes)?;
        let y = BaseField::from_bytes_be(&y_bytes)?;
        Self::from_coordinates(x, y)
    }

    /// 64-byte (x || y) big-endian encoding. The identity has no encoding.
    pub fn to_uncompressed(&self) -> Option<[u8; 64]> {
        if self.is_infinity {
            return None;
        }
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.x.to_bytes_be());
        out[32..].copy_from_slice(&self.y.to_bytes_be());
        Some(out)
    }

    /// Big-endian bytes of the x-coordinate.
    pub fn x_bytes(&self) -> [u8; 32] {
        self.x.to_bytes_be()
    }

    /// Recover the point with the given x-coordinate and y parity.
    ///
    /// Computes y = sqrt(x^3 + 7) and picks the root matching `want_even_y`.
    pub fn lift_x(x: &BaseField, want_even_y: bool) -> Result<Self, CurveError> {
        let rhs = x.square() * *x + BaseField::SEVEN;
        let root = rhs.sqrt().ok_or(CurveError::PointNotOnCurve)?;
        let y = if root.is_even() == want_even_y {
            root
        } else {
            -root
        };
        Ok(Self::new(*x, y))
    }

    /// [`Affine::lift_x`] from a 32-byte big-endian x-coordinate.
    pub fn lift_x_bytes(x: &[u8; 32], want_even_y: bool) -> Result<Self, CurveError> {
        let x = BaseField::from_bytes_be(x)?;
        Self::lift_x(&x, want_even_y)
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Whether the y-coordinate is even. False for the identity.
    #[inline]
    pub fn has_even_y(&self) -> bool {
        !self.is_infinity && self.y.is_even()
    }

    /// Check if a point is on the curve: y^2 = x^3 + 7.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        let y2 = self.y.square();
        let x3 = self.x.square() * self.x;
        y2 == x3 + BaseField::SEVEN
    }

    /// The standard secp256k1 generator.
    pub fn generator() -> Self {
        Self::GENERATOR
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity {
            return *self;
        }

        // If y = 0, then 2P = O
        if self.y.is_zero() {
            return Self::INFINITY;
        }

        // λ = 3x^2 / 2y
        let x2 = self.x.square();
        let numerator = x2.double() + x2;
        let Ok(inv) = self.y.double().inverse() else {
            return Self::INFINITY;
        };
        let lambda = numerator * inv;

        // x_r = λ^2 - 2x
        let x_r = lambda.square() - self.x.double();

        // y_r = λ(x - x_r) - y
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return *self;
        }
        Affine::new(self.x, -self.y)
    }

    /// Multiply the fixed generator using a precomputed table.
    pub fn mul_generator(scalar: &ScalarField) -> Self {
        mul_generator_affine(scalar)
    }

    /// Compute a * G + b * P, where G is the fixed generator.
    pub fn double_scalar_mul_basepoint(a: &ScalarField, b: &ScalarField, point: &Self) -> Self {
        double_scalar_mul_basepoint_affine(a, b, point)
    }
}

impl Group for Affine {
    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Affine::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    /// Runs in Jacobian coordinates and normalizes once at the end.
    fn scalar_mul<S: ScalarBits>(&self, scalar: &S) -> Self {
        Projective::from_affine(self).scalar_mul(scalar).to_affine()
    }

    fn scalar_mul_windowed<S: ScalarBits>(&self, scalar: &S) -> Self {
        Projective::from_affine(self)
            .scalar_mul_windowed(scalar)
            .to_affine()
    }
}

// Implement addition for affine points
impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // Handle infinity cases
        if self.is_infinity {
            return other;
        }
        if other.is_infinity {
            return self;
        }

        // Check if points are the same
        if self.x == other.x {
            if self.y == other.y {
                // Point doubling
                return self.double();
            } else {
                // Points are inverses, return infinity
                return Self::INFINITY;
            }
        }

        // Regular point addition
        // λ = (y2 - y1) / (x2 - x1)
        let numerator = other.y - self.y;
        let Ok(inv) = (other.x - self.x).inverse() else {
            return Self::INFINITY;
        };
        let lambda = numerator * inv;

        // x_r = λ^2 - x1 - x2
        let x_r = lambda.square() - self.x - other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Affine> for ScalarField {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hex32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = core::str::from_utf8(chunk).unwrap();
            out[i] = u8::from_str_radix(pair, 16).unwrap();
        }
        out
    }

    const GX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GY: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_infinity() {
        let inf = Affine::INFINITY;
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
        assert!(!inf.has_even_y());
        assert_eq!(inf.to_uncompressed(), None);
    }

    #[test]
    fn test_generator_constants() {
        let g = Affine::generator();
        assert!(g.is_on_curve(), "Generator point is not on the curve");
        assert!(!g.is_infinity());
        assert_eq!(g.x.to_bytes_be(), hex32(GX));
        assert_eq!(g.y.to_bytes_be(), hex32(GY));
        assert!(g.has_even_y());
    }

    #[test]
    fn test_known_multiples() {
        let g = Affine::generator();
        assert_eq!(
            g.mul_u64(2).x_bytes(),
            hex32("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5")
        );
        assert_eq!(
            g.mul_u64(3).x_bytes(),
            hex32("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9")
        );
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Affine::generator();
        let inf = Affine::INFINITY;

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
    }

    #[test]
    fn test_point_doubling() {
        let g = Affine::generator();
        let g2 = g.double();

        assert!(g2.is_on_curve(), "Doubled point is not on the curve");
        assert_eq!(g + g, g2);
        assert_eq!(Affine::INFINITY.double(), Affine::INFINITY);
    }

    #[test]
    fn test_point_negation() {
        let g = Affine::generator();
        let neg_g = g.negate();

        assert!(neg_g.is_on_curve());
        assert_eq!(g + neg_g, Affine::INFINITY);
        assert!(!neg_g.has_even_y());
    }

    #[test]
    fn test_scalar_multiplication() {
        let g = Affine::generator();
        let scalar = ScalarField::from_canonical_u64(5);
        let result = g.scalar_mul(&scalar);

        // 5*G = G + G + G + G + G
        let expected = g + g + g + g + g;
        assert_eq!(result, expected);
        assert!(result.is_on_curve());
    }

    #[test]
    fn test_scalar_mul_zero() {
        let g = Affine::generator();
        assert_eq!(g.scalar_mul(&ScalarField::ZERO), Affine::INFINITY);
        assert_eq!(g.scalar_mul(&0u64), Affine::INFINITY);
        assert_eq!(Affine::INFINITY.scalar_mul(&7u64), Affine::INFINITY);
    }

    #[test]
    fn test_scalar_mul_one() {
        let g = Affine::generator();
        assert_eq!(g.scalar_mul(&ScalarField::ONE), g);
    }

    #[test]
    fn test_scalar_mul_beyond_order() {
        // (n + 5) * G == 5 * G even though n + 5 is not a reduced scalar
        let g = Affine::generator();
        let n = ScalarField::order_limbs();
        let n_plus_5 = [n[0] + 5, n[1], n[2], n[3]];
        assert_eq!(g.scalar_mul(&n_plus_5), g.mul_u64(5));
        assert_eq!(g.scalar_mul(&n), Affine::INFINITY);
        assert_eq!(g.scalar_mul(&[u64::MAX; 4]), g.scalar_mul(&ScalarField::from_bytes_be_reduced(&[0xff; 32])));
    }

    #[test]
    fn test_associativity() {
        let g = Affine::generator();
        let a = ScalarField::from_canonical_u64(3);
        let b = ScalarField::from_canonical_u64(5);

        // (a + b) * G = a*G + b*G
        let left = g.scalar_mul(&(a + b));
        let right = g.scalar_mul(&a) + g.scalar_mul(&b);

        assert_eq!(left, right);
    }

    #[test]
    fn test_windowed_scalar_mul() {
        let g = Affine::generator();
        let scalar = ScalarField::from_canonical_u64(123456);

        let result1 = g.scalar_mul(&scalar);
        let result2 = g.scalar_mul_windowed(&scalar);

        assert_eq!(result1, result2);
        assert!(result1.is_on_curve());
    }

    #[test]
    fn test_mul_generator() {
        let scalar = ScalarField::from_canonical_u64(123456);
        let result = Affine::mul_generator(&scalar);
        let expected = Affine::generator().scalar_mul(&scalar);

        assert_eq!(result, expected);
        assert!(result.is_on_curve());
    }

    #[test]
    fn test_lift_x_parity() {
        let g = Affine::generator();
        let even = Affine::lift_x(&g.x, true).unwrap();
        let odd = Affine::lift_x(&g.x, false).unwrap();
        assert_eq!(even, g);
        assert_eq!(odd, -g);
        assert!(!odd.has_even_y());
    }

    #[test]
    fn test_lift_x_rejects_non_residue() {
        // x = 5: 5^3 + 7 = 132 is not a square mod p
        let x = BaseField::from_canonical_u64(5);
        assert_eq!(Affine::lift_x(&x, true), Err(CurveError::PointNotOnCurve));
    }

    #[test]
    fn test_lift_x_rejects_non_canonical() {
        assert_eq!(
            Affine::lift_x_bytes(&[0xff; 32], true),
            Err(CurveError::InvalidFieldElement)
        );
    }

    #[test]
    fn test_uncompressed_round_trip() {
        let p = Affine::generator().mul_u64(6);
        let bytes = p.to_uncompressed().unwrap();
        assert_eq!(Affine::from_uncompressed(&bytes), Ok(p));

        let mut tampered = bytes;
        tampered[63] ^= 1;
        assert_eq!(
            Affine::from_uncompressed(&tampered),
            Err(CurveError::PointNotOnCurve)
        );
    }

    #[test]
    fn test_identity() {
        let id = <Affine as Group>::identity();
        assert!(id.is_identity());
        assert_eq!(id, Affine::INFINITY);

        let g = Affine::generator();
        assert_eq!(g + id, g);
        assert_eq!(id + g, g);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_distributive(a in any::<u64>(), b in any::<u64>()) {
            let g = Affine::generator();
            let sa = ScalarField::from_canonical_u64(a);
            let sb = ScalarField::from_canonical_u64(b);
            prop_assert_eq!(g * (sa + sb), g * sa + g * sb);
            prop_assert_eq!(g * (sa * sb), (g * sa) * sb);
        }

        #[test]
        fn prop_windowed_agrees(k in any::<[u8; 32]>()) {
            let g = Affine::generator();
            let s = ScalarField::from_bytes_be_reduced(&k);
            let p = g.scalar_mul(&s);
            prop_assert!(p.is_on_curve());
            prop_assert_eq!(p, g.scalar_mul_windowed(&s));
            prop_assert_eq!(p, Affine::mul_generator(&s));
        }
    }
}
