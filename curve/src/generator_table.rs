use std::sync::OnceLock;

use crate::group::ScalarBits;
use crate::projective::Projective;
use crate::{Affine, ScalarField};

/// Affine multiples 2^i * G for i in 0..256, built on first use.
pub(crate) fn affine_table() -> &'static [Affine] {
    static TABLE: OnceLock<Vec<Affine>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut powers = Vec::with_capacity(256);
        let mut current = Projective::generator();
        for _ in 0..256 {
            powers.push(current);
            current = current.double();
        }
        Projective::batch_normalize(&powers)
    })
}

/// Multiply the generator by `scalar` using the power-of-two table.
/// Only additions are needed; no doublings happen at call time.
pub fn mul_generator_affine(scalar: &ScalarField) -> Affine {
    let table = affine_table();
    let limbs = scalar.to_u64_limbs();
    let mut acc = Projective::INFINITY;

    for (limb_idx, &limb) in limbs.iter().enumerate() {
        let mut bits = limb;
        let mut bit = 0;
        while bits != 0 {
            if bits & 1 == 1 {
                acc = acc.add_affine(&table[limb_idx * 64 + bit]);
            }
            bits >>= 1;
            bit += 1;
        }
    }

    acc.to_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    #[test]
    fn test_table_entries() {
        let table = affine_table();
        assert_eq!(table.len(), 256);
        assert_eq!(table[0], Affine::generator());
        assert_eq!(table[1], Affine::generator().double());
        assert!(table.iter().all(Affine::is_on_curve));
    }

    #[test]
    fn test_mul_generator_small() {
        for k in 0..20u64 {
            let s = ScalarField::from_canonical_u64(k);
            assert_eq!(mul_generator_affine(&s), Affine::generator().mul_u64(k));
        }
    }

    #[test]
    fn test_mul_generator_minus_one() {
        let s = -ScalarField::ONE;
        assert_eq!(mul_generator_affine(&s), -Affine::generator());
    }
}
