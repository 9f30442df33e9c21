use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::{BaseField, ScalarField};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for BaseField {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let bytes: [u8; 32] = rng.random();
            if let Ok(value) = BaseField::from_bytes_be(&bytes) {
                return value;
            }
        }
    }
}

/// Samples uniformly from [1, n).
impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_sampling_is_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(ScalarField::random(&mut a), ScalarField::random(&mut b));
        assert_eq!(BaseField::random(&mut a), BaseField::random(&mut b));
    }

    #[test]
    fn test_random_scalar_is_non_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            assert!(!ScalarField::random(&mut rng).is_zero());
        }
    }
}
