use crate::group::ScalarBits;
use crate::projective::Projective;
use crate::{Affine, ScalarField};

/// Compute a * G + b * P with Shamir's trick: one shared doubling chain and
/// a four-entry table {O, G, P, G + P}.
pub fn double_scalar_mul_basepoint_affine(
    a: &ScalarField,
    b: &ScalarField,
    point: &Affine,
) -> Affine {
    let g = Affine::generator();
    let table = [Affine::INFINITY, g, *point, g + *point];

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();
    let mut result = Projective::INFINITY;

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).rev() {
            result = result.double();

            let index = ((((b_limb >> shift) & 1) << 1) | ((a_limb >> shift) & 1)) as usize;
            if index != 0 {
                result = result.add_affine(&table[index]);
            }
        }
    }

    result.to_affine()
}
