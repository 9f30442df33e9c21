//! secp256k1 curve arithmetic.
//!
//! This crate provides the base field (mod p), the scalar field (mod n),
//! affine and Jacobian curve points, and helpers for random sampling. All
//! values are immutable `Copy` types; every operation returns a new value.
//!
//! Decoding from bytes is the only fallible entry point: coordinates and
//! scalars that are not below their modulus are rejected with
//! [`CurveError::InvalidFieldElement`], and x-coordinates without a curve
//! point with [`CurveError::PointNotOnCurve`].

mod affine;
mod arith;
mod basefield;
mod error;
mod generator_table;
mod group;
mod msm;
mod projective;
mod random;
mod scalarfield;

pub use affine::Affine;
pub use basefield::BaseField;
pub use error::CurveError;
pub use generator_table::mul_generator_affine;
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul_basepoint_affine;
pub use projective::Projective;
pub use random::RandomField;
pub use scalarfield::ScalarField;
