//! Signing and public keys for BIP-340 Schnorr signatures.

use curve::{Affine, CurveError, RandomField, ScalarField};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{AUX_TAG, NONCE_TAG, PK_SIZE, SK_SIZE, XONLY_PK_SIZE};
use crate::errors::SchnorrError;
use crate::hash::{MessageHash, tagged_hash};
use crate::signatures::{Signature, hash_challenge};

/// A secret signing key for creating Schnorr signatures.
///
/// The signing key is a scalar in [1, n). Signing follows BIP-340: when the
/// public point has odd y the key is negated, so signatures always verify
/// against the even-y lift of the x-coordinate.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let signing_key = SigningKey::random(&mut rng);
/// let public_key = signing_key.public_key();
/// assert!(public_key.to_uncompressed().is_some());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKey {
    scalar: ScalarField,
}

/// A public key as supplied by a caller.
///
/// Either the 32-byte x-only form or the 64-byte (x || y) form. Verification
/// only ever uses the x-coordinate lifted to even y; a supplied y is checked
/// to form a curve point with x and otherwise ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    x: [u8; 32],
    y: Option<[u8; 32]>,
}

impl SigningKey {
    /// Generates a random signing key using the provided random number generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            scalar: ScalarField::random(rng),
        }
    }

    /// Decode a 32-byte big-endian secret key. Zero and values >= n are rejected.
    pub fn from_bytes(bytes: &[u8; SK_SIZE]) -> Result<Self, SchnorrError> {
        let scalar =
            ScalarField::from_bytes_be(bytes).map_err(|_| SchnorrError::InvalidSecretKey)?;
        if scalar.is_zero() {
            return Err(SchnorrError::InvalidSecretKey);
        }
        Ok(Self { scalar })
    }

    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        self.scalar.to_bytes_be()
    }

    /// The public point `d * G`, with whatever y parity it has.
    pub fn public_point(&self) -> Affine {
        Affine::mul_generator(&self.scalar)
    }

    /// The 64-byte (x || y) public key, the form callers hand to the ledger.
    pub fn public_key(&self) -> PublicKey {
        let point = self.public_point();
        PublicKey {
            x: point.x_bytes(),
            y: Some(point.y.to_bytes_be()),
        }
    }

    /// Signs a 32-byte message hash per BIP-340.
    ///
    /// 1. `d = sk` if `sk * G` has even y, else `n - sk`
    /// 2. `t = d XOR H_aux(aux_rand)`
    /// 3. `k = H_nonce(t || x(P) || m) mod n`, negated if `k * G` has odd y
    /// 4. `e = H_challenge(x(R) || x(P) || m) mod n`
    /// 5. signature is `(x(R), k + e * d mod n)`
    ///
    /// Fails with [`SchnorrError::InvalidNonce`] only if the derived nonce is
    /// zero, which happens with negligible probability.
    pub fn sign(&self, msg: &MessageHash, aux_rand: &[u8; 32]) -> Result<Signature, SchnorrError> {
        let point = self.public_point();
        let d = if point.has_even_y() {
            self.scalar
        } else {
            -self.scalar
        };
        let px = point.x_bytes();

        let mask = tagged_hash(AUX_TAG, &[aux_rand.as_slice()]);
        let mut t = d.to_bytes_be();
        for (byte, m) in t.iter_mut().zip(mask.iter()) {
            *byte ^= m;
        }

        let nonce_hash = tagged_hash(
            NONCE_TAG,
            &[t.as_slice(), px.as_slice(), msg.as_bytes().as_slice()],
        );
        let k0 = ScalarField::from_bytes_be_reduced(&nonce_hash);
        if k0.is_zero() {
            return Err(SchnorrError::InvalidNonce);
        }

        let nonce_point = Affine::mul_generator(&k0);
        let k = if nonce_point.has_even_y() { k0 } else { -k0 };
        let r = nonce_point.x_bytes();

        let e = hash_challenge(&r, &px, msg);
        let s = k + e * d;

        Ok(Signature {
            r,
            s: s.to_bytes_be(),
        })
    }

    /// Signs with fresh auxiliary randomness drawn from `rng`.
    pub fn sign_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        msg: &MessageHash,
    ) -> Result<Signature, SchnorrError> {
        let aux: [u8; 32] = rng.random();
        self.sign(msg, &aux)
    }
}

impl PublicKey {
    /// BIP-340 x-only key.
    pub fn from_x_only(x: [u8; XONLY_PK_SIZE]) -> Self {
        Self { x, y: None }
    }

    /// Uncompressed key without the 0x04 prefix.
    pub fn from_uncompressed(bytes: &[u8; PK_SIZE]) -> Self {
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        x.copy_from_slice(&bytes[..32]);
        y.copy_from_slice(&bytes[32..]);
        Self { x, y: Some(y) }
    }

    /// Decode a 32-byte x-only or 64-byte (x || y) key blob.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if let Ok(x) = <[u8; XONLY_PK_SIZE]>::try_from(bytes) {
            return Ok(Self::from_x_only(x));
        }
        if let Ok(xy) = <&[u8; PK_SIZE]>::try_from(bytes) {
            return Ok(Self::from_uncompressed(xy));
        }
        Err(SchnorrError::InvalidLength {
            what: "public key",
            expected: PK_SIZE,
            actual: bytes.len(),
        })
    }

    pub fn x_only(&self) -> [u8; XONLY_PK_SIZE] {
        self.x
    }

    /// The 64-byte form, if the key was supplied with a y-coordinate.
    pub fn to_uncompressed(&self) -> Option<[u8; PK_SIZE]> {
        let y = self.y?;
        let mut out = [0u8; PK_SIZE];
        out[..32].copy_from_slice(&self.x);
        out[32..].copy_from_slice(&y);
        Some(out)
    }

    /// The point used for verification: x lifted to even y.
    ///
    /// A supplied y must lie on the curve together with x; its parity is
    /// discarded.
    pub fn to_point(&self) -> Result<Affine, CurveError> {
        if let Some(xy) = self.to_uncompressed() {
            Affine::from_uncompressed(&xy)?;
        }
        Affine::lift_x_bytes(&self.x, true)
    }

    /// Verifies a signature on a message hash using this public key.
    ///
    /// Returns `false` for every kind of failure; see [`crate::verify()`].
    pub fn verify(&self, msg: &MessageHash, sig: &Signature) -> bool {
        crate::verifier::verify(msg, sig, self)
    }
}

impl From<&SigningKey> for PublicKey {
    /// Converts a reference to a signing key into its 64-byte public key.
    fn from(sk: &SigningKey) -> Self {
        sk.public_key()
    }
}
