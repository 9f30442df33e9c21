//! BIP-340 verification.

use curve::{Affine, BaseField, ScalarField};
use tracing::debug;

use crate::hash::MessageHash;
use crate::keys::PublicKey;
use crate::signatures::{Signature, hash_challenge};

/// Verifies a BIP-340 signature over a 32-byte message hash.
///
/// Checks, in order:
/// 1. `r < p` and `s < n`
/// 2. the public key lifts to a point P with even y (a supplied y must be on
///    the curve with x)
/// 3. `e = H_challenge(r || x(P) || m) mod n`
/// 4. `R = s * G - e * P`
/// 5. R is not the identity, has even y, and `x(R) == r`
///
/// Every failure yields `false`. The result depends only on the inputs.
pub fn verify(msg: &MessageHash, sig: &Signature, pubkey: &PublicKey) -> bool {
    let Ok(r) = BaseField::from_bytes_be(&sig.r) else {
        debug!("schnorr: r is not below the field modulus");
        return false;
    };
    let Ok(s) = ScalarField::from_bytes_be(&sig.s) else {
        debug!("schnorr: s is not below the group order");
        return false;
    };

    let point = match pubkey.to_point() {
        Ok(point) => point,
        Err(err) => {
            debug!(error = %err, "schnorr: public key rejected");
            return false;
        }
    };

    let e = hash_challenge(&sig.r, &point.x_bytes(), msg);
    let nonce_point = Affine::double_scalar_mul_basepoint(&s, &-e, &point);

    if nonce_point.is_infinity() {
        debug!("schnorr: R is the point at infinity");
        return false;
    }
    if !nonce_point.has_even_y() {
        debug!("schnorr: R has odd y");
        return false;
    }
    if nonce_point.x != r {
        debug!("schnorr: x(R) does not match r");
        return false;
    }

    true
}

/// [`verify`] over raw byte blobs: a 32-byte hash, a 64-byte signature and a
/// 32- or 64-byte public key. Any other size yields `false`.
pub fn verify_raw(msg: &[u8], sig: &[u8], pubkey: &[u8]) -> bool {
    let (Ok(msg), Ok(sig), Ok(pubkey)) = (
        MessageHash::from_slice(msg),
        Signature::from_slice(sig),
        PublicKey::from_slice(pubkey),
    ) else {
        debug!("schnorr: malformed input sizes");
        return false;
    };
    verify(&msg, &sig, &pubkey)
}
