//! 256-bit limb arithmetic shared by the base and scalar fields.
//!
//! Values are `[u64; 4]` in little-endian limb order. Both secp256k1 moduli
//! sit just below 2^256, so every routine here keeps track of the carry out
//! of the top limb instead of assuming headroom.

/// Carrying addition
#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Borrowing subtraction
#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Returns `a - b` and whether the subtraction borrowed.
#[inline]
pub(crate) const fn sub_with_borrow(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Returns true when `a < m`.
#[inline]
pub(crate) const fn is_canonical(a: [u64; 4], m: [u64; 4]) -> bool {
    sub_with_borrow(a, m).1
}

#[inline]
pub(crate) const fn is_zero(a: [u64; 4]) -> bool {
    a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0
}

/// (a + b) mod m for a, b < m
#[inline]
pub(crate) const fn add_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    let sum = [r0, r1, r2, r3];

    // The true sum is carry * 2^256 + sum. Subtract m when it is >= m.
    let (reduced, borrow) = sub_with_borrow(sum, m);
    if carry || !borrow {
        reduced
    } else {
        sum
    }
}

/// (a - b) mod m for a, b < m
#[inline]
pub(crate) const fn sub_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (r, borrow) = sub_with_borrow(a, b);
    if borrow {
        let (r0, carry) = r[0].overflowing_add(m[0]);
        let (r1, carry) = carrying_add(r[1], m[1], carry);
        let (r2, carry) = carrying_add(r[2], m[2], carry);
        let (r3, _) = carrying_add(r[3], m[3], carry);
        [r0, r1, r2, r3]
    } else {
        r
    }
}

/// (-a) mod m for a < m
#[inline]
pub(crate) const fn neg_mod(a: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    if is_zero(a) {
        return [0, 0, 0, 0];
    }
    sub_with_borrow(m, a).0
}

/// Montgomery multiplication: (a * b * 2^-256) mod m.
///
/// `mu` is `-m^-1 mod 2^64`. Inputs must be below `m`.
#[inline]
pub(crate) fn montgomery_mul(a: [u64; 4], b: [u64; 4], m: [u64; 4], mu: u64) -> [u64; 4] {
    // Nine words: the reduced value can reach 2m, which needs 257 bits.
    let mut t = [0u64; 9];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    for i in 0..4 {
        let k = t[i].wrapping_mul(mu);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (m[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        let mut j = i + 4;
        while carry != 0 && j < 9 {
            let sum = (t[j] as u128) + carry;
            t[j] = sum as u64;
            carry = sum >> 64;
            j += 1;
        }
    }

    let result = [t[4], t[5], t[6], t[7]];
    let (reduced, borrow) = sub_with_borrow(result, m);
    if t[8] != 0 || !borrow {
        reduced
    } else {
        result
    }
}

/// Decode 32 big-endian bytes into little-endian limbs.
#[inline]
pub(crate) fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = 32 - 8 * (i + 1);
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

/// Encode little-endian limbs as 32 big-endian bytes.
#[inline]
pub(crate) fn limbs_to_be_bytes(limbs: [u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let start = 32 - 8 * (i + 1);
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}
