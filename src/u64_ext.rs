//! Single-word primitives the multi-word arithmetic is built from.

use crate::Uint128;

/// Adds two words and an incoming carry, returning the sum word and the
/// outgoing carry.
#[inline(always)]
pub fn add_with_carry(x: u64, y: u64, carry: bool) -> (u64, bool) {
    let (s, c1) = x.overflowing_add(y);
    let (s, c2) = s.overflowing_add(carry as u64);
    (s, c1 | c2)
}

/// Subtracts `y` and an incoming borrow from `x`, returning the difference
/// word and the outgoing borrow.
#[inline(always)]
pub fn sub_with_carry(x: u64, y: u64, borrow: bool) -> (u64, bool) {
    let (d, b1) = x.overflowing_sub(y);
    let (d, b2) = d.overflowing_sub(borrow as u64);
    (d, b1 | b2)
}

/// Full 64x64 -> 128 multiplication.
#[inline(always)]
pub fn umul(x: u64, y: u64) -> Uint128 {
    #[cfg(not(feature = "portable"))]
    {
        Uint128::from(x as u128 * y as u128)
    }

    #[cfg(feature = "portable")]
    {
        umul_portable(x, y)
    }
}

/// 64x64 -> 128 multiplication out of four 32x32 -> 64 partial products,
/// for targets without a double-width multiply.
#[inline]
pub fn umul_portable(x: u64, y: u64) -> Uint128 {
    let xl = x & 0xffff_ffff;
    let xh = x >> 32;
    let yl = y & 0xffff_ffff;
    let yh = y >> 32;

    let t0 = xl * yl;
    let t1 = xh * yl;
    let t2 = xl * yh;
    let t3 = xh * yh;

    // None of these sums can overflow: each partial product is at most
    // (2^32 - 1)^2 and the added terms are below 2^32.
    let u1 = t1 + (t0 >> 32);
    let u2 = t2 + (u1 & 0xffff_ffff);

    let lo = (u2 << 32) | (t0 & 0xffff_ffff);
    let hi = t3 + (u2 >> 32) + (u1 >> 32);

    Uint128::new(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn adds_with_carry() {
        assert_eq!(add_with_carry(1, 2, false), (3, false));
        assert_eq!(add_with_carry(u64::MAX, 0, true), (0, true));
        assert_eq!(add_with_carry(u64::MAX, u64::MAX, true), (u64::MAX, true));
    }

    #[test]
    fn subs_with_carry() {
        assert_eq!(sub_with_carry(3, 2, false), (1, false));
        assert_eq!(sub_with_carry(0, 0, true), (u64::MAX, true));
        assert_eq!(sub_with_carry(0, u64::MAX, true), (0, true));
    }

    #[test]
    fn multiplies_extremes() {
        let p = umul_portable(u64::MAX, u64::MAX);
        assert_eq!(p, Uint128::new(1, u64::MAX - 1));

        let p = umul_portable(1 << 63, 2);
        assert_eq!(p, Uint128::new(0, 1));
    }

    #[quickcheck]
    fn qc_portable_matches_native(x: u64, y: u64) -> bool {
        u128::from(umul_portable(x, y)) == x as u128 * y as u128
    }

    #[quickcheck]
    fn qc_umul_matches_native(x: u64, y: u64) -> bool {
        u128::from(umul(x, y)) == x as u128 * y as u128
    }

    #[quickcheck]
    fn qc_add_sub_carries_match(x: u64, y: u64, c: bool) -> bool {
        let (s, carry) = add_with_carry(x, y, c);
        let wide = x as u128 + y as u128 + c as u128;

        let (d, borrow) = sub_with_carry(s, y, c);

        s == wide as u64 && carry == (wide >> 64 != 0) && d == x && borrow == carry
    }
}
