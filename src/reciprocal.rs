//! Division by invariant integers, following "Improved division by
//! invariant integers" (Möller, Granlund). A reciprocal is computed once
//! per normalized divisor and turns every word division into a widening
//! multiply plus at most two corrections.

use std::num::Wrapping as W;

use crate::u64_ext::umul;
use crate::{DivResult, Uint128};

const fn recip_table() -> [u16; 256] {
    let mut table = [0; 256];
    let mut i = 0;

    while i < 256 {
        // (2**19 - 3*2**8) / d9
        table[i] = (0x7fd00 / (0x100 | i)) as u16;
        i += 1;
    }

    table
}

const RECIP_TABLE: [u16; 256] = recip_table();

/// Returns `floor((2^128 - 1) / d) - 2^64` for a normalized `d` (top bit
/// set).
#[inline]
pub fn reciprocal_2by1(d: u64) -> u64 {
    debug_assert!(d >> 63 != 0, "divisor is not normalized");

    // Indexed by the 9 top bits of d, the first of which is always set.
    let v0 = W(RECIP_TABLE[(d >> 55) as usize - 256] as u64);
    let d40 = W((d >> 24) + 1);
    let d0 = W(d & 1);
    let d63 = W(d >> 1) + d0;

    // 11 -> 21 -> 34 bits of precision.
    let v1 = (v0 << 11) - (d40 * v0 * v0 >> 40) - W(1);
    let v2 = (v1 << 13) + (v1 * (W(1_u64 << 60) - v1 * d40) >> 47);

    // multiplication by d0 is replaced by bitwise and because
    // d0 is a single bit (value: 0 or 1).
    let e = ((v2 >> 1) & (!d0 + W(1))) - v2 * d63;
    let v3 = W(umul(v2.0, e.0).hi >> 1) + (v2 << 31);

    let t = umul(v3.0, d) + Uint128::from(d);
    let v4 = v3 - W(t.hi) - W(d);

    v4.0
}

/// Returns `floor((2^192 - 1) / d) - 2^64` for a normalized two-word `d`.
pub fn reciprocal_3by2(d: Uint128) -> u64 {
    let mut v = reciprocal_2by1(d.hi);

    let mut p = d.hi.wrapping_mul(v).wrapping_add(d.lo);
    if p < d.lo {
        v = v.wrapping_sub(1);
        if p >= d.hi {
            v = v.wrapping_sub(1);
            p = p.wrapping_sub(d.hi);
        }
        p = p.wrapping_sub(d.hi);
    }

    let t = umul(v, d.lo);

    p = p.wrapping_add(t.hi);
    if p < t.hi {
        v = v.wrapping_sub(1);
        if p >= d.hi && (p > d.hi || t.lo >= d.lo) {
            v = v.wrapping_sub(1);
        }
    }

    v
}

/// Divides `u` by the normalized word `d` given its reciprocal `v`.
/// Requires `u.hi < d` so the quotient fits a word.
#[inline(always)]
pub fn udivrem_2by1(u: Uint128, d: u64, v: u64) -> DivResult<u64> {
    debug_assert!(d >> 63 != 0, "divisor is not normalized");
    debug_assert!(u.hi < d, "quotient overflows a word");

    let q = umul(v, u.hi) + u;
    let mut q1 = W(q.hi) + W(1);

    let d = W(d);
    let mut r = W(u.lo) - q1 * d;

    let mask0 = if r > W(q.lo) { W(!0) } else { W(0) };
    q1 += mask0;
    r += d & mask0;

    let mask1 = if r >= d { W(!0) } else { W(0) };
    q1 -= mask1;
    r -= d & mask1;

    DivResult {
        quotient: q1.0,
        remainder: r.0,
    }
}

/// Divides the three words `(u2, u1, u0)` by the normalized two-word `d`
/// given `v = reciprocal_3by2(d)`. Requires `(u2, u1) < d`.
#[inline(always)]
pub fn udivrem_3by2(
    u2: u64,
    u1: u64,
    u0: u64,
    d: Uint128,
    v: u64,
) -> DivResult<u64, Uint128> {
    debug_assert!(d.hi >> 63 != 0, "divisor is not normalized");
    debug_assert!(Uint128::new(u1, u2) < d, "quotient overflows a word");

    let q = umul(v, u2) + Uint128::new(u1, u2);

    let r1 = u1.wrapping_sub(q.hi.wrapping_mul(d.hi));
    let t = umul(d.lo, q.hi);

    let mut r = Uint128::new(u0, r1) - t - d;
    let mut q1 = q.hi.wrapping_add(1);

    if r.hi >= q.lo {
        q1 = q1.wrapping_sub(1);
        r = r + d;
    }

    if r >= d {
        q1 = q1.wrapping_add(1);
        r = r - d;
    }

    DivResult {
        quotient: q1,
        remainder: r,
    }
}
