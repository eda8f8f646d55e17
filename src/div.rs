use std::ops::{Index, IndexMut};

use crate::reciprocal::{
    reciprocal_2by1, reciprocal_3by2, udivrem_2by1, udivrem_3by2,
};
use crate::u64_ext::{add_with_carry, sub_with_carry};
use crate::{Error, Uint128, Wide};

/// Quotient and remainder of one division:
/// `quotient * divisor + remainder == dividend` and `remainder < divisor`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DivResult<Q, R = Q> {
    pub quotient: Q,
    pub remainder: R,
}

/// `K` chunks of `N` words followed by a guard word, addressed as a single
/// little-endian word array of length `N * K + 1`.
///
/// Holds the normalized numerator during one division call; the guard word
/// receives the bits the normalizing shift pushes out of the top chunk.
struct Scratch<const N: usize, const K: usize> {
    chunks: [[u64; N]; K],
    guard: u64,
}

impl<const N: usize, const K: usize> Scratch<N, K> {
    const LEN: usize = N * K + 1;

    fn zero() -> Self {
        Scratch {
            chunks: [[0; N]; K],
            guard: 0,
        }
    }

    /// Copies `src` shifted left by `shift < 64` bits and returns it with
    /// its significant word count.
    fn normalized(src: &[[u64; N]; K], shift: u32) -> (Self, usize) {
        let comp = (64 - shift) % 64;
        let comp_mask = if shift == 0 { 0 } else { !0 };

        let mut u = Scratch {
            chunks: *src,
            guard: 0,
        };

        let mut carry = 0;
        let mut zeros = 0;

        for i in 0..Self::LEN - 1 {
            let v = u[i];
            u[i] = carry | (v << shift);
            carry = (v >> comp) & comp_mask;

            zeros = if u[i] != 0 { 0 } else { zeros + 1 };
        }

        u.guard = carry;
        zeros = if carry != 0 { 0 } else { zeros + 1 };

        (u, Self::LEN - zeros)
    }

    /// Shifts the low `len` words right by `shift` into a value.
    fn unnormalized(&self, len: usize, shift: u32) -> Wide<N> {
        let comp = (64 - shift) % 64;
        let comp_mask = if shift == 0 { 0 } else { !0 };

        let mut r = [0; N];
        for i in 0..len {
            let next = if i + 1 < len { self[i + 1] } else { 0 };
            r[i] = (self[i] >> shift) | ((next << comp) & comp_mask);
        }

        Wide(r)
    }
}

impl<const N: usize, const K: usize> Index<usize> for Scratch<N, K> {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        if index < N * K {
            &self.chunks[index / N][index % N]
        } else if index == N * K {
            &self.guard
        } else {
            panic!("numerator access out of bounds");
        }
    }
}

impl<const N: usize, const K: usize> IndexMut<usize> for Scratch<N, K> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index < N * K {
            &mut self.chunks[index / N][index % N]
        } else if index == N * K {
            &mut self.guard
        } else {
            panic!("numerator access out of bounds");
        }
    }
}

/// `u[offset..offset + d.len()] -= q * d`, returning the word still owed
/// to `u[offset + d.len()]`.
#[inline(always)]
fn submul<const N: usize, const K: usize>(
    u: &mut Scratch<N, K>,
    offset: usize,
    d: &[u64],
    q: u64,
) -> u64 {
    let mut borrow = 0;

    for (i, &di) in d.iter().enumerate() {
        let p = q as u128 * di as u128;

        let (s, b1) = u[offset + i].overflowing_sub(borrow);
        let (s, b2) = s.overflowing_sub(p as u64);
        u[offset + i] = s;

        // Cannot overflow: the high word of a product is at most 2^64 - 2,
        // and b1, b2 are never both set when it is.
        borrow = (p >> 64) as u64 + b1 as u64 + b2 as u64;
    }

    borrow
}

/// `u[offset..offset + d.len()] += d`, returning the carry out.
#[inline(always)]
fn add_back<const N: usize, const K: usize>(
    u: &mut Scratch<N, K>,
    offset: usize,
    d: &[u64],
) -> bool {
    let mut carry = false;

    for (i, &di) in d.iter().enumerate() {
        let (s, c) = add_with_carry(u[offset + i], di, carry);
        u[offset + i] = s;
        carry = c;
    }

    carry
}

/// One-word divisor: each step divides (carried remainder, next word).
fn udivrem_by1<const N: usize, const K: usize>(
    u: &Scratch<N, K>,
    len: usize,
    d: u64,
    recip: u64,
    q: &mut Scratch<N, K>,
) -> u64 {
    let mut rem = u[len - 1];

    for j in (0..len - 1).rev() {
        let r = udivrem_2by1(Uint128::new(u[j], rem), d, recip);
        q[j] = r.quotient;
        rem = r.remainder;
    }

    rem
}

/// Two-word divisor: each step divides a three-word window.
fn udivrem_by2<const N: usize, const K: usize>(
    u: &Scratch<N, K>,
    len: usize,
    d: Uint128,
    recip: u64,
    q: &mut Scratch<N, K>,
) -> Uint128 {
    let mut rem = Uint128::new(u[len - 2], u[len - 1]);

    for j in (0..len - 2).rev() {
        let r = udivrem_3by2(rem.hi, rem.lo, u[j], d, recip);
        q[j] = r.quotient;
        rem = r.remainder;
    }

    rem
}

/// Knuth's Algorithm D for divisors of three or more words. The remainder
/// is left in the low `d.len()` words of `u`.
fn udivrem_knuth<const N: usize, const K: usize>(
    u: &mut Scratch<N, K>,
    len: usize,
    d: &[u64],
    recip: u64,
    q: &mut Scratch<N, K>,
) {
    let n = d.len();
    let top = Uint128::new(d[n - 2], d[n - 1]);

    for j in (0..len - n).rev() {
        let u2 = u[j + n];
        let u1 = u[j + n - 1];
        let u0 = u[j + n - 2];

        let qhat = if Uint128::new(u1, u2) == top {
            // The estimate would not fit a word; the digit is exactly
            // all-ones here and needs no correction.
            let qhat = u64::MAX;
            let borrow = submul(u, j, d, qhat);
            u[j + n] = u2.wrapping_sub(borrow);
            qhat
        } else {
            let r = udivrem_3by2(u2, u1, u0, top, recip);
            let mut qhat = r.quotient;

            // The top two words of the window are already reduced by the
            // estimate, only the lower words still owe qhat * d.
            let owed = submul(u, j, &d[..n - 2], qhat);
            let (w0, borrow) = sub_with_carry(r.remainder.lo, owed, false);
            let (w1, borrow) = sub_with_carry(r.remainder.hi, 0, borrow);
            u[j + n - 2] = w0;
            u[j + n - 1] = w1;

            if borrow {
                log::trace!("quotient digit {j} overestimated, adding back");

                qhat -= 1;
                let carry = add_back(u, j, &d[..n - 1]);
                u[j + n - 1] = u[j + n - 1]
                    .wrapping_add(top.hi)
                    .wrapping_add(carry as u64);
            }

            qhat
        };

        q[j] = qhat;
    }
}

/// Divides the `N * K`-word value `src` by an `N`-word divisor.
fn udivrem_chunks<const N: usize, const K: usize>(
    src: &[[u64; N]; K],
    divisor: &Divisor<Wide<N>>,
) -> ([[u64; N]; K], Wide<N>) {
    let &Divisor {
        d_norm,
        recip,
        norm,
        words,
    } = divisor;

    let d = &d_norm.0[..words as usize];
    let n = d.len();

    let (mut u, mut len) = Scratch::normalized(src, norm);

    // Keep the first window strictly below the divisor so every quotient
    // digit fits a word. The guard word is always below d[n - 1], so this
    // never reaches past it.
    if len > 0 && u[len - 1] >= d[n - 1] {
        len += 1;
    }

    // Fewer significant words than the divisor: the whole value is the
    // remainder and fits the low chunk.
    if n > len {
        return ([[0; N]; K], Wide(src[0]));
    }

    let mut q = Scratch::<N, K>::zero();

    let remainder = match n {
        1 => {
            let r = udivrem_by1(&u, len, d[0], recip, &mut q);
            Wide::from(r >> norm)
        }
        2 => {
            let r = udivrem_by2(&u, len, Uint128::new(d[0], d[1]), recip, &mut q);
            Wide::from(r >> norm)
        }
        _ => {
            udivrem_knuth(&mut u, len, d, recip, &mut q);
            u.unnormalized(n, norm)
        }
    };

    (q.chunks, remainder)
}

/// A divisor prepared once for any number of divisions: normalized so its
/// top bit is set, with the reciprocal of its leading word(s).
#[derive(Copy, Clone, Debug)]
pub struct Divisor<T> {
    pub d_norm: T,
    pub recip: u64,
    pub norm: u32,
    pub words: u32,
}

impl Divisor<u64> {
    pub fn new(d: u64) -> Result<Self, Error> {
        if d == 0 {
            return Err(Error::DivisionByZero);
        }

        let norm = d.leading_zeros();
        let d_norm = d << norm;

        Ok(Divisor {
            d_norm,
            recip: reciprocal_2by1(d_norm),
            norm,
            words: 1,
        })
    }
}

impl From<u64> for Divisor<u64> {
    fn from(d: u64) -> Self {
        match Self::new(d) {
            Ok(divisor) => divisor,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<const N: usize> Divisor<Wide<N>> {
    pub fn new(d: Wide<N>) -> Result<Self, Error> {
        let norm = d.leading_zeros();
        if norm == Wide::<N>::BITS {
            return Err(Error::DivisionByZero);
        }

        let words = N as u32 - (norm / 64);
        let norm = norm % 64;
        let d_norm = d << norm;

        let top = words as usize - 1;
        let recip = if words == 1 {
            reciprocal_2by1(d_norm.0[0])
        } else {
            reciprocal_3by2(Uint128::new(d_norm.0[top - 1], d_norm.0[top]))
        };

        Ok(Divisor {
            d_norm,
            recip,
            norm,
            words,
        })
    }
}

impl<const N: usize> From<Wide<N>> for Divisor<Wide<N>> {
    fn from(d: Wide<N>) -> Self {
        match Self::new(d) {
            Ok(divisor) => divisor,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<const N: usize> Wide<N> {
    pub fn div_mod_word(&self, divisor: &Divisor<u64>) -> (Self, u64) {
        let &Divisor {
            d_norm,
            recip,
            norm,
            words: _,
        } = divisor;

        let (mut u, mut carry) = self.shl_with_carry(norm);

        for i in (0..N).rev() {
            let r = udivrem_2by1(Uint128::new(u.0[i], carry), d_norm, recip);

            u.0[i] = r.quotient;
            carry = r.remainder;
        }

        (u, carry >> norm)
    }

    pub fn div_mod(&self, divisor: &Divisor<Wide<N>>) -> DivResult<Self> {
        let ([quotient], remainder) = udivrem_chunks(&[self.0], divisor);

        DivResult {
            quotient: Wide(quotient),
            remainder,
        }
    }

    /// Unsigned division. Panics if `d` is zero.
    pub fn udivrem(&self, d: &Self) -> DivResult<Self> {
        self.div_mod(&Divisor::from(*d))
    }

    pub fn checked_udivrem(&self, d: &Self) -> Result<DivResult<Self>, Error> {
        Ok(self.div_mod(&Divisor::<Wide<N>>::new(*d)?))
    }

    /// Signed division of the two's complement readings of `self` and `d`,
    /// truncating towards zero. The remainder takes the sign of `self`.
    /// Panics if `d` is zero.
    pub fn sdivrem(&self, d: &Self) -> DivResult<Self> {
        let u_neg = self.is_negative();
        let d_neg = d.is_negative();

        let u_abs = if u_neg { -*self } else { *self };
        let d_abs = if d_neg { -*d } else { *d };

        let r = u_abs.udivrem(&d_abs);

        DivResult {
            quotient: if u_neg ^ d_neg { -r.quotient } else { r.quotient },
            remainder: if u_neg { -r.remainder } else { r.remainder },
        }
    }

    /// `(self + y) mod m` without losing the carry of the sum. Panics if `m`
    /// is zero.
    pub fn addmod(&self, y: &Self, m: &Self) -> Self {
        let divisor = Divisor::from(*m);

        let x = self.div_mod(&divisor).remainder;
        let y = y.div_mod(&divisor).remainder;

        // Both operands are below m, so one subtraction reduces the sum.
        let (s, carry) = x.add_with_carry(&y);
        if carry || s >= *m {
            s - *m
        } else {
            s
        }
    }

    /// `(self * y) mod m` over the full double-width product. Panics if
    /// `m` is zero.
    pub fn mulmod(&self, y: &Self, m: &Self) -> Self {
        let divisor = Divisor::from(*m);

        let (lo, hi) = self.widening_mul(y);
        let (_, remainder) = udivrem_chunks(&[lo.0, hi.0], &divisor);

        remainder
    }
}

impl<const N: usize> std::ops::Div<u64> for Wide<N> {
    type Output = Self;

    #[inline]
    fn div(self, other: u64) -> Self::Output {
        self.div_mod_word(&Divisor::from(other)).0
    }
}

impl<const N: usize> std::ops::Div<u64> for &Wide<N> {
    type Output = Wide<N>;

    #[inline]
    fn div(self, other: u64) -> Self::Output {
        self.div_mod_word(&Divisor::from(other)).0
    }
}

impl<const N: usize> std::ops::Rem<u64> for Wide<N> {
    type Output = u64;

    #[inline]
    fn rem(self, other: u64) -> u64 {
        self.div_mod_word(&Divisor::from(other)).1
    }
}

impl<const N: usize> std::ops::Rem<u64> for &Wide<N> {
    type Output = u64;

    #[inline]
    fn rem(self, other: u64) -> u64 {
        self.div_mod_word(&Divisor::from(other)).1
    }
}

impl<const N: usize> std::ops::Div<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn div(self, other: Self) -> Self::Output {
        self.udivrem(&other).quotient
    }
}

impl<const N: usize> std::ops::Rem<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn rem(self, other: Self) -> Self::Output {
        self.udivrem(&other).remainder
    }
}

impl<const N: usize> std::ops::DivAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn div_assign(&mut self, other: Self) {
        *self = self.udivrem(&other).quotient;
    }
}

impl<const N: usize> std::ops::RemAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn rem_assign(&mut self, other: Self) {
        *self = self.udivrem(&other).remainder;
    }
}

impl<const N: usize> std::ops::DivAssign<u64> for Wide<N> {
    #[inline]
    fn div_assign(&mut self, other: u64) {
        *self = self.div_mod_word(&Divisor::from(other)).0;
    }
}

impl<const N: usize> std::ops::RemAssign<u64> for Wide<N> {
    #[inline]
    fn rem_assign(&mut self, other: u64) {
        *self = Self::from(self.div_mod_word(&Divisor::from(other)).1);
    }
}
