use super::Wide;

impl<const N: usize> Wide<N> {
    #[inline]
    pub fn overflowing_mul_word(&self, other: u64) -> (Self, bool) {
        let mut carry = 0;
        let n = self.0;

        let mut r = [0; N];
        for i in 0..N {
            let p = n[i] as u128 * other as u128 + carry as u128;
            r[i] = p as u64;
            carry = (p >> 64) as u64;
        }

        (Self(r), carry != 0)
    }

    /// Truncated schoolbook product and whether any bit of the full
    /// product was lost.
    pub fn overflowing_mul(&self, other: &Self) -> (Self, bool) {
        let n = self.0;
        let m = other.0;

        let mut carry = 0;
        let x = m[0];

        let mut r = [0; N];

        for i in 0..N {
            let p = n[i] as u128 * x as u128 + carry as u128;
            r[i] = p as u64;
            carry = (p >> 64) as u64;
        }

        let mut overflow = carry;

        for j in 1..N {
            carry = 0;
            let x = m[j];

            for i in 0..(N - j) {
                let ri = i + j;

                // Following is always true:
                // (Product of any two u64 + 2*u64::MAX) <= u128::MAX
                // Which means we can safely add in carry without
                // overflowing u128.
                //
                // Example in decimal:
                // Max decimal digit = 9
                // Max decimal two-digit = 99
                // Product (9, 9) = 81
                // 81 + 2*9 <= 99

                let p =
                    n[i] as u128 * x as u128 + r[ri] as u128 + carry as u128;
                carry = (p >> 64) as u64;

                r[ri] = p as u64;
            }

            if x != 0 {
                overflow |= carry;

                for i in (N - j)..N {
                    overflow |= n[i];
                }
            }
        }

        (Self(r), overflow != 0)
    }

    /// Truncated product: words above `N - 1` are never computed.
    pub fn wrapping_mul(&self, other: &Self) -> Self {
        let n = self.0;
        let m = other.0;

        let mut r = [0; N];

        for j in 0..N {
            let mut carry = 0;
            let x = m[j];

            for i in 0..(N - j) {
                let ri = i + j;
                let p =
                    n[i] as u128 * x as u128 + r[ri] as u128 + carry as u128;
                carry = (p >> 64) as u64;
                r[ri] = p as u64;
            }
        }

        Self(r)
    }

    /// Full `2N`-word product, returned as `(low, high)` halves.
    pub fn widening_mul(&self, other: &Self) -> (Self, Self) {
        let n = self.0;
        let m = other.0;

        let mut lo = [0; N];
        let mut hi = [0; N];

        for j in 0..N {
            let mut carry = 0;
            let x = m[j];

            for i in 0..N {
                let ri = i + j;
                let acc = if ri < N { lo[ri] } else { hi[ri - N] };

                let p = n[i] as u128 * x as u128 + acc as u128 + carry as u128;
                carry = (p >> 64) as u64;

                if ri < N {
                    lo[ri] = p as u64;
                } else {
                    hi[ri - N] = p as u64;
                }
            }

            // Word j + N is untouched by earlier rows.
            hi[j] = carry;
        }

        (Self(lo), Self(hi))
    }

    /// Square-and-multiply exponentiation modulo `2^BITS`. A base of
    /// exactly two is a single shift.
    pub fn pow<E: Into<Self>>(&self, exp: E) -> Self {
        let exp = exp.into();

        if *self == Self::from(2_u64) {
            return Self::one() << exp;
        }

        let mut base = *self;
        let mut result = Self::one();

        let bits = Self::BITS - exp.leading_zeros();
        for i in 0..bits {
            if exp.bit(i) {
                result *= base;
            }

            base *= base;
        }

        result
    }
}

/// Full product of two `N`-word values as one `M = 2N`-word value.
pub fn umul<const N: usize, const M: usize>(x: &Wide<N>, y: &Wide<N>) -> Wide<M> {
    let (lo, hi) = x.widening_mul(y);
    Wide::from_halves(lo, hi)
}

impl<const N: usize> std::ops::Mul<u64> for Wide<N> {
    type Output = Self;

    #[inline]
    fn mul(self, other: u64) -> Self::Output {
        self.overflowing_mul_word(other).0
    }
}

impl<const N: usize> std::ops::Mul<u64> for &Wide<N> {
    type Output = Wide<N>;

    #[inline]
    fn mul(self, other: u64) -> Self::Output {
        self.overflowing_mul_word(other).0
    }
}

impl<const N: usize> std::ops::MulAssign<u64> for Wide<N> {
    #[inline]
    fn mul_assign(&mut self, other: u64) {
        *self = self.overflowing_mul_word(other).0;
    }
}

impl<const N: usize> std::ops::Mul<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self::Output {
        self.wrapping_mul(&other)
    }
}

impl<const N: usize> std::ops::Mul<Wide<N>> for &Wide<N> {
    type Output = Wide<N>;

    #[inline]
    fn mul(self, other: Wide<N>) -> Self::Output {
        self.wrapping_mul(&other)
    }
}

impl<const N: usize> std::ops::MulAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = self.wrapping_mul(&other);
    }
}
