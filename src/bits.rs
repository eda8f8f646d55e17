use crate::Wide;

impl<const N: usize> Wide<N> {
    /// Shifts left by `shift < BITS` bits, returning the bits pushed out of
    /// the top word.
    pub fn shl_with_carry(&self, shift: u32) -> (Self, u64) {
        let n = &self.0;

        let offset = shift as usize / 64;
        let shift = shift % 64;

        if offset >= N {
            panic!("shift left overflow");
        }

        let comp = (64 - shift) % 64;
        let comp_mask = if shift == 0 { 0 } else { !0 };

        let mut r = [0; N];
        let mut carry = 0;

        for i in offset..N {
            let v = n[i - offset];
            r[i] = carry | (v << shift);
            carry = (v >> comp) & comp_mask;
        }

        (Self(r), carry)
    }

    /// Shifts right by `shift < BITS` bits, returning the bits pushed out
    /// of the bottom word (left-aligned).
    pub fn shr_with_carry(&self, shift: u32) -> (Self, u64) {
        let n = &self.0;

        let offset = shift as usize / 64;
        let shift = shift % 64;

        if offset >= N {
            panic!("shift right overflow");
        }

        let comp = (64 - shift) % 64;
        let comp_mask = if shift == 0 { 0 } else { !0 };

        let mut r = [0; N];
        let mut carry = 0;

        for i in (offset..N).rev() {
            let v = n[i];
            r[i - offset] = carry | (v >> shift);
            carry = (v << comp) & comp_mask;
        }

        (Self(r), carry)
    }

    // Shift amounts reaching the width clear the value instead of being
    // reduced modulo the width.
    fn shl_saturating(&self, shift: u64) -> Self {
        if shift >= Self::BITS as u64 {
            Self::zero()
        } else {
            self.shl_with_carry(shift as u32).0
        }
    }

    fn shr_saturating(&self, shift: u64) -> Self {
        if shift >= Self::BITS as u64 {
            Self::zero()
        } else {
            self.shr_with_carry(shift as u32).0
        }
    }

    // Only the low word of a wide shift amount is consulted, and only when
    // every word above it is zero.
    fn shift_amount(shift: &Self) -> u64 {
        if shift.0[1..].iter().any(|&w| w != 0) {
            u64::MAX
        } else {
            shift.0[0]
        }
    }
}

macro_rules! impl_shifts {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> std::ops::Shl<$t> for Wide<N> {
                type Output = Self;

                #[inline]
                fn shl(self, rhs: $t) -> Self::Output {
                    self.shl_saturating(rhs as u64)
                }
            }

            impl<const N: usize> std::ops::Shr<$t> for Wide<N> {
                type Output = Self;

                #[inline]
                fn shr(self, rhs: $t) -> Self::Output {
                    self.shr_saturating(rhs as u64)
                }
            }

            impl<const N: usize> std::ops::ShlAssign<$t> for Wide<N> {
                #[inline]
                fn shl_assign(&mut self, rhs: $t) {
                    *self = self.shl_saturating(rhs as u64);
                }
            }

            impl<const N: usize> std::ops::ShrAssign<$t> for Wide<N> {
                #[inline]
                fn shr_assign(&mut self, rhs: $t) {
                    *self = self.shr_saturating(rhs as u64);
                }
            }
        )*
    };
}

impl_shifts!(u32, u64, usize);

impl<const N: usize> std::ops::Shl<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn shl(self, rhs: Self) -> Self::Output {
        self.shl_saturating(Self::shift_amount(&rhs))
    }
}

impl<const N: usize> std::ops::Shr<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: Self) -> Self::Output {
        self.shr_saturating(Self::shift_amount(&rhs))
    }
}

impl<const N: usize> std::ops::ShlAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn shl_assign(&mut self, rhs: Self) {
        *self = self.shl_saturating(Self::shift_amount(&rhs));
    }
}

impl<const N: usize> std::ops::ShrAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn shr_assign(&mut self, rhs: Self) {
        *self = self.shr_saturating(Self::shift_amount(&rhs));
    }
}

macro_rules! impl_bitwise {
    ($op:ident, $f:ident, $assign:ident, $assign_f:ident, $tok:tt) => {
        impl<const N: usize> std::ops::$op for Wide<N> {
            type Output = Self;

            #[inline]
            fn $f(self, other: Self) -> Self::Output {
                let mut r = self.0;
                for i in 0..N {
                    r[i] = r[i] $tok other.0[i];
                }
                Self(r)
            }
        }

        impl<const N: usize> std::ops::$assign for Wide<N> {
            #[inline]
            fn $assign_f(&mut self, other: Self) {
                for i in 0..N {
                    self.0[i] = self.0[i] $tok other.0[i];
                }
            }
        }
    };
}

impl_bitwise!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<const N: usize> std::ops::Not for Wide<N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(self.0.map(|w| !w))
    }
}

#[cfg(test)]
mod tests {
    use crate::{u256, Wide};
    use quickcheck_macros::quickcheck;

    #[test]
    fn shifts_left() {
        let n = u256([0xAAA, 0xBBB, 0xCCC, 0xDDD]) << 60_u32;
        assert_eq!(
            n.0,
            [
                0xA0000000_00000000,
                0xB0000000_000000AA,
                0xC0000000_000000BB,
                0xD0000000_000000CC
            ]
        );
    }

    #[test]
    fn shifts_left_large() {
        let n = u256([0xAAA, 0xBBB, 0xCCC, 0xDDD]) << 188_u32;
        assert_eq!(n.0, [0, 0, 0xA0000000_00000000, 0xB0000000_000000AA]);

        let n = u256([0xAAA, 0xBBB, 0xCCC, 0xDDD]) << 128_u32;
        assert_eq!(n.0, [0, 0, 0xAAA, 0xBBB]);
    }

    #[test]
    fn shifts_left_by_zero() {
        let n = u256([0xAAA, 0xBBB, 0xCCC, 0xDDD]) << 0_u32;
        assert_eq!(n.0, [0xAAA, 0xBBB, 0xCCC, 0xDDD]);
    }

    #[test]
    fn shifts_right() {
        let n = u256([0xAAA, 0xBBB, 0xCCC, 0xDDD]) >> 4_u32;
        assert_eq!(
            n.0,
            [
                0xB0000000_000000AA,
                0xC0000000_000000BB,
                0xD0000000_000000CC,
                0x00000000_000000DD,
            ]
        );
    }

    #[test]
    fn shifts_right_large() {
        let n = u256([0xAAAAAAAA, 0xBBBBBBBB, 0xCCCCCCCC, 0xDDDDDDDD]) >> 144_u32;
        assert_eq!(n.0, [0xDDDD0000_0000CCCC, 0xDDDD, 0, 0]);

        let n = u256([0xA, 0xB, 0xC, 0xD]) >> 128_u32;
        assert_eq!(n.0, [0xC, 0xD, 0, 0]);
    }

    #[test]
    fn shifts_right_by_zero() {
        let n = u256([0xAAA, 0xBBB, 0xCCC, 0xDDD]) >> 0_u32;
        assert_eq!(n.0, [0xAAA, 0xBBB, 0xCCC, 0xDDD]);
    }

    #[test]
    fn shifts_past_width_to_zero() {
        let n = u256::MAX;
        assert_eq!(n << 256_u32, u256::zero());
        assert_eq!(n >> 256_u32, u256::zero());
        assert_eq!(n << u64::MAX, u256::zero());
        assert_eq!(n >> 1000_usize, u256::zero());
        assert_eq!(n << 255_u32, u256([0, 0, 0, 1 << 63]));
    }

    #[test]
    fn shifts_by_wide_amount() {
        let n = u256([1, 0, 0, 0]);
        assert_eq!(n << u256::from(200_u64), u256([0, 0, 0, 1 << 8]));

        // High words of the amount are set, so the low word is ignored.
        let amount = u256([3, 0, 1, 0]);
        assert_eq!(u256::MAX << amount, u256::zero());
        assert_eq!(u256::MAX >> amount, u256::zero());

        let amount = u256([0, 1, 0, 0]);
        assert_eq!(u256::MAX >> amount, u256::zero());

        let mut m = u256::MAX;
        m >>= u256::from(255_u64);
        assert_eq!(m, u256::one());
    }

    #[test]
    fn carries_shifted_out_bits() {
        let (r, carry) = u256([0, 0, 0, 0xF000_0000_0000_0001]).shl_with_carry(4);
        assert_eq!(r.0, [0, 0, 0, 0x10]);
        assert_eq!(carry, 0xF);

        let (r, carry) = u256([0x1F, 0, 0, 0]).shr_with_carry(4);
        assert_eq!(r.0, [1, 0, 0, 0]);
        assert_eq!(carry, 0xF000_0000_0000_0000);
    }

    #[test]
    fn applies_bitwise_operators() {
        let a = u256([0b1100, u64::MAX, 0, 1]);
        let b = u256([0b1010, 0, u64::MAX, 1]);

        assert_eq!((a & b).0, [0b1000, 0, 0, 1]);
        assert_eq!((a | b).0, [0b1110, u64::MAX, u64::MAX, 1]);
        assert_eq!((a ^ b).0, [0b0110, u64::MAX, u64::MAX, 0]);
        assert_eq!((!a).0, [!0b1100, 0, u64::MAX, u64::MAX - 1]);

        let mut c = a;
        c ^= a;
        assert_eq!(c, u256::zero());
    }

    #[quickcheck]
    fn qc_shift_round_trip_keeps_low_bits(n: u256, s: u8) -> bool {
        let s = s as u32;

        (n << s) >> s == (n & (u256::MAX >> s)) && ((n >> s) << s) >> s == n >> s
    }

    #[quickcheck]
    fn qc_matches_u128_shifts(n: u128, s: u8) -> bool {
        let s = s as u32 % 128;
        let w = Wide::<2>::from(n);

        (w << s).low_u128() == n << s && (w >> s).low_u128() == n >> s
    }
}
