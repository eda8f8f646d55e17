use std::cmp::Ordering;
use std::fmt;

use crate::reciprocal::{
    reciprocal_2by1, reciprocal_3by2, udivrem_2by1, udivrem_3by2,
};
use crate::u64_ext::{add_with_carry, sub_with_carry};
#[cfg(feature = "portable")]
use crate::u64_ext::umul;
use crate::DivResult;

/// Two-word unsigned integer with arithmetic specialized for exactly two
/// words. Division falls back on the reciprocal kernels when the
/// `portable` feature is enabled.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Default)]
pub struct Uint128 {
    pub lo: u64,
    pub hi: u64,
}

impl Uint128 {
    pub const BITS: u32 = 128;
    pub const ZERO: Self = Self::new(0, 0);
    pub const MAX: Self = Self::new(u64::MAX, u64::MAX);

    #[inline]
    pub const fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    pub fn is_zero(&self) -> bool {
        (self.lo | self.hi) == 0
    }

    pub fn leading_zeros(&self) -> u32 {
        if self.hi != 0 {
            self.hi.leading_zeros()
        } else {
            64 + self.lo.leading_zeros()
        }
    }

    #[inline]
    pub fn add_with_carry(&self, other: &Self) -> (Self, bool) {
        let (lo, carry) = add_with_carry(self.lo, other.lo, false);
        let (hi, carry) = add_with_carry(self.hi, other.hi, carry);
        (Self::new(lo, hi), carry)
    }

    #[inline]
    pub fn sub_with_carry(&self, other: &Self) -> (Self, bool) {
        let (lo, borrow) = sub_with_carry(self.lo, other.lo, false);
        let (hi, borrow) = sub_with_carry(self.hi, other.hi, borrow);
        (Self::new(lo, hi), borrow)
    }

    /// Shifts left by less than a word, returning the bits pushed out of
    /// the high word.
    #[inline]
    pub(crate) fn shl_with_carry(&self, shift: u32) -> (Self, u64) {
        debug_assert!(shift < 64);

        if shift == 0 {
            return (*self, 0);
        }

        let lo = self.lo << shift;
        let hi = (self.hi << shift) | (self.lo >> (64 - shift));
        (Self::new(lo, hi), self.hi >> (64 - shift))
    }

    pub fn udivrem(&self, d: &Self) -> DivResult<Self> {
        #[cfg(not(feature = "portable"))]
        {
            let (u, d) = (u128::from(*self), u128::from(*d));
            if d == 0 {
                panic!("division by zero");
            }

            DivResult {
                quotient: Self::from(u / d),
                remainder: Self::from(u % d),
            }
        }

        #[cfg(feature = "portable")]
        {
            self.udivrem_portable(d)
        }
    }

    /// Division through the reciprocal kernels only, without a hardware
    /// 128-bit divide.
    pub fn udivrem_portable(&self, d: &Self) -> DivResult<Self> {
        if d.is_zero() {
            panic!("division by zero");
        }

        if d.hi == 0 {
            let shift = d.lo.leading_zeros();
            let dn = d.lo << shift;
            let v = reciprocal_2by1(dn);

            let (un, u2) = self.shl_with_carry(shift);

            let hi = udivrem_2by1(Self::new(un.hi, u2), dn, v);
            let lo = udivrem_2by1(Self::new(un.lo, hi.remainder), dn, v);

            return DivResult {
                quotient: Self::new(lo.quotient, hi.quotient),
                remainder: Self::from(lo.remainder >> shift),
            };
        }

        if d > self {
            return DivResult {
                quotient: Self::ZERO,
                remainder: *self,
            };
        }

        let shift = d.hi.leading_zeros();
        let (dn, _) = d.shl_with_carry(shift);
        let v = reciprocal_3by2(dn);

        let (un, u2) = self.shl_with_carry(shift);
        let r = udivrem_3by2(u2, un.hi, un.lo, dn, v);

        DivResult {
            quotient: Self::from(r.quotient),
            remainder: r.remainder >> shift,
        }
    }
}

impl From<u64> for Uint128 {
    #[inline]
    fn from(n: u64) -> Self {
        Self::new(n, 0)
    }
}

impl From<u128> for Uint128 {
    #[inline]
    fn from(n: u128) -> Self {
        Self::new(n as u64, (n >> 64) as u64)
    }
}

impl From<Uint128> for u128 {
    #[inline]
    fn from(n: Uint128) -> Self {
        ((n.hi as u128) << 64) | n.lo as u128
    }
}

impl Ord for Uint128 {
    fn cmp(&self, other: &Self) -> Ordering {
        let (diff, borrow) = self.sub_with_carry(other);
        if borrow {
            Ordering::Less
        } else if diff.is_zero() {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

impl PartialOrd for Uint128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add for Uint128 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.add_with_carry(&other).0
    }
}

impl std::ops::Sub for Uint128 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.sub_with_carry(&other).0
    }
}

impl std::ops::Mul for Uint128 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        #[cfg(not(feature = "portable"))]
        {
            Self::from(u128::from(self).wrapping_mul(u128::from(other)))
        }

        #[cfg(feature = "portable")]
        {
            let p = umul(self.lo, other.lo);
            let hi = p
                .hi
                .wrapping_add(self.lo.wrapping_mul(other.hi))
                .wrapping_add(self.hi.wrapping_mul(other.lo));
            Self::new(p.lo, hi)
        }
    }
}

impl std::ops::Div for Uint128 {
    type Output = Self;

    #[inline]
    fn div(self, other: Self) -> Self {
        self.udivrem(&other).quotient
    }
}

impl std::ops::Rem for Uint128 {
    type Output = Self;

    #[inline]
    fn rem(self, other: Self) -> Self {
        self.udivrem(&other).remainder
    }
}

impl std::ops::Neg for Uint128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        !self + Self::from(1_u64)
    }
}

impl std::ops::Not for Uint128 {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::new(!self.lo, !self.hi)
    }
}

impl std::ops::BitAnd for Uint128 {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        Self::new(self.lo & other.lo, self.hi & other.hi)
    }
}

impl std::ops::BitOr for Uint128 {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self::new(self.lo | other.lo, self.hi | other.hi)
    }
}

impl std::ops::BitXor for Uint128 {
    type Output = Self;

    fn bitxor(self, other: Self) -> Self {
        Self::new(self.lo ^ other.lo, self.hi ^ other.hi)
    }
}

impl std::ops::Shl<u32> for Uint128 {
    type Output = Self;

    fn shl(self, shift: u32) -> Self {
        Self::from(u128::from(self).checked_shl(shift).unwrap_or(0))
    }
}

impl std::ops::Shr<u32> for Uint128 {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        Self::from(u128::from(self).checked_shr(shift).unwrap_or(0))
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&u128::from(*self), f)
    }
}

impl fmt::Debug for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Uint128({:#x})", u128::from(*self))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Uint128 {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::new(u64::arbitrary(g), u64::arbitrary(g))
    }
}
