use super::Wide;

impl<const N: usize> Wide<N> {
    #[inline]
    pub fn overflowing_add_word(&self, other: u64) -> (Self, bool) {
        let mut r = self.0;

        let mut carry;

        // Using u128 seems to generate better asm than
        // u64::overflowing_add.

        let sum = r[0] as u128 + other as u128;
        r[0] = sum as u64;
        carry = (sum >> 64) as u64;

        for i in 1..N {
            let sum = r[i] as u128 + carry as u128;
            r[i] = sum as u64;
            carry = (sum >> 64) as u64;
        }

        (Self(r), carry != 0)
    }

    /// Sum modulo `2^BITS` and whether a carry left the top word.
    #[inline]
    pub fn add_with_carry(&self, other: &Self) -> (Self, bool) {
        let lhs = self.0;
        let rhs = other.0;

        let mut carry = 0;

        let mut r = [0; N];
        for i in 0..N {
            let sum = lhs[i] as u128 + rhs[i] as u128 + carry as u128;

            r[i] = sum as u64;
            carry = (sum >> 64) as u64;
        }

        (Self(r), carry != 0)
    }

    /// Difference modulo `2^BITS` and whether a borrow left the top word,
    /// which happens exactly when `self < other`.
    #[inline]
    pub fn sub_with_carry(&self, other: &Self) -> (Self, bool) {
        let lhs = self.0;
        let rhs = other.0;

        let mut borrow = 0;

        let mut r = [0; N];
        for i in 0..N {
            let diff = (lhs[i] as u128)
                .wrapping_sub(rhs[i] as u128)
                .wrapping_sub(borrow as u128);

            r[i] = diff as u64;
            borrow = (diff >> 127) as u64;
        }

        (Self(r), borrow != 0)
    }

    /// Two's complement negation, `!self + 1`.
    #[inline]
    pub fn wrapping_neg(&self) -> Self {
        (!*self).overflowing_add_word(1).0
    }
}

impl<const N: usize> std::ops::Add<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self::Output {
        self.add_with_carry(&other).0
    }
}

impl<const N: usize> std::ops::Add<u64> for Wide<N> {
    type Output = Self;

    #[inline]
    fn add(self, other: u64) -> Self::Output {
        self.overflowing_add_word(other).0
    }
}

impl<const N: usize> std::ops::AddAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.add_with_carry(&other).0;
    }
}

impl<const N: usize> std::ops::AddAssign<u64> for Wide<N> {
    #[inline]
    fn add_assign(&mut self, other: u64) {
        *self = self.overflowing_add_word(other).0;
    }
}

impl<const N: usize> std::ops::Sub<Wide<N>> for Wide<N> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        self.sub_with_carry(&other).0
    }
}

impl<const N: usize> std::ops::Sub<u64> for Wide<N> {
    type Output = Self;

    #[inline]
    fn sub(self, other: u64) -> Self::Output {
        self.sub_with_carry(&Self::from(other)).0
    }
}

impl<const N: usize> std::ops::SubAssign<Wide<N>> for Wide<N> {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = self.sub_with_carry(&other).0;
    }
}

impl<const N: usize> std::ops::SubAssign<u64> for Wide<N> {
    #[inline]
    fn sub_assign(&mut self, other: u64) {
        *self = self.sub_with_carry(&Self::from(other)).0;
    }
}

impl<const N: usize> std::ops::Neg for Wide<N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.wrapping_neg()
    }
}
