use std::cmp::Ordering;

use super::{Uint128, Wide};

macro_rules! impl_bitscan {
    (@forward, $bitscan:ident, $size:tt, $empty:expr) => {
        pub fn $bitscan(&self) -> u32 {
            let n = self.0;

            for i in 0..$size {
                let n = n[i];
                if n != $empty {
                    return (i as u32) * u64::BITS + n.$bitscan();
                }
            }

            Self::BITS
        }
    };
    (@reverse, $bitscan:ident, $size:tt, $empty:expr) => {
        pub fn $bitscan(&self) -> u32 {
            let n = self.0;

            for i in 0..$size {
                let n = n[$size - i - 1];
                if n != $empty {
                    return (i as u32) * u64::BITS + n.$bitscan();
                }
            }

            Self::BITS
        }
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> From<$t> for Wide<N> {
                #[inline]
                fn from(n: $t) -> Self {
                    Self::from(n as u64)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> From<$t> for Wide<N> {
                /// Sign-extends into the two's complement image of `n`.
                #[inline]
                fn from(n: $t) -> Self {
                    let fill = if n < 0 { u64::MAX } else { 0 };
                    let mut r = [fill; N];
                    r[0] = n as i64 as u64;

                    Self(r)
                }
            }
        )*
    };
}

impl<const N: usize> Wide<N> {
    pub const BITS: u32 = N as u32 * u64::BITS;
    pub const MAX: Self = Self([u64::MAX; N]);
    pub const MIN: Self = Self([0; N]);

    impl_bitscan!(@forward, trailing_zeros, N, 0);
    impl_bitscan!(@forward, trailing_ones, N, u64::MAX);
    impl_bitscan!(@reverse, leading_zeros, N, 0);
    impl_bitscan!(@reverse, leading_ones, N, u64::MAX);

    pub const fn zero() -> Self {
        Self([0; N])
    }

    pub const fn one() -> Self {
        let mut r = [0; N];
        r[0] = 1;
        Self(r)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().fold(0, |acc, w| acc | w) == 0
    }

    /// Whether the top bit is set, i.e. the value is negative when read as
    /// two's complement.
    pub fn is_negative(&self) -> bool {
        self.0[N - 1] >> 63 != 0
    }

    pub fn bit(&self, index: u32) -> bool {
        if index >= Self::BITS {
            return false;
        }

        (self.0[index as usize / 64] >> (index % 64)) & 1 != 0
    }

    pub fn low_u64(&self) -> u64 {
        self.0[0]
    }

    pub fn low_u128(&self) -> u128 {
        let hi = if N > 1 { self.0[1] } else { 0 };
        ((hi as u128) << 64) | self.0[0] as u128
    }

    pub fn count_ones(&self) -> u32 {
        let mut ones = 0;
        let n = self.0;

        for i in 0..N {
            ones += n[i].count_ones();
        }

        ones
    }

    pub fn count_zeros(&self) -> u32 {
        Self::BITS - self.count_ones()
    }

    pub fn is_power_of_two(&self) -> bool {
        self.count_ones() == 1
    }

    /// Reverses the byte order of the whole value: bytes within every word
    /// and the order of the words.
    pub fn swap_bytes(&self) -> Self {
        let n = self.0;

        let mut r = [0; N];
        for i in 0..N {
            r[i] = n[N - i - 1].swap_bytes();
        }

        Self(r)
    }

    /// Zero-extends into a width of `M >= N` words.
    pub fn widen<const M: usize>(&self) -> Wide<M> {
        const { assert!(M >= N, "widening to a narrower width") };

        let mut r = [0; M];
        r[..N].copy_from_slice(&self.0);
        Wide(r)
    }

    /// Keeps the low `M <= N` words.
    pub fn truncate<const M: usize>(&self) -> Wide<M> {
        const { assert!(M <= N, "truncating to a wider width") };

        let mut r = [0; M];
        r.copy_from_slice(&self.0[..M]);
        Wide(r)
    }

    /// Concatenates two values of half this width.
    pub fn from_halves<const H: usize>(lo: Wide<H>, hi: Wide<H>) -> Self {
        const { assert!(2 * H == N, "halves must be exactly half the width") };

        let mut r = [0; N];
        r[..H].copy_from_slice(&lo.0);
        r[H..].copy_from_slice(&hi.0);
        Self(r)
    }

    /// Splits into `(low, high)` halves.
    pub fn halves<const H: usize>(&self) -> (Wide<H>, Wide<H>) {
        const { assert!(2 * H == N, "halves must be exactly half the width") };

        let mut lo = [0; H];
        let mut hi = [0; H];
        lo.copy_from_slice(&self.0[..H]);
        hi.copy_from_slice(&self.0[H..]);
        (Wide(lo), Wide(hi))
    }
}

impl<const N: usize> From<u64> for Wide<N> {
    #[inline]
    fn from(n: u64) -> Self {
        let mut r = [0; N];
        r[0] = n;

        Self(r)
    }
}

impl<const N: usize> From<u128> for Wide<N> {
    #[inline]
    fn from(n: u128) -> Self {
        let mut r = [0; N];
        r[0] = n as u64;
        if N > 1 {
            r[1] = (n >> 64) as u64;
        }

        Self(r)
    }
}

impl<const N: usize> From<i128> for Wide<N> {
    /// Sign-extends into the two's complement image of `n`.
    #[inline]
    fn from(n: i128) -> Self {
        let fill = if n < 0 { u64::MAX } else { 0 };
        let mut r = [fill; N];
        r[0] = n as u64;
        if N > 1 {
            r[1] = (n >> 64) as u64;
        }

        Self(r)
    }
}

impl<const N: usize> From<Uint128> for Wide<N> {
    #[inline]
    fn from(n: Uint128) -> Self {
        Self::from(u128::from(n))
    }
}

impl_from_unsigned!(bool, u8, u16, u32, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl<const N: usize> Default for Wide<N> {
    #[inline]
    fn default() -> Self {
        Self([0; N])
    }
}

// The borrow of `a - b` decides `a < b`; the difference itself decides
// equality, so no word-by-word branching is needed.
fn compare<const N: usize>(a: &Wide<N>, b: &Wide<N>) -> Ordering {
    let (diff, borrow) = a.sub_with_carry(b);

    if borrow {
        Ordering::Less
    } else if diff.is_zero() {
        Ordering::Equal
    } else {
        Ordering::Greater
    }
}

impl<const N: usize> std::cmp::PartialOrd for Wide<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare(self, other))
    }
}

impl<const N: usize> std::cmp::Ord for Wide<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}
