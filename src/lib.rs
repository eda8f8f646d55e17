//! Fixed-width wraparound unsigned integers built from 64-bit words.
//!
//! `Wide<N>` holds `N` words, least significant first, and all of its
//! operators work modulo `2^(64 * N)`. Signed semantics (two's complement,
//! truncating division) are available through explicit methods such as
//! [`Wide::sdivrem`].

mod addsub;
mod bits;
mod div;
mod endian;
mod error;
mod format;
mod misc;
mod mul;
mod parse;
pub mod reciprocal;
pub mod u64_ext;
mod uint128;

pub use div::{DivResult, Divisor};
pub use endian::{be, le};
pub use error::Error;
pub use mul::umul;
pub use uint128::Uint128;

#[derive(Eq, PartialEq, Hash, Copy, Clone)]
pub struct Wide<const N: usize>(pub [u64; N]);

#[allow(non_camel_case_types)]
pub type u256 = Wide<4>;
pub fn u256(n: [u64; 4]) -> u256 {
    Wide(n)
}

#[allow(non_camel_case_types)]
pub type u512 = Wide<8>;
pub fn u512(n: [u64; 8]) -> u512 {
    Wide(n)
}

#[allow(non_camel_case_types)]
pub type u1024 = Wide<16>;

#[allow(non_camel_case_types)]
pub type u2048 = Wide<32>;

#[allow(non_camel_case_types)]
pub type u4096 = Wide<64>;

#[cfg(test)]
impl<const N: usize> Arbitrary for Wide<N> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut r = [0_u64; N];
        for i in 0..N {
            r[i] = u64::arbitrary(g);
        }
        Self(r)
    }
}

/// Values biased towards the word patterns that stress quotient
/// estimation: all-ones, lone top bits, and words near them.
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub(crate) struct Edgy<const N: usize>(pub Wide<N>);

#[cfg(test)]
impl<const N: usize> Arbitrary for Edgy<N> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        const WORDS: [u64; 8] = [
            0,
            1,
            u64::MAX,
            u64::MAX - 1,
            1 << 63,
            (1 << 63) - 1,
            (1 << 63) + 1,
            1 << 32,
        ];

        let len = usize::arbitrary(g) % (N + 1);
        let mut r = [0_u64; N];
        for i in 0..len {
            r[i] = if bool::arbitrary(g) {
                *g.choose(&WORDS).unwrap()
            } else {
                u64::arbitrary(g)
            };
        }
        Self(Wide(r))
    }
}

#[cfg(test)]
use quickcheck::Arbitrary;

#[cfg(test)]
pub fn rng() -> rand_pcg::Pcg64 {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |t| t.as_nanos());

    rand_pcg::Pcg64::new(0xcafef00dd15ea5e5 ^ seed, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

#[cfg(test)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
