use crate::format::chunk_base;
use crate::{Divisor, Error, Wide};

impl<const N: usize> Wide<N> {
    /// Digits needed to write `MAX` in `base`; longer numerals are rejected
    /// before any arithmetic.
    fn max_digits(base: u64) -> usize {
        let (chunk, chunk_digits) = chunk_base(base);
        let divisor = Divisor::from(chunk);

        let mut count = 0;
        let mut n = Self::MAX;

        loop {
            let (q, r) = n.div_mod_word(&divisor);

            if q.is_zero() {
                return count + r.ilog(base) as usize + 1;
            }

            count += chunk_digits as usize;
            n = q;
        }
    }

    /// Parses `src` in `base` (2 to 36). Digits are case-insensitive; no
    /// sign, prefix or separators are accepted.
    pub fn from_str_radix(src: &str, base: u32) -> Result<Self, Error> {
        if !(2..=36).contains(&base) {
            return Err(Error::invalid(src, "unsupported base"));
        }

        if src.is_empty() {
            return Err(Error::invalid(src, "empty numeral"));
        }

        if !src.chars().all(|c| c.is_digit(base)) {
            return Err(Error::invalid(src, "invalid digit"));
        }

        if src.len() > Self::max_digits(base as u64) {
            return Err(Error::out_of_range(src));
        }

        let (_, chunk_digits) = chunk_base(base as u64);

        let mut r = Self::zero();

        // Whole word-sized groups of digits are folded in with one
        // multiply-add each.
        for group in src.as_bytes().chunks(chunk_digits as usize) {
            let mut acc = 0_u64;
            let mut scale = 1_u64;

            for &c in group {
                // Every byte was checked to be an ASCII digit of `base`.
                let digit = (c as char).to_digit(base).unwrap_or(0);

                acc = acc * base as u64 + digit as u64;
                scale *= base as u64;
            }

            let (p, mul_overflow) = r.overflowing_mul_word(scale);
            let (s, add_overflow) = p.overflowing_add_word(acc);

            if mul_overflow || add_overflow {
                return Err(Error::out_of_range(src));
            }

            r = s;
        }

        Ok(r)
    }

    pub fn from_str_dec(src: &str) -> Result<Self, Error> {
        Self::from_str_radix(src, 10)
    }

    /// Parses hex digits without a `0x` prefix.
    pub fn from_str_hex(src: &str) -> Result<Self, Error> {
        Self::from_str_radix(src, 16)
    }
}

impl<const N: usize> std::str::FromStr for Wide<N> {
    type Err = Error;

    /// `0x`-prefixed hex, otherwise decimal.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src.strip_prefix("0x") {
            Some(hex) => Self::from_str_hex(hex),
            None => Self::from_str_dec(src),
        }
    }
}
