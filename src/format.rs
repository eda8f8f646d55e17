use std::fmt;

use crate::{Divisor, Error, Wide};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Largest power of `base` that fits a word, and its exponent.
pub(crate) fn chunk_base(base: u64) -> (u64, u32) {
    let mut power = base;
    let mut digits = 1;

    while let Some(next) = power.checked_mul(base) {
        power = next;
        digits += 1;
    }

    (power, digits)
}

impl<const N: usize> Wide<N> {
    /// Renders the value in `base` (2 to 36) with lowercase digits and no
    /// prefix.
    ///
    /// An unsupported base fails with [`Error::InvalidArgument`] whose
    /// `input` is the rejected base in decimal.
    pub fn to_str_radix(&self, base: u32) -> Result<String, Error> {
        if !(2..=36).contains(&base) {
            return Err(Error::invalid(&base.to_string(), "unsupported base"));
        }

        Ok(self.radix_string(base))
    }

    // Peels one word-sized chunk of digits per division, least significant
    // first.
    fn radix_string(&self, base: u32) -> String {
        let base = base as u64;
        let (chunk, chunk_digits) = chunk_base(base);
        let divisor = Divisor::from(chunk);

        let mut digits = Vec::with_capacity(Self::BITS as usize);
        let mut n = *self;

        loop {
            let (q, mut r) = n.div_mod_word(&divisor);
            n = q;

            for _ in 0..chunk_digits {
                digits.push(DIGITS[(r % base) as usize]);
                r /= base;

                if r == 0 && n.is_zero() {
                    break;
                }
            }

            if n.is_zero() {
                break;
            }
        }

        digits.iter().rev().map(|&d| d as char).collect()
    }
}

impl<const N: usize> fmt::Display for Wide<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "", &self.radix_string(10))
    }
}

impl<const N: usize> fmt::Debug for Wide<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Wide(")?;
        <Self as fmt::Display>::fmt(self, f)?;
        f.write_str(")")
    }
}

impl<const N: usize> fmt::LowerHex for Wide<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_hex(self, f, hex_simd::AsciiCase::Lower)
    }
}

impl<const N: usize> fmt::UpperHex for Wide<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_hex(self, f, hex_simd::AsciiCase::Upper)
    }
}

fn format_hex<const N: usize>(
    src: &Wide<N>,
    f: &mut fmt::Formatter,
    case: hex_simd::AsciiCase,
) -> fmt::Result {
    let zero_digits = std::cmp::min(src.leading_zeros() / 4, N as u32 * 16 - 1);

    let mut bytes = vec![0; 8 * N];
    src.write_be_bytes(&mut bytes);

    let encoded = hex_simd::encode_to_string(&bytes, case);

    f.pad_integral(true, "0x", &encoded[zero_digits as usize..])
}
