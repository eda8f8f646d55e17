use crate::Wide;

impl<const N: usize> Wide<N> {
    /// Reads exactly `8 * N` big-endian bytes from the front of `bytes`.
    /// Panics if fewer are available.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let bytes = &bytes[..N * 8];

        let mut r = [0; N];
        for (i, chunk) in bytes.chunks_exact(8).rev().enumerate() {
            let mut word = [0; 8];
            word.copy_from_slice(chunk);
            r[i] = u64::from_be_bytes(word);
        }

        Self(r)
    }

    /// Reads exactly `8 * N` little-endian bytes from the front of `bytes`.
    /// Panics if fewer are available.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let bytes = &bytes[..N * 8];

        let mut r = [0; N];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0; 8];
            word.copy_from_slice(chunk);
            r[i] = u64::from_le_bytes(word);
        }

        Self(r)
    }

    pub fn write_be_bytes(&self, buf: &mut [u8]) {
        let buf = &mut buf[..N * 8];

        for (i, dst) in buf.chunks_exact_mut(8).rev().enumerate() {
            dst.copy_from_slice(&self.0[i].to_be_bytes());
        }
    }

    pub fn write_le_bytes(&self, buf: &mut [u8]) {
        let buf = &mut buf[..N * 8];

        for (i, dst) in buf.chunks_exact_mut(8).enumerate() {
            dst.copy_from_slice(&self.0[i].to_le_bytes());
        }
    }

    // Byte `k` counting from the least significant end.
    fn byte(&self, k: usize) -> u8 {
        (self.0[k / 8] >> (8 * (k % 8))) as u8
    }

    fn set_byte(&mut self, k: usize, b: u8) {
        self.0[k / 8] |= (b as u64) << (8 * (k % 8));
    }
}

/// Big-endian conversions between fixed-size byte arrays and values.
pub mod be {
    use crate::Wide;

    /// Zero-extends `B <= 8 * N` big-endian bytes.
    pub fn load<const N: usize, const B: usize>(bytes: &[u8; B]) -> Wide<N> {
        const { assert!(B <= 8 * N, "more bytes than the integer holds") };

        let mut r = Wide::zero();
        for (k, &b) in bytes.iter().rev().enumerate() {
            r.set_byte(k, b);
        }
        r
    }

    pub fn store<const N: usize, const B: usize>(dst: &mut [u8; B], x: &Wide<N>) {
        const { assert!(B == 8 * N, "byte array must match the integer width") };

        x.write_be_bytes(dst);
    }

    /// Writes the `B < 8 * N` least significant bytes of `x`, big-endian.
    pub fn trunc<const N: usize, const B: usize>(dst: &mut [u8; B], x: &Wide<N>) {
        const { assert!(B < 8 * N, "truncation must drop at least one byte") };

        for (k, b) in dst.iter_mut().rev().enumerate() {
            *b = x.byte(k);
        }
    }
}

/// Little-endian conversions between fixed-size byte arrays and values.
pub mod le {
    use crate::Wide;

    /// Zero-extends `B <= 8 * N` little-endian bytes.
    pub fn load<const N: usize, const B: usize>(bytes: &[u8; B]) -> Wide<N> {
        const { assert!(B <= 8 * N, "more bytes than the integer holds") };

        let mut r = Wide::zero();
        for (k, &b) in bytes.iter().enumerate() {
            r.set_byte(k, b);
        }
        r
    }

    pub fn store<const N: usize, const B: usize>(dst: &mut [u8; B], x: &Wide<N>) {
        const { assert!(B == 8 * N, "byte array must match the integer width") };

        x.write_le_bytes(dst);
    }
}

#[cfg(test)]
mod tests {
    use super::{be, le};
    use crate::{u256, Wide};
    use quickcheck_macros::quickcheck;

    fn counting() -> [u8; 32] {
        let mut bytes = [0; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        bytes
    }

    #[test]
    fn from_be_bytes() {
        let n = u256::from_be_bytes(&counting()).0;

        assert_eq!(n[0], 0x18191a1b_1c1d1e1f);
        assert_eq!(n[1], 0x10111213_14151617);
        assert_eq!(n[2], 0x08090a0b_0c0d0e0f);
        assert_eq!(n[3], 0x00010203_04050607);
    }

    #[test]
    fn from_le_bytes() {
        let n = u256::from_le_bytes(&counting()).0;

        assert_eq!(n[0], 0x07060504_03020100);
        assert_eq!(n[1], 0x0f0e0d0c_0b0a0908);
        assert_eq!(n[2], 0x17161514_13121110);
        assert_eq!(n[3], 0x1f1e1d1c_1b1a1918);
    }

    #[test]
    fn writes_bytes_back() {
        let n = u256::from_be_bytes(&counting());

        let mut buf = [0xff; 40];
        n.write_be_bytes(&mut buf);
        assert_eq!(buf[..32], counting());
        assert_eq!(buf[32..], [0xff; 8]);

        n.write_le_bytes(&mut buf);
        assert_eq!(u256::from_le_bytes(&buf), n);
    }

    #[test]
    #[should_panic]
    fn rejects_short_slices() {
        let _ = u256::from_be_bytes(&[0; 31]);
    }

    #[test]
    fn loads_short_arrays_zero_extended() {
        let n: u256 = be::load(&[0x01, 0x02, 0x03]);
        assert_eq!(n, u256::from(0x010203_u64));

        let n: u256 = le::load(&[0x01, 0x02, 0x03]);
        assert_eq!(n, u256::from(0x030201_u64));

        let n: u256 = be::load(&[0xaa; 9]);
        assert_eq!(n.0, [u64::MAX / 0xff * 0xaa, 0xaa, 0, 0]);

        let n: u256 = be::load(&[]);
        assert_eq!(n, u256::zero());
    }

    #[test]
    fn stores_full_width() {
        let n = u256([0x1122334455667788, 0, 0, 0x99aabbccddeeff00]);

        let mut out = [0; 32];
        be::store(&mut out, &n);
        assert_eq!(out[..8], 0x99aabbccddeeff00_u64.to_be_bytes());
        assert_eq!(out[24..], 0x1122334455667788_u64.to_be_bytes());

        le::store(&mut out, &n);
        assert_eq!(out[..8], 0x1122334455667788_u64.to_le_bytes());
        assert_eq!(out[24..], 0x99aabbccddeeff00_u64.to_le_bytes());
    }

    #[test]
    fn truncates_to_low_bytes() {
        let n = u256([0x1122334455667788, 0x99, 0, 0xff]);

        let mut out = [0; 9];
        be::trunc(&mut out, &n);
        assert_eq!(out, [0x99, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);

        // An Ethereum-style 20 byte address out of a 256-bit word.
        let mut addr = [0; 20];
        be::trunc(&mut addr, &u256::MAX);
        assert_eq!(addr, [0xff; 20]);
    }

    #[quickcheck]
    fn qc_store_then_load(n: u256) -> bool {
        let mut be_bytes = [0; 32];
        let mut le_bytes = [0; 32];
        be::store(&mut be_bytes, &n);
        le::store(&mut le_bytes, &n);

        let loaded = be::load::<4, 32>(&be_bytes) == n && le::load::<4, 32>(&le_bytes) == n;

        be_bytes.reverse();
        loaded && be_bytes == le_bytes
    }

    #[quickcheck]
    fn qc_matches_u128_bytes(n: u128) -> bool {
        let w: Wide<2> = be::load(&n.to_be_bytes());
        let v: Wide<2> = le::load(&n.to_le_bytes());

        w.low_u128() == n && v == w
    }
}
