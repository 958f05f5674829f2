//! Fixed-length bit strings.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::FcsError;

/// A bit string of arbitrary length, stored MSB-first.
///
/// Bit `0` is the most significant bit of the first byte. Bits past `len` in
/// the last byte are always zero, so two equal bit strings have equal byte
/// representations.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Zeroize)]
#[serde(try_from = "RawBitString", into = "RawBitString")]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

#[derive(Serialize, Deserialize)]
struct RawBitString {
    len: usize,
    bytes: Vec<u8>,
}

impl BitString {
    /// All-zero bit string of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Big-endian bit representation of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: 8 * bytes.len(),
        }
    }

    /// Reads a `len`-bit string from its padded byte form.
    ///
    /// `bytes` must be exactly `ceil(len / 8)` long. Padding bits in the last
    /// byte are masked off.
    pub fn from_bytes_with_len(bytes: &[u8], len: usize) -> Result<Self, FcsError> {
        let expected = len.div_ceil(8);
        if bytes.len() != expected {
            return Err(FcsError::MalformedEncoding {
                expected,
                got: bytes.len(),
            });
        }
        let mut bits = Self {
            bytes: bytes.to_vec(),
            len,
        };
        bits.clear_padding();
        Ok(bits)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns bit `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Sets bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        let mask = 0x80 >> (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Inverts bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn flip(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        self.bytes[index / 8] ^= 0x80 >> (index % 8);
    }

    /// Padded byte representation; trailing padding bits are zero.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// The same bits in reverse order.
    pub fn reversed(&self) -> Self {
        let mut out = Self::zeros(self.len);
        for (i, bit) in self.iter().enumerate() {
            if bit {
                out.flip(self.len - 1 - i);
            }
        }
        out
    }

    /// XOR with the shorter operand right-padded with zeros.
    ///
    /// Both operands are aligned at bit `0` and the result is as long as the
    /// longer one. This is the same as reversing both operands, XOR-ing them
    /// with the shorter one left-padded, and reversing the result. A witness
    /// shorter than a codeword therefore only ever touches the codeword's
    /// leading (message) bits.
    pub fn xor_padded_right(&self, other: &Self) -> Self {
        let (long, short) = if self.len >= other.len {
            (self, other)
        } else {
            (other, self)
        };
        let mut bytes = long.bytes.clone();
        for (dst, src) in bytes.iter_mut().zip(&short.bytes) {
            *dst ^= src;
        }
        Self {
            bytes,
            len: long.len,
        }
    }

    /// Number of differing bits, with the shorter operand right-padded.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.xor_padded_right(other).count_ones()
    }

    fn clear_padding(&mut self) {
        let used = self.len % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xff << (8 - used);
            }
        }
    }
}

impl core::fmt::Debug for BitString {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BitString({}, ", self.len)?;
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl From<BitString> for RawBitString {
    fn from(bits: BitString) -> Self {
        Self {
            len: bits.len,
            bytes: bits.bytes,
        }
    }
}

impl TryFrom<RawBitString> for BitString {
    type Error = FcsError;

    fn try_from(raw: RawBitString) -> Result<Self, Self::Error> {
        Self::from_bytes_with_len(&raw.bytes, raw.len)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Self::default();
        for bit in iter {
            if bits.len % 8 == 0 {
                bits.bytes.push(0);
            }
            bits.len += 1;
            if bit {
                bits.flip(bits.len - 1);
            }
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.chars().map(|c| c == '1').collect()
    }

    /// Reverse both, XOR with the shorter left-padded, reverse back.
    fn reverse_xor_reverse(a: &BitString, b: &BitString) -> BitString {
        let (a, b) = (a.reversed(), b.reversed());
        let width = a.len().max(b.len());
        let left_pad = |x: &BitString| -> BitString {
            core::iter::repeat_n(false, width - x.len())
                .chain(x.iter())
                .collect()
        };
        let (a, b) = (left_pad(&a), left_pad(&b));
        let xored: BitString = a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect();
        xored.reversed()
    }

    #[test]
    fn test_from_bytes_is_big_endian() {
        let b = BitString::from_bytes(&[0b1010_0000, 0x01]);
        assert_eq!(b.len(), 16);
        assert_eq!(b.get(0), Some(true));
        assert_eq!(b.get(1), Some(false));
        assert_eq!(b.get(2), Some(true));
        assert_eq!(b.get(15), Some(true));
        assert_eq!(b.get(16), None);
    }

    #[test]
    fn test_from_bytes_with_len_masks_padding() {
        let b = BitString::from_bytes_with_len(&[0xff, 0xff], 12).expect("bits");
        assert_eq!(b.as_bytes(), &[0xff, 0xf0]);
        assert_eq!(b.count_ones(), 12);

        let err = BitString::from_bytes_with_len(&[0xff], 12).unwrap_err();
        assert_eq!(err, FcsError::MalformedEncoding { expected: 2, got: 1 });
    }

    #[test]
    fn test_xor_pads_shorter_operand_on_the_right() {
        let long = bits("110011001");
        let short = bits("101");
        let xored = long.xor_padded_right(&short);
        assert_eq!(xored, bits("011011001"));
        assert_eq!(short.xor_padded_right(&long), xored);
    }

    #[test]
    fn test_xor_matches_reversal_alignment() {
        let long = BitString::from_bytes(&[0xde, 0xad, 0xbe, 0xef, 0x42]);
        let short: BitString = bits("1011001110001");
        assert_eq!(
            long.xor_padded_right(&short),
            reverse_xor_reverse(&long, &short)
        );
    }

    #[test]
    fn test_xor_is_self_inverse() {
        let codeword = BitString::from_bytes(&[0x12, 0x34, 0x56]);
        let witness = bits("1111000011");
        let masked = codeword.xor_padded_right(&witness);
        assert_eq!(masked.xor_padded_right(&witness), codeword);
        assert_eq!(masked.hamming_distance(&codeword), 6);
    }

    #[test]
    fn test_reversed() {
        assert_eq!(bits("1101000").reversed(), bits("0001011"));
        assert_eq!(BitString::default().reversed(), BitString::default());
    }

    #[test]
    fn test_set_and_flip() {
        let mut b = BitString::zeros(10);
        b.set(9, true);
        b.flip(0);
        assert_eq!(b, bits("1000000001"));
        b.set(9, false);
        assert_eq!(b.count_ones(), 1);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_length() {
        let raw = RawBitString {
            len: 20,
            bytes: vec![0u8; 2],
        };
        assert!(BitString::try_from(raw).is_err());
    }
}
