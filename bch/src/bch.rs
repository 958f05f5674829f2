//! Binary BCH codes over GF(2^13).
//!
//! The code is narrow-sense: the generator polynomial is the least common
//! multiple of the minimal polynomials of `alpha^1 .. alpha^(2t)`. Codewords
//! are shortened to the data length actually supplied, so any block of up to
//! `max_data_bytes` bytes can be protected.
//!
//! Bit order is MSB-first throughout. In a codeword of `n` bits, bit `i`
//! (counting from the first data bit) is the coefficient of `x^(n - 1 - i)`.

use crate::codec::{Codec, CodecError, Correction, Decoded};
use crate::field::{GROUP_ORDER, Gf8192};

/// Binary BCH code correcting up to `t` bit errors per codeword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bch {
    tolerance: usize,
    ecc_bits: usize,
    /// Generator coefficients of `x^0 .. x^(ecc_bits - 1)`, packed
    /// little-endian into words. The leading `x^ecc_bits` term is implicit.
    generator: Vec<u64>,
}

impl Bch {
    /// Builds the code correcting `tolerance` bit errors.
    ///
    /// `tolerance == 0` yields a code without parity which never corrects
    /// anything.
    pub fn new(tolerance: usize) -> Result<Self, CodecError> {
        let too_large = CodecError::ToleranceTooLarge {
            tolerance,
            code_length: GROUP_ORDER,
        };
        if tolerance >= GROUP_ORDER / 2 {
            return Err(too_large);
        }

        let generator = generator_polynomial(tolerance);
        let ecc_bits = generator.len() - 1;
        // at least one data byte must fit next to the parity
        if ecc_bits + 8 > GROUP_ORDER {
            return Err(too_large);
        }

        let mut packed = vec![0u64; ecc_bits.div_ceil(64)];
        for (degree, _) in generator[..ecc_bits]
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
        {
            packed[degree / 64] |= 1 << (degree % 64);
        }

        Ok(Self {
            tolerance,
            ecc_bits,
            generator: packed,
        })
    }

    fn check_data_len(&self, len: usize) -> Result<(), CodecError> {
        let max = self.max_data_bytes();
        if len > max {
            return Err(CodecError::DataTooLong { got: len, max });
        }
        Ok(())
    }

    /// Remainder of `d(x) * x^r` modulo the generator, as a bit register
    /// laid out like `self.generator`.
    fn parity_register(&self, data: &[u8]) -> Vec<u64> {
        let r = self.ecc_bits;
        let mut reg = vec![0u64; self.generator.len()];
        if r == 0 {
            return reg;
        }

        let top_word = (r - 1) / 64;
        let top_bit = (r - 1) % 64;
        for bit in bits_msb_first(data) {
            let feedback = bit ^ ((reg[top_word] >> top_bit) & 1 == 1);
            shift_left_one(&mut reg, r);
            if feedback {
                for (word, g) in reg.iter_mut().zip(&self.generator) {
                    *word ^= g;
                }
            }
        }
        reg
    }

    /// Syndromes `S_1 .. S_2t` of the received word.
    fn syndromes(&self, data: &[u8], ecc: &[u8], n: usize) -> Vec<Gf8192> {
        let two_t = 2 * self.tolerance;
        let mut syndromes = vec![Gf8192::ZERO; two_t];

        let set_exponents = bits_msb_first(data)
            .chain(bits_msb_first(ecc).take(self.ecc_bits))
            .enumerate()
            .filter(|(_, bit)| *bit)
            .map(|(i, _)| n - 1 - i);
        for e in set_exponents {
            for j in (1..=two_t).step_by(2) {
                syndromes[j - 1] += Gf8192::alpha_pow(j * e);
            }
        }
        // S_2j = S_j^2 over a binary field
        for j in (2..=two_t).step_by(2) {
            syndromes[j - 1] = syndromes[j / 2 - 1].square();
        }
        syndromes
    }
}

impl Codec for Bch {
    fn tolerance(&self) -> usize {
        self.tolerance
    }

    fn ecc_bits(&self) -> usize {
        self.ecc_bits
    }

    fn max_data_bytes(&self) -> usize {
        (GROUP_ORDER - self.ecc_bits) / 8
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.check_data_len(data.len())?;

        let r = self.ecc_bits;
        let reg = self.parity_register(data);
        let mut ecc = vec![0u8; self.ecc_bytes()];
        for p in 0..r {
            let degree = r - 1 - p;
            if (reg[degree / 64] >> (degree % 64)) & 1 == 1 {
                ecc[p / 8] |= 0x80 >> (p % 8);
            }
        }
        Ok(ecc)
    }

    fn decode(&self, data: &[u8], ecc: &[u8]) -> Result<Decoded, CodecError> {
        self.check_data_len(data.len())?;
        if ecc.len() != self.ecc_bytes() {
            return Err(CodecError::EccLengthMismatch {
                expected: self.ecc_bytes(),
                got: ecc.len(),
            });
        }

        let mut decoded = Decoded {
            correction: Correction::Corrected(0),
            data: data.to_vec(),
            ecc: ecc.to_vec(),
        };
        if self.tolerance == 0 {
            return Ok(decoded);
        }

        let data_bits = 8 * data.len();
        let n = data_bits + self.ecc_bits;
        let syndromes = self.syndromes(data, ecc, n);
        if syndromes.iter().all(|s| s.is_zero()) {
            return Ok(decoded);
        }

        let (locator, degree) = berlekamp_massey(&syndromes);
        if degree > self.tolerance {
            decoded.correction = Correction::Uncorrectable;
            return Ok(decoded);
        }

        let positions = chien_search(&locator, n);
        if positions.len() != degree {
            decoded.correction = Correction::Uncorrectable;
            return Ok(decoded);
        }

        for i in positions {
            if i < data_bits {
                decoded.data[i / 8] ^= 0x80 >> (i % 8);
            } else {
                let p = i - data_bits;
                decoded.ecc[p / 8] ^= 0x80 >> (p % 8);
            }
        }
        decoded.correction = Correction::Corrected(degree);
        Ok(decoded)
    }
}

/// Generator polynomial over GF(2), indexed by degree.
fn generator_polynomial(tolerance: usize) -> Vec<bool> {
    // union of the cyclotomic cosets of 1 .. 2t
    let mut is_root = vec![false; GROUP_ORDER];
    for j in 1..=2 * tolerance {
        let mut e = j;
        while !is_root[e] {
            is_root[e] = true;
            e = (2 * e) % GROUP_ORDER;
        }
    }

    let mut poly = vec![Gf8192::ONE];
    for e in (0..GROUP_ORDER).filter(|&e| is_root[e]) {
        let root = Gf8192::alpha_pow(e);
        poly.push(Gf8192::ZERO);
        for i in (1..poly.len()).rev() {
            poly[i] = poly[i - 1] + root * poly[i];
        }
        poly[0] = root * poly[0];
    }

    poly.into_iter()
        .map(|c| {
            debug_assert!(c.to_bits() <= 1, "generator coefficient outside GF(2)");
            c == Gf8192::ONE
        })
        .collect()
}

/// Error locator polynomial and its linear complexity.
///
/// The returned vector always has `degree + 1` entries; the leading entry may
/// be zero, in which case the locator has fewer roots than its degree.
fn berlekamp_massey(syndromes: &[Gf8192]) -> (Vec<Gf8192>, usize) {
    let mut current = vec![Gf8192::ONE];
    let mut previous = vec![Gf8192::ONE];
    let mut degree = 0usize;
    let mut shift = 1usize;
    let mut last_discrepancy = Gf8192::ONE;

    for n in 0..syndromes.len() {
        let mut discrepancy = syndromes[n];
        for i in 1..=degree {
            if let Some(c) = current.get(i) {
                discrepancy += *c * syndromes[n - i];
            }
        }
        if discrepancy.is_zero() {
            shift += 1;
            continue;
        }

        let scale = discrepancy / last_discrepancy;
        let snapshot = current.clone();
        if current.len() < previous.len() + shift {
            current.resize(previous.len() + shift, Gf8192::ZERO);
        }
        for (i, b) in previous.iter().enumerate() {
            current[i + shift] += scale * *b;
        }

        if 2 * degree <= n {
            degree = n + 1 - degree;
            previous = snapshot;
            last_discrepancy = discrepancy;
            shift = 1;
        } else {
            shift += 1;
        }
    }

    current.resize(degree + 1, Gf8192::ZERO);
    (current, degree)
}

/// Codeword positions whose inverse locator is a root of `locator`.
fn chien_search(locator: &[Gf8192], n: usize) -> Vec<usize> {
    (0..n)
        .filter(|&i| {
            let exponent = n - 1 - i;
            let x = Gf8192::alpha_pow(GROUP_ORDER - exponent);
            locator
                .iter()
                .rev()
                .fold(Gf8192::ZERO, |acc, &c| acc * x + c)
                .is_zero()
        })
        .collect()
}

fn bits_msb_first(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |s| (byte >> s) & 1 == 1))
}

/// Multiplies the register by `x`, dropping the coefficient of `x^width`.
fn shift_left_one(reg: &mut [u64], width: usize) {
    let mut carry = 0u64;
    for word in reg.iter_mut() {
        let next = *word >> 63;
        *word = (*word << 1) | carry;
        carry = next;
    }
    if width % 64 != 0 {
        if let Some(top) = reg.last_mut() {
            *top &= (1u64 << (width % 64)) - 1;
        }
    }
}
