//! The commitment artifact.

use serde::{Deserialize, Serialize};

use crate::bits::BitString;
use crate::constants::PSEUDONYM_SIZE;
use crate::errors::FcsError;

/// A fuzzy commitment to a message under a witness.
///
/// The commitment is a pair `(pseudonym, auxiliar)`:
/// - `pseudonym` is the SHA-256 digest of the committed message and is only
///   used to check a recovered message.
/// - `auxiliar` is the codeword of the message XOR-ed with the witness. It is
///   the sole link between witness and message and may be published.
///
/// Commitments are immutable once created and can be opened any number of
/// times, concurrently.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment {
    pseudonym: [u8; PSEUDONYM_SIZE],
    auxiliar: BitString,
}

impl Commitment {
    /// Reassembles a commitment from its two parts.
    pub fn from_parts(pseudonym: [u8; PSEUDONYM_SIZE], auxiliar: BitString) -> Self {
        Self {
            pseudonym,
            auxiliar,
        }
    }

    pub fn pseudonym(&self) -> &[u8; PSEUDONYM_SIZE] {
        &self.pseudonym
    }

    pub fn auxiliar(&self) -> &BitString {
        &self.auxiliar
    }

    /// Codeword length `n` in bits.
    pub fn codeword_bits(&self) -> usize {
        self.auxiliar.len()
    }

    /// Encodes the commitment as `pseudonym || auxiliar`, the auxiliar
    /// zero-padded to a byte boundary.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PSEUDONYM_SIZE + self.auxiliar.as_bytes().len());
        out.extend_from_slice(&self.pseudonym);
        out.extend_from_slice(self.auxiliar.as_bytes());
        out
    }

    /// Decodes the output of [`Commitment::to_bytes`] for a codeword of
    /// `codeword_bits` bits. Padding bits are masked off.
    pub fn from_bytes(bytes: &[u8], codeword_bits: usize) -> Result<Self, FcsError> {
        let expected = PSEUDONYM_SIZE + codeword_bits.div_ceil(8);
        if bytes.len() != expected {
            return Err(FcsError::MalformedEncoding {
                expected,
                got: bytes.len(),
            });
        }
        let (digest, auxiliar) = bytes.split_at(PSEUDONYM_SIZE);
        let mut pseudonym = [0u8; PSEUDONYM_SIZE];
        pseudonym.copy_from_slice(digest);
        Ok(Self {
            pseudonym,
            auxiliar: BitString::from_bytes_with_len(auxiliar, codeword_bits)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_encoding_masks_padding() {
        let auxiliar = BitString::from_bytes_with_len(&[0xab, 0xc0], 10).expect("bits");
        let commitment = Commitment::from_parts([7u8; PSEUDONYM_SIZE], auxiliar);
        let bytes = commitment.to_bytes();
        assert_eq!(bytes.len(), PSEUDONYM_SIZE + 2);

        let mut dirty = bytes.clone();
        *dirty.last_mut().expect("byte") |= 0x3f;
        let decoded = Commitment::from_bytes(&dirty, 10).expect("decode");
        assert_eq!(decoded, commitment);
    }

    #[test]
    fn test_from_bytes_checks_length() {
        let err = Commitment::from_bytes(&[0u8; PSEUDONYM_SIZE + 3], 32).unwrap_err();
        assert_eq!(
            err,
            FcsError::MalformedEncoding {
                expected: PSEUDONYM_SIZE + 4,
                got: PSEUDONYM_SIZE + 3
            }
        );
    }
}
