use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by an error-correcting codec.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The data block does not fit into a single codeword.
    #[error("data block of {got} bytes exceeds the codeword capacity of {max} bytes")]
    DataTooLong { got: usize, max: usize },

    /// The parity block handed to `decode` has the wrong size.
    #[error("parity block must be {expected} bytes, got {got}")]
    EccLengthMismatch { expected: usize, got: usize },

    /// No code of the requested tolerance leaves room for data.
    #[error("tolerance {tolerance} leaves no room for data in a code of length {code_length}")]
    ToleranceTooLarge { tolerance: usize, code_length: usize },
}

/// Outcome of the error-correction step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Correction {
    /// The word was within tolerance; this many bits were flipped back.
    Corrected(usize),
    /// More errors than the code can correct were detected.
    Uncorrectable,
}

impl Correction {
    #[inline]
    pub fn is_corrected(&self) -> bool {
        matches!(self, Correction::Corrected(_))
    }

    #[inline]
    pub fn bitflips(&self) -> Option<usize> {
        match self {
            Correction::Corrected(n) => Some(*n),
            Correction::Uncorrectable => None,
        }
    }
}

/// Result of decoding a (data, parity) pair.
///
/// When `correction` is [`Correction::Uncorrectable`] the blocks are returned as
/// received. Callers may still hash them; they carry no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub correction: Correction,
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// A systematic, byte-oriented error-correcting code.
///
/// A codeword is `data || ecc` where `ecc = encode(data)`. Implementations
/// must be deterministic and safe to share across threads.
pub trait Codec {
    /// Maximum number of bit errors corrected per codeword.
    fn tolerance(&self) -> usize;

    /// Number of meaningful parity bits.
    fn ecc_bits(&self) -> usize;

    /// Parity block size in bytes; unused trailing bits are zero.
    #[inline]
    fn ecc_bytes(&self) -> usize {
        self.ecc_bits().div_ceil(8)
    }

    /// Largest data block accepted by `encode` and `decode`.
    fn max_data_bytes(&self) -> usize;

    /// Computes the parity block for `data`.
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Corrects errors in `data || ecc`.
    ///
    /// Exceeding the tolerance is not an `Err`; it is reported through
    /// [`Decoded::correction`].
    fn decode(&self, data: &[u8], ecc: &[u8]) -> Result<Decoded, CodecError>;
}
