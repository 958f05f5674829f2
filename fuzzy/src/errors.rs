//! Error types for the fuzzy commitment scheme.

use bch::CodecError;
use thiserror::Error;

/// Errors that can occur while building a scheme or committing and opening.
///
/// A candidate witness that is too far from the committed one is not an
/// error: `open` returns `Ok(None)` and `verify` returns `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FcsError {
    /// The extractor cannot turn the witness value into bits.
    ///
    /// The default extractor only understands byte sequences, byte arrays and
    /// integers. Anything else needs a custom extractor.
    #[error(
        "type `{type_name}` is not directly convertible to bytes ({reason}); \
         supply a custom extractor"
    )]
    UnsupportedWitnessType {
        type_name: &'static str,
        reason: String,
    },

    /// The extracted witness is longer than the scheme's witness length.
    #[error("witness exceeds the given maximum length ({got}>{max})")]
    WitnessTooLong { got: usize, max: usize },

    /// A caller-supplied message yields a codeword shorter than the witness,
    /// which would leave witness bits unmasked.
    #[error("codeword of {codeword_bits} bits cannot cover a {witness_bits}-bit witness")]
    MessageTooShort {
        codeword_bits: usize,
        witness_bits: usize,
    },

    /// A caller-supplied message does not fit into a single codeword.
    #[error("message of {got} bytes exceeds the maximum of {max} bytes")]
    MessageTooLong { got: usize, max: usize },

    /// Scheme parameters are unusable.
    #[error("invalid scheme parameters: {0}")]
    InvalidParams(String),

    /// A serialized commitment or bit string has the wrong size.
    #[error("malformed encoding: expected {expected} bytes, got {got}")]
    MalformedEncoding { expected: usize, got: usize },

    /// The error-correcting codec rejected its input.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
