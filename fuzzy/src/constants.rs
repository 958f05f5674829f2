//! Constants used by the fuzzy commitment scheme.

/// Size of a commitment pseudonym in bytes.
///
/// The pseudonym is the SHA-256 digest of the committed message.
pub const PSEUDONYM_SIZE: usize = 32;

/// Longest codeword the underlying BCH code can carry, in bits.
///
/// Codewords are shortened BCH codewords over GF(2^13), so data and parity
/// together never exceed `2^13 - 1` bits.
pub const MAX_CODEWORD_BITS: usize = bch::GROUP_ORDER;
