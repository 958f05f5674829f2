//! Scheme parameters.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_CODEWORD_BITS;
use crate::errors::FcsError;

/// Parameters fixed when a scheme is built.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `witness_bits` | Maximum witness length `k`, in bits |
/// | `tolerance` | Bit errors `t` tolerated between enrollment and verification |
///
/// # Example
///
/// ```
/// use fuzzy::FcsParams;
///
/// let params = FcsParams::new(256, 2);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.message_bytes(), 32);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FcsParams {
    pub witness_bits: usize,
    pub tolerance: usize,
}

impl FcsParams {
    pub const fn new(witness_bits: usize, tolerance: usize) -> Self {
        Self {
            witness_bits,
            tolerance,
        }
    }

    /// Length of the random message drawn when none is supplied.
    ///
    /// Rounded up to whole bytes so the message part of the codeword alone
    /// covers the witness.
    pub const fn message_bytes(&self) -> usize {
        self.witness_bits.div_ceil(8)
    }

    /// Checks the codec-independent invariants.
    pub fn validate(&self) -> Result<(), FcsError> {
        if self.witness_bits == 0 {
            return Err(FcsError::InvalidParams(
                "witness length must be at least one bit".into(),
            ));
        }
        if 8 * self.message_bytes() > MAX_CODEWORD_BITS {
            return Err(FcsError::InvalidParams(format!(
                "witness length {} exceeds the codeword limit of {} bits",
                self.witness_bits, MAX_CODEWORD_BITS
            )));
        }
        Ok(())
    }
}
