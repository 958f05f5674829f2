//! Fuzzy commitment scheme over binary BCH codes.
//!
//! This library implements the fuzzy commitment of Juels and Wattenberg:
//! - A message (random, or supplied by the caller) is encoded with a
//!   `t`-error-correcting BCH code over GF(2^13)
//! - The codeword is masked with a noisy witness, such as a biometric reading
//! - SHA-256 of the message serves as a pseudonym to check recovered messages
//!
//! # Overview
//!
//! A commitment can be opened with any witness that differs from the enrolled
//! one in at most `t` bits. The commitment provides:
//! - Hiding: the commitment reveals nothing useful about the message or the
//!   witness to anyone without a close witness
//! - Binding: it cannot be opened to a different message
//! - Noise tolerance: up to `t` flipped witness bits are corrected
//!
//! # Example
//!
//! ```
//! use fuzzy::{FcsParams, FuzzyCommitmentScheme};
//! use rand::{Rng, SeedableRng};
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // 256-bit witnesses, two bit errors tolerated
//! let scheme = FuzzyCommitmentScheme::new(FcsParams::new(256, 2)).expect("scheme");
//!
//! // Enroll
//! let mut witness = [0u8; 32];
//! rng.fill(&mut witness[..]);
//! let message = b"attack at dawn, bring snacks!!!!";
//! let commitment = scheme
//!     .commit(&mut rng, &witness, Some(&message[..]))
//!     .expect("commit");
//!
//! // A reading with two flipped bits still opens the commitment
//! let mut reading = witness;
//! reading[0] ^= 0x04;
//! reading[9] ^= 0x40;
//! let opened = scheme.open(&commitment, &reading).expect("open");
//! assert_eq!(opened.as_deref(), Some(&message[..]));
//!
//! // Three flipped bits do not
//! reading[20] ^= 0x01;
//! assert!(!scheme.verify(&commitment, &reading).expect("verify"));
//! ```
//!
//! # Security Considerations
//!
//! - Always use a cryptographically secure random number generator (CSRNG)
//! - Use the same extractor for commit and open
//! - Witness bits must carry enough entropy; the code's parity reduces it
//! - Opening is constant-time in where the pseudonym comparison fails

mod bits;
mod commitment;
mod constants;
mod errors;
mod extractor;
mod params;
mod scheme;
mod witness_bytes;


pub use bits::BitString;
pub use commitment::Commitment;
pub use constants::{MAX_CODEWORD_BITS, PSEUDONYM_SIZE};
pub use errors::FcsError;
pub use extractor::{ByteExtractor, Extractor, FnExtractor};
pub use params::FcsParams;
pub use scheme::FuzzyCommitmentScheme;
