//! Binary BCH error-correcting codes over GF(2^13).
//!
//! This crate provides the field arithmetic, the [`Codec`] trait consumed by
//! schemes that need a systematic noise-tolerant code, and [`Bch`], a
//! t-error-correcting binary BCH code shortened to the data length in use.

mod bch;
mod codec;
mod field;

pub use bch::Bch;
pub use codec::{Codec, CodecError, Correction, Decoded};
pub use field::{FIELD_DEGREE, GROUP_ORDER, Gf8192, PRIMITIVE_POLYNOMIAL};
