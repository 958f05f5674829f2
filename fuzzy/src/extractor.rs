//! Conversion of witness values into bit strings.

use core::any::type_name;

use serde::Serialize;

use crate::bits::BitString;
use crate::errors::FcsError;
use crate::witness_bytes;

/// Strategy turning a witness of type `K` into the bits the scheme binds.
///
/// Implementations must be deterministic. For a fuzzy commitment to be
/// useful, readings of the same physical witness should map to bit strings
/// that are close in Hamming distance.
pub trait Extractor<K: ?Sized> {
    fn extract(&self, value: &K) -> Result<BitString, FcsError>;
}

/// Default extractor: the big-endian bits of the value's canonical bytes.
///
/// Byte buffers, byte arrays, integers and sequences or tuples of those are
/// supported. Strings, floats, options, structs, maps and enums fail with
/// [`FcsError::UnsupportedWitnessType`].
///
/// # Example
///
/// ```
/// use fuzzy::{ByteExtractor, Extractor};
///
/// let bits = ByteExtractor.extract(&[0x80u8, 0x01]).expect("bytes");
/// assert_eq!(bits.len(), 16);
/// assert_eq!(bits.get(0), Some(true));
///
/// assert!(ByteExtractor.extract("not bytes").is_err());
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ByteExtractor;

impl<K: Serialize + ?Sized> Extractor<K> for ByteExtractor {
    fn extract(&self, value: &K) -> Result<BitString, FcsError> {
        let bytes = witness_bytes::to_bytes(value).map_err(|err| {
            FcsError::UnsupportedWitnessType {
                type_name: type_name::<K>(),
                reason: err.to_string(),
            }
        })?;
        Ok(BitString::from_bytes(&bytes))
    }
}

/// Adapts a closure into an [`Extractor`].
///
/// ```
/// use fuzzy::{BitString, Extractor, FcsError, FnExtractor};
///
/// let low_byte = FnExtractor(|value: &u32| -> Result<BitString, FcsError> {
///     Ok(BitString::from_bytes(&[*value as u8]))
/// });
/// assert_eq!(low_byte.extract(&0x1ffu32).expect("bits").as_bytes(), &[0xff]);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct FnExtractor<F>(pub F);

impl<K, F> Extractor<K> for FnExtractor<F>
where
    K: ?Sized,
    F: Fn(&K) -> Result<BitString, FcsError>,
{
    fn extract(&self, value: &K) -> Result<BitString, FcsError> {
        (self.0)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_extractor_names_rejected_type() {
        let err = ByteExtractor.extract(&2.5f32).unwrap_err();
        match err {
            FcsError::UnsupportedWitnessType { type_name, reason } => {
                assert_eq!(type_name, "f32");
                assert!(reason.contains("floating-point"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_byte_extractor_keeps_bit_order() {
        let bits = ByteExtractor.extract(&vec![0x01u8, 0x80]).expect("bits");
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.get(7), Some(true));
        assert_eq!(bits.get(8), Some(true));
        assert_eq!(bits.count_ones(), 2);
    }

    #[test]
    fn test_fn_extractor_passes_bit_strings_through() {
        let passthrough = FnExtractor(|bits: &BitString| -> Result<BitString, FcsError> {
            Ok(bits.clone())
        });
        let bits: BitString = [true, false, true].into_iter().collect();
        assert_eq!(passthrough.extract(&bits).expect("bits"), bits);
    }

    #[test]
    fn test_error_message_asks_for_custom_extractor() {
        let err = ByteExtractor.extract("hello").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`str`"));
        assert!(message.contains("custom extractor"));
    }
}
