//! Canonical byte encoding of witness values.
//!
//! A value has a canonical byte encoding when it is made only of bytes and
//! integers: byte buffers, sequences, arrays, tuples and newtypes thereof.
//! Integers are written big-endian at their natural width, sequences are
//! concatenated without length prefixes. Everything else is rejected.

use core::fmt::Display;

use serde::ser::{self, Impossible, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum WitnessBytesError {
    #[error("{0} values have no canonical byte encoding")]
    Unsupported(&'static str),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for WitnessBytesError {
    fn custom<T: Display>(msg: T) -> Self {
        WitnessBytesError::Custom(msg.to_string())
    }
}

/// Encodes `value` into its canonical bytes.
pub(crate) fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, WitnessBytesError> {
    let mut serializer = WitnessBytesSerializer { output: Vec::new() };
    value.serialize(&mut serializer)?;
    Ok(serializer.output)
}

struct WitnessBytesSerializer {
    output: Vec<u8>,
}

type Rejected = Impossible<(), WitnessBytesError>;

impl ser::Serializer for &mut WitnessBytesSerializer {
    type Ok = ();
    type Error = WitnessBytesError;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Rejected;
    type SerializeMap = Rejected;
    type SerializeStruct = Rejected;
    type SerializeStructVariant = Rejected;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, _v: bool) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("boolean"))
    }

    fn serialize_i8(self, v: i8) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<(), WitnessBytesError> {
        self.output.push(v);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_f32(self, _v: f32) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("floating-point"))
    }

    fn serialize_f64(self, _v: f64) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("floating-point"))
    }

    fn serialize_char(self, _v: char) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("character"))
    }

    fn serialize_str(self, _v: &str) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("string"))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), WitnessBytesError> {
        self.output.extend_from_slice(v);
        Ok(())
    }

    fn serialize_none(self) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("optional"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("optional"))
    }

    fn serialize_unit(self) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("enum"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), WitnessBytesError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, WitnessBytesError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, WitnessBytesError> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, WitnessBytesError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, WitnessBytesError> {
        Err(WitnessBytesError::Unsupported("enum"))
    }
}

impl ser::SerializeSeq for &mut WitnessBytesSerializer {
    type Ok = ();
    type Error = WitnessBytesError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WitnessBytesError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), WitnessBytesError> {
        Ok(())
    }
}

impl ser::SerializeTuple for &mut WitnessBytesSerializer {
    type Ok = ();
    type Error = WitnessBytesError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WitnessBytesError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), WitnessBytesError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for &mut WitnessBytesSerializer {
    type Ok = ();
    type Error = WitnessBytesError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WitnessBytesError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), WitnessBytesError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Reading([u8; 4]);

    #[derive(Serialize)]
    struct Sample {
        value: u8,
    }

    #[test]
    fn test_byte_containers_pass_through() {
        let raw = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(to_bytes(&raw).expect("array"), raw);
        assert_eq!(to_bytes(&raw[..]).expect("slice"), raw);
        assert_eq!(to_bytes(&raw.to_vec()).expect("vec"), raw);
        assert_eq!(to_bytes(&Reading(raw)).expect("newtype"), raw);
    }

    #[test]
    fn test_integers_are_big_endian() {
        assert_eq!(to_bytes(&0x0102u16).expect("u16"), [0x01, 0x02]);
        assert_eq!(to_bytes(&-2i32).expect("i32"), [0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(
            to_bytes(&(7u8, 0x0a0bu16)).expect("tuple"),
            [0x07, 0x0a, 0x0b]
        );
    }

    #[test]
    fn test_rejects_non_byte_values() {
        assert!(matches!(to_bytes("witness"), Err(WitnessBytesError::Unsupported("string"))));
        assert!(matches!(to_bytes(&1.5f64), Err(WitnessBytesError::Unsupported("floating-point"))));
        assert!(matches!(to_bytes(&Some(3u8)), Err(WitnessBytesError::Unsupported("optional"))));
        assert!(matches!(to_bytes(&Sample { value: 1 }), Err(WitnessBytesError::Unsupported("struct"))));
        assert!(matches!(to_bytes(&vec![true]), Err(WitnessBytesError::Unsupported("boolean"))));
    }
}
