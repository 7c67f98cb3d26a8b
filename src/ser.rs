//! Record flattening.
//!
//! This module provides the [`Serializer`] implementation that walks any
//! `T: Serialize` depth-first, in field-declaration order, and emits one
//! `(flat key, string value)` pair per terminal scalar into a [`FlatMap`].
//!
//! ## Value rendering
//!
//! Scalar values render with a fixed wire format shared with the
//! deserializer:
//!
//! - **Integers**: base-10, sign only if negative (`2`, `-7`)
//! - **Booleans**: the literals `true` / `false`
//! - **Floats**: normalized uppercase scientific notation with a signed
//!   two-digit-minimum exponent and the shortest round-tripping mantissa
//!   (`3.14f32` renders as `3.14E+00`, `2.0` as `2E+00`)
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_flatmap::to_flat_map;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let map = to_flat_map(&Data { x: 1, y: 2 }).unwrap();
//! assert_eq!(map.get("x"), Some("1"));
//! assert_eq!(map.get("y"), Some("2"));
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_flatmap::{FlatOptions, Serializer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32 }
//!
//! let mut serializer = Serializer::new(FlatOptions::default());
//! Data { x: 7 }.serialize(&mut serializer).unwrap();
//! let map = serializer.into_inner();
//! assert_eq!(map.get("x"), Some("7"));
//! ```

use crate::key::KeyPath;
use crate::{Error, FlatMap, FlatOptions, Result};
use serde::ser::Impossible;
use serde::{ser, Serialize};

/// The flattening serializer.
///
/// Accumulates `(key, value)` pairs into a [`FlatMap`] while walking the
/// record. Created via [`Serializer::new`]; the finished map is recovered
/// with [`Serializer::into_inner`].
pub struct Serializer {
    map: FlatMap,
    options: FlatOptions,
    path: KeyPath,
    in_element: bool,
}

impl Serializer {
    pub fn new(options: FlatOptions) -> Self {
        Serializer {
            map: FlatMap::new(),
            options,
            path: KeyPath::new(),
            in_element: false,
        }
    }

    pub fn into_inner(self) -> FlatMap {
        self.map
    }

    fn current_key(&self) -> String {
        self.path.render(self.options.prefix.as_deref(), &self.options.delimiter)
    }

    /// Key to report in errors; the record root has no key of its own.
    fn key_for_errors(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.current_key()
        }
    }

    fn emit(&mut self, kind: &'static str, value: String) -> Result<()> {
        if self.path.is_empty() {
            // Only records can be flattened; a bare scalar has no key.
            return Err(Error::unsupported("(root)", kind));
        }
        let key = self.current_key();
        self.map.insert(key, value);
        Ok(())
    }

    fn unsupported(&self, kind: &str) -> Error {
        Error::unsupported(&self.key_for_errors(), kind)
    }
}

/// Renders a float in normalized uppercase scientific notation with a
/// signed exponent padded to at least two digits.
///
/// Rust's `UpperExp` already produces the shortest round-tripping mantissa
/// for the value's width; only the exponent needs reshaping (`3.14E0`
/// becomes `3.14E+00`).
fn format_exp<F: std::fmt::UpperExp>(value: F) -> String {
    let formatted = format!("{value:E}");
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ("-", digits),
                None => ("+", exponent),
            };
            format!("{mantissa}E{sign}{digits:0>2}")
        }
        // NaN and infinities carry no exponent
        None => formatted,
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.emit("bool", if v { "true" } else { "false" }.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.emit("integer", v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.emit("integer", v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.emit("integer", v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.emit("integer", v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.emit("float", format_exp(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.emit("float", format_exp(v))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.emit("char", v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.emit("string", v.to_string())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(self.unsupported("option"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(self.unsupported("option"))
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(self.unsupported("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(self.unsupported("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(self.unsupported("enum"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(self.unsupported("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        if self.in_element {
            return Err(self.unsupported("nested collection"));
        }
        if self.path.is_empty() {
            return Err(Error::unsupported("(root)", "sequence"));
        }
        Ok(SeqSerializer { ser: self, index: 0 })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.unsupported("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.unsupported("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        if self.in_element {
            return Err(self.unsupported("record element in collection"));
        }
        Ok(StructSerializer { ser: self })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.unsupported("enum"))
    }
}

/// Serializes collection elements under decimal index segments.
///
/// Elements must be scalars; collections of records or of further
/// collections abort with an unsupported-kind error.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    index: usize,
}

impl SeqSerializer<'_> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.path.push_index(self.index);
        self.ser.in_element = true;
        let result = value.serialize(&mut *self.ser);
        self.ser.in_element = false;
        self.ser.path.pop();
        self.index += 1;
        result
    }
}

impl ser::SerializeSeq for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl ser::SerializeTuple for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

/// Serializes struct fields under field-name segments, recursing into
/// nested records.
pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
}

impl ser::SerializeStruct for StructSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.path.push(key);
        let result = value.serialize(&mut *self.ser);
        self.ser.path.pop();
        result
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_wire_format() {
        assert_eq!(format_exp(3.14f32), "3.14E+00");
        assert_eq!(format_exp(2.0f32), "2E+00");
        assert_eq!(format_exp(0.0f32), "0E+00");
        assert_eq!(format_exp(-2.5f64), "-2.5E+00");
        assert_eq!(format_exp(1e20f64), "1E+20");
        assert_eq!(format_exp(1e-5f64), "1E-05");
        assert_eq!(format_exp(5e-324f64), "5E-324");
    }

    #[test]
    fn float_wire_format_round_trips() {
        let rendered = format_exp(3.14f32);
        assert_eq!(rendered.parse::<f32>().unwrap(), 3.14f32);

        let rendered = format_exp(0.1f64 + 0.2f64);
        assert_eq!(rendered.parse::<f64>().unwrap(), 0.1f64 + 0.2f64);
    }
}
