//! Record reconstruction.
//!
//! This module provides the [`Deserializer`] implementation that rebuilds
//! a typed record from a [`FlatMap`]. The walk is driven by the target
//! type's shape, mirroring the serializer: every declared field extends
//! the current key path, and terminal scalars are looked up and parsed
//! with the exact inverse of the serializer's rendering rules.
//!
//! ## Missing keys
//!
//! Scalar keys absent from the map follow the configured
//! [`MissingKeys`](crate::MissingKeys) policy: lenient (the default)
//! leaves the field at its zero value, strict fails with a missing-key
//! error. Fixed-size arrays are exempt; every declared slot is mandatory
//! in both modes.
//!
//! ## Collections
//!
//! The element count of a `Vec` is discovered by probing keys at indices
//! `0, 1, 2, ...` and stopping at the first absent index. Sparse index
//! runs are not supported; entries after a gap are ignored. An index that
//! is absent as a bare key but still has keys nested beneath it (e.g.
//! `items.0.id` with no `items.0`) marks a compound element and fails
//! with an unsupported-kind error rather than ending the run.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_flatmap::{from_flat_map, FlatMap};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let mut map = FlatMap::new();
//! map.insert("x".to_string(), "1".to_string());
//! map.insert("y".to_string(), "2".to_string());
//!
//! let data: Data = from_flat_map(&map).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::key::KeyPath;
use crate::{Error, FlatMap, FlatOptions, MissingKeys, Result};
use serde::de::{self, IntoDeserializer, Visitor};

/// The flat-map deserializer.
///
/// Walks the target type's shape against a borrowed [`FlatMap`], parsing
/// scalar values at each computed key. Created via [`Deserializer::new`].
pub struct Deserializer<'de> {
    map: &'de FlatMap,
    options: FlatOptions,
    path: KeyPath,
    in_element: bool,
}

impl<'de> Deserializer<'de> {
    pub fn new(map: &'de FlatMap, options: FlatOptions) -> Self {
        Deserializer {
            map,
            options,
            path: KeyPath::new(),
            in_element: false,
        }
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

    fn unsupported(&self, kind: &str) -> Error {
        Error::unsupported(&self.key_for_errors(), kind)
    }

    /// Looks up the value at the current key, applying the missing-key
    /// policy. `Ok(None)` means "absent and tolerated": the caller should
    /// produce the zero value.
    fn lookup(&self) -> Result<Option<&'de str>> {
        if self.path.is_empty() {
            return Err(Error::unsupported("(root)", "scalar"));
        }
        let key = self.current_key();
        match self.map.get(&key) {
            Some(value) => Ok(Some(value)),
            None => match self.options.missing_keys {
                MissingKeys::Lenient => Ok(None),
                MissingKeys::Strict => Err(Error::missing_key(&key)),
            },
        }
    }

    /// `true` when the map holds keys nested beneath `key` (e.g.
    /// `items.0.id` beneath `items.0`). During index probing this marks a
    /// compound element: its data exists, but not at the bare index key.
    fn has_nested_keys(&self, key: &str) -> bool {
        let mut probe = String::with_capacity(key.len() + self.options.delimiter.len());
        probe.push_str(key);
        probe.push_str(&self.options.delimiter);
        self.map.keys().any(|k| k.starts_with(&probe))
    }

    fn parse_scalar<T: std::str::FromStr>(&self, expected: &'static str) -> Result<Option<T>> {
        let Some(raw) = self.lookup()? else {
            return Ok(None);
        };
        raw.parse::<T>()
            .map(Some)
            .map_err(|_| Error::parse(&self.current_key(), expected, raw))
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("dynamically typed value"))
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<bool>("a boolean")? {
            Some(v) => visitor.visit_bool(v),
            None => visitor.visit_bool(false),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<i8>("an 8-bit integer")? {
            Some(v) => visitor.visit_i8(v),
            None => visitor.visit_i8(0),
        }
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<i16>("a 16-bit integer")? {
            Some(v) => visitor.visit_i16(v),
            None => visitor.visit_i16(0),
        }
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<i32>("a 32-bit integer")? {
            Some(v) => visitor.visit_i32(v),
            None => visitor.visit_i32(0),
        }
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<i64>("a 64-bit integer")? {
            Some(v) => visitor.visit_i64(v),
            None => visitor.visit_i64(0),
        }
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<i128>("a 128-bit integer")? {
            Some(v) => visitor.visit_i128(v),
            None => visitor.visit_i128(0),
        }
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<u8>("an unsigned 8-bit integer")? {
            Some(v) => visitor.visit_u8(v),
            None => visitor.visit_u8(0),
        }
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<u16>("an unsigned 16-bit integer")? {
            Some(v) => visitor.visit_u16(v),
            None => visitor.visit_u16(0),
        }
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<u32>("an unsigned 32-bit integer")? {
            Some(v) => visitor.visit_u32(v),
            None => visitor.visit_u32(0),
        }
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<u64>("an unsigned 64-bit integer")? {
            Some(v) => visitor.visit_u64(v),
            None => visitor.visit_u64(0),
        }
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<u128>("an unsigned 128-bit integer")? {
            Some(v) => visitor.visit_u128(v),
            None => visitor.visit_u128(0),
        }
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<f32>("a 32-bit float")? {
            Some(v) => visitor.visit_f32(v),
            None => visitor.visit_f32(0.0),
        }
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.parse_scalar::<f64>("a 64-bit float")? {
            Some(v) => visitor.visit_f64(v),
            None => visitor.visit_f64(0.0),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.lookup()? {
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => visitor.visit_char(ch),
                    _ => Err(Error::parse(
                        &self.current_key(),
                        "a single character",
                        raw,
                    )),
                }
            }
            None => visitor.visit_char('\0'),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.lookup()? {
            Some(raw) => visitor.visit_borrowed_str(raw),
            None => visitor.visit_str(""),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("option"))
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("unit"))
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("unit struct"))
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.in_element {
            return Err(self.unsupported("nested collection"));
        }
        if self.path.is_empty() {
            return Err(Error::unsupported("(root)", "sequence"));
        }
        visitor.visit_seq(ElementAccess {
            de: self,
            index: 0,
            remaining: None,
        })
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.in_element {
            return Err(self.unsupported("nested collection"));
        }
        if self.path.is_empty() {
            return Err(Error::unsupported("(root)", "sequence"));
        }
        visitor.visit_seq(ElementAccess {
            de: self,
            index: 0,
            remaining: Some(len),
        })
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("map"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.in_element {
            return Err(self.unsupported("record element in collection"));
        }
        visitor.visit_map(FieldAccess {
            de: self,
            fields: fields.iter(),
            pending: None,
        })
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("enum"))
    }

    fn deserialize_identifier<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        Err(self.unsupported("identifier"))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Yields each declared field of the target struct in declaration order,
/// extending the key path for the duration of the field's value.
struct FieldAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    fields: std::slice::Iter<'static, &'static str>,
    pending: Option<&'static str>,
}

impl<'de> de::MapAccess<'de> for FieldAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some(&field) => {
                self.pending = Some(field);
                seed.deserialize(field.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let field = self
            .pending
            .take()
            .ok_or_else(|| Error::custom("value requested before key"))?;
        self.de.path.push(field);
        let result = seed.deserialize(&mut *self.de);
        self.de.path.pop();
        result
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// Yields collection elements by probing index keys.
///
/// With `remaining: None` (a `Vec`) the run ends at the first absent
/// index. With `remaining: Some(len)` (a fixed-size array or tuple) every
/// slot is mandatory and an absent index is a missing-key error. In both
/// cases an absent index with keys nested beneath it is an
/// unsupported-kind error, never a silent end of the run.
struct ElementAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    index: usize,
    remaining: Option<usize>,
}

impl<'de> de::SeqAccess<'de> for ElementAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.remaining == Some(0) {
            return Ok(None);
        }

        self.de.path.push_index(self.index);
        let key = self.de.current_key();
        if !self.de.map.contains_key(&key) {
            let has_nested = self.de.has_nested_keys(&key);
            self.de.path.pop();
            if has_nested {
                // Element data exists only under nested keys: the element
                // is compound, which a flat collection cannot hold
                return Err(Error::unsupported(&key, "compound element"));
            }
            return match self.remaining {
                // Fixed-size slots are mandatory
                Some(_) => Err(Error::missing_key(&key)),
                None => Ok(None),
            };
        }

        self.de.in_element = true;
        let result = seed.deserialize(&mut *self.de);
        self.de.in_element = false;
        self.de.path.pop();

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        self.index += 1;
        result.map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        self.remaining
    }
}
