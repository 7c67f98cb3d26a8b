//! Ordered string-to-string map produced and consumed by the codec.
//!
//! This module provides [`FlatMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order. The serializer walks a record depth-first in
//! field-declaration order, so the map iterates in exactly the order the
//! keys were emitted.
//!
//! ## Why IndexMap?
//!
//! A plain `HashMap` would satisfy the lookup contract, but `IndexMap`
//! additionally gives:
//!
//! - **Deterministic output**: two flattenings of equal records produce
//!   identically ordered maps
//! - **Predictable debugging**: printed maps read in record order
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::FlatMap;
//!
//! let mut map = FlatMap::new();
//! map.insert("name".to_string(), "Alice".to_string());
//! map.insert("age".to_string(), "30".to_string());
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name"), Some("Alice"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered map of flat string keys to string values.
///
/// Thin wrapper around [`IndexMap`] preserving the depth-first emission
/// order of the serializer. Serializes transparently as a plain map, so it
/// can be handed to external string transports (JSON, query strings, env
/// files) without conversion.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::FlatMap;
///
/// let mut map = FlatMap::new();
/// map.insert("first".to_string(), "1".to_string());
/// map.insert("second".to_string(), "2".to_string());
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatMap(IndexMap<String, String>);

impl FlatMap {
    /// Creates an empty `FlatMap`.
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    /// Creates an empty `FlatMap` with the specified capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::FlatMap;
    ///
    /// let map = FlatMap::with_capacity(16);
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    /// Returns the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// map.insert("key".to_string(), "42".to_string());
    /// assert_eq!(map.get("key"), Some("42"));
    /// assert_eq!(map.get("absent"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key from the map, returning its value if present.
    ///
    /// Preserves the order of the remaining entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// map.insert("a".to_string(), "1".to_string());
    /// map.insert("b".to_string(), "2".to_string());
    /// map.insert("c".to_string(), "3".to_string());
    ///
    /// assert_eq!(map.remove("b"), Some("2".to_string()));
    /// assert_eq!(map.remove("b"), None);
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "c"]);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in emission order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in emission order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// map.insert("x".to_string(), "1".to_string());
    /// map.insert("y".to_string(), "2".to_string());
    ///
    /// let values: Vec<_> = map.values().cloned().collect();
    /// assert_eq!(values, vec!["1", "2"]);
    /// ```
    pub fn values(&self) -> indexmap::map::Values<'_, String, String> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in
    /// emission order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }
}

/// Converts from a `HashMap`. The resulting entry order is unspecified,
/// which is fine for deserialization: lookups are by key, not position.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::FlatMap;
/// use std::collections::HashMap;
///
/// let mut source = HashMap::new();
/// source.insert("a".to_string(), "1".to_string());
///
/// let map = FlatMap::from(source);
/// assert_eq!(map.get("a"), Some("1"));
/// ```
impl From<HashMap<String, String>> for FlatMap {
    fn from(map: HashMap<String, String>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

/// Converts into a `HashMap`, dropping the entry order.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::FlatMap;
/// use std::collections::HashMap;
///
/// let mut map = FlatMap::new();
/// map.insert("a".to_string(), "1".to_string());
///
/// let plain: HashMap<String, String> = map.into();
/// assert_eq!(plain.get("a"), Some(&"1".to_string()));
/// ```
impl From<FlatMap> for HashMap<String, String> {
    fn from(map: FlatMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        FlatMap(IndexMap::from_iter(iter))
    }
}

/// Appends pairs in iteration order; an existing key keeps its position
/// and takes the new value.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::FlatMap;
///
/// let mut map = FlatMap::new();
/// map.insert("a".to_string(), "1".to_string());
/// map.extend([("b".to_string(), "2".to_string())]);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("b"), Some("2"));
/// ```
impl Extend<(String, String)> for FlatMap {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
