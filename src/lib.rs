//! # serde_flatmap
//!
//! A Serde-compatible codec that flattens nested Rust data structures into
//! a single-level map of dotted string keys to string values, and rebuilds
//! typed values from such a map.
//!
//! ## Why flatten?
//!
//! Many transports only move strings: HTML form fields, environment
//! variables, key-value stores, URL query strings. `serde_flatmap` turns
//! any `#[derive(Serialize)]` struct into a [`FlatMap`] suitable for those
//! transports, and any [`FlatMap`] back into a `#[derive(Deserialize)]`
//! struct, with a deterministic key scheme and a fixed scalar wire format.
//!
//! ## Key Features
//!
//! - **Dotted keys**: nested fields become `parent.child`; collection
//!   elements become `field.0`, `field.1`, ...
//! - **Configurable**: custom delimiter and namespace prefix via
//!   [`FlatOptions`] or a reusable [`Codec`]
//! - **Deterministic**: keys are emitted depth-first in field-declaration
//!   order, preserved by the map
//! - **Serde Compatible**: works with existing types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_flatmap::{from_flat_map, to_flat_map};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Settings {
//!     host: String,
//!     port: u16,
//!     verbose: bool,
//! }
//!
//! let settings = Settings {
//!     host: "localhost".to_string(),
//!     port: 8080,
//!     verbose: true,
//! };
//!
//! let map = to_flat_map(&settings).unwrap();
//! assert_eq!(map.get("host"), Some("localhost"));
//! assert_eq!(map.get("port"), Some("8080"));
//! assert_eq!(map.get("verbose"), Some("true"));
//!
//! let back: Settings = from_flat_map(&map).unwrap();
//! assert_eq!(settings, back);
//! ```
//!
//! ## Nested Records and Collections
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_flatmap::to_flat_map;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Endpoint { host: String, port: u16 }
//!
//! #[derive(Serialize, Deserialize)]
//! struct Config {
//!     primary: Endpoint,
//!     tags: Vec<String>,
//! }
//!
//! let config = Config {
//!     primary: Endpoint { host: "db".to_string(), port: 5432 },
//!     tags: vec!["prod".to_string(), "eu".to_string()],
//! };
//!
//! let map = to_flat_map(&config).unwrap();
//! assert_eq!(map.get("primary.host"), Some("db"));
//! assert_eq!(map.get("primary.port"), Some("5432"));
//! assert_eq!(map.get("tags.0"), Some("prod"));
//! assert_eq!(map.get("tags.1"), Some("eu"));
//! ```
//!
//! ## Custom Prefix and Delimiter
//!
//! ```rust
//! use serde::Serialize;
//! use serde_flatmap::Codec;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let codec = Codec::new("app", ":").unwrap();
//! let map = codec.to_flat_map(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(map.get("app:x"), Some("1"));
//! assert_eq!(map.get("app:y"), Some("2"));
//! ```
//!
//! ## Supported Shapes
//!
//! Records are trees of named fields. Supported field kinds:
//!
//! - scalars: `bool`, all integer widths, `f32`/`f64`, `char`, strings
//! - nested structs, to any depth
//! - `Vec<scalar>` and `[scalar; N]` (and tuples of scalars)
//!
//! Everything else fails with [`Error::UnsupportedType`]: maps, `Option`,
//! enums, and collections whose elements are themselves records or
//! collections. Fields annotated `#[serde(skip)]` are invisible to both
//! directions.
//!
//! ## Float Wire Format
//!
//! Floats render in normalized uppercase scientific notation with a
//! signed exponent: `3.14f32` becomes the literal string `3.14E+00`. The
//! deserializer parses this form (and any other form `str::parse`
//! accepts) back to the declared width.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API
//! - Neither direction ever mutates its input; independent calls may run
//!   concurrently without coordination

pub mod de;
pub mod error;
pub mod key;
pub mod map;
pub mod options;
pub mod ser;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::FlatMap;
pub use options::{FlatOptions, MissingKeys};
pub use ser::Serializer;

use serde::{Deserialize, Serialize};

/// Flattens any `T: Serialize` into a [`FlatMap`] with the default
/// configuration (no prefix, `"."` delimiter).
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::to_flat_map;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let map = to_flat_map(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(map.get("x"), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the value contains a field kind
/// that cannot be represented in a flat map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map<T>(value: &T) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    to_flat_map_with_options(value, FlatOptions::default())
}

/// Flattens any `T: Serialize` into a [`FlatMap`] with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::{to_flat_map_with_options, FlatOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let options = FlatOptions::new().with_prefix("test").with_delimiter(":");
/// let map = to_flat_map_with_options(&Point { x: 1, y: 2 }, options).unwrap();
/// assert_eq!(map.get("test:x"), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Config`] if the options fail validation, or
/// [`Error::UnsupportedType`] if the value contains an unsupported field
/// kind.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map_with_options<T>(value: &T, options: FlatOptions) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    options.validate()?;
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Rebuilds an instance of type `T` from a [`FlatMap`] with the default
/// configuration (no prefix, `"."` delimiter, lenient missing keys).
///
/// The target is returned by value, so a failed reconstruction never
/// leaves partially written caller state behind.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::{from_flat_map, FlatMap};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let mut map = FlatMap::new();
/// map.insert("x".to_string(), "1".to_string());
/// map.insert("y".to_string(), "2".to_string());
///
/// let point: Point = from_flat_map(&map).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if a map value cannot be coerced to the
/// declared field kind, or [`Error::UnsupportedType`] for unsupported
/// field kinds.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_map<'de, T>(map: &'de FlatMap) -> Result<T>
where
    T: Deserialize<'de>,
{
    from_flat_map_with_options(map, FlatOptions::default())
}

/// Rebuilds an instance of type `T` from a [`FlatMap`] with custom
/// options.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::{from_flat_map_with_options, FlatMap, FlatOptions, MissingKeys};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let mut map = FlatMap::new();
/// map.insert("x".to_string(), "1".to_string());
///
/// // Lenient (default): absent keys become zero values
/// let options = FlatOptions::new();
/// let point: Point = from_flat_map_with_options(&map, options).unwrap();
/// assert_eq!(point, Point { x: 1, y: 0 });
///
/// // Strict: absent keys are an error
/// let options = FlatOptions::new().with_missing_keys(MissingKeys::Strict);
/// let result: Result<Point, _> = from_flat_map_with_options(&map, options);
/// assert!(result.is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Config`] if the options fail validation,
/// [`Error::Parse`] on coercion failures, [`Error::MissingKey`] in strict
/// mode or for absent fixed-size array slots, or
/// [`Error::UnsupportedType`] for unsupported field kinds.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_map_with_options<'de, T>(map: &'de FlatMap, options: FlatOptions) -> Result<T>
where
    T: Deserialize<'de>,
{
    options.validate()?;
    let mut deserializer = Deserializer::new(map, options);
    T::deserialize(&mut deserializer)
}

/// A reusable codec carrying a validated `(prefix, delimiter)`
/// configuration.
///
/// Construction validates the configuration once; the two operations then
/// share it for every call.
///
/// # Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use serde_flatmap::Codec;
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let codec = Codec::new("test", ":").unwrap();
/// let point = Point { x: 1, y: 2 };
///
/// let map = codec.to_flat_map(&point).unwrap();
/// assert_eq!(map.get("test:x"), Some("1"));
///
/// let back: Point = codec.from_flat_map(&map).unwrap();
/// assert_eq!(point, back);
/// ```
#[derive(Clone, Debug)]
pub struct Codec {
    options: FlatOptions,
}

impl Codec {
    /// Creates a codec with the given namespace prefix and delimiter.
    ///
    /// An empty prefix means no namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `delimiter` is empty.
    pub fn new(prefix: &str, delimiter: &str) -> Result<Self> {
        let mut options = FlatOptions::new().with_delimiter(delimiter);
        if !prefix.is_empty() {
            options = options.with_prefix(prefix);
        }
        Self::with_options(options)
    }

    /// Creates a codec from pre-built options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the options fail validation.
    pub fn with_options(options: FlatOptions) -> Result<Self> {
        options.validate()?;
        Ok(Codec { options })
    }

    /// Returns the codec's configuration.
    #[must_use]
    pub fn options(&self) -> &FlatOptions {
        &self.options
    }

    /// Flattens any `T: Serialize` under this codec's configuration.
    ///
    /// # Errors
    ///
    /// See [`to_flat_map_with_options`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_flat_map<T>(&self, value: &T) -> Result<FlatMap>
    where
        T: ?Sized + Serialize,
    {
        to_flat_map_with_options(value, self.options.clone())
    }

    /// Rebuilds an instance of type `T` under this codec's configuration.
    ///
    /// # Errors
    ///
    /// See [`from_flat_map_with_options`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn from_flat_map<'de, T>(&self, map: &'de FlatMap) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        from_flat_map_with_options(map, self.options.clone())
    }
}
