//! Error types for flat-map serialization and deserialization.
//!
//! ## Error Categories
//!
//! - **Unsupported types**: a field's kind cannot be represented in a flat
//!   string map (maps, options, enums, nested collections)
//! - **Parse failures**: a map value cannot be coerced to the target
//!   scalar kind
//! - **Missing keys**: a required key is absent from the map
//! - **Configuration**: an invalid codec configuration (empty delimiter)
//!
//! Every error names the flat key it occurred at, so a failure deep inside
//! a nested record points straight at the offending entry.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::{from_flat_map, Error, FlatMap};
//!
//! let mut map = FlatMap::new();
//! map.insert("age".to_string(), "not-a-number".to_string());
//!
//! #[derive(serde::Deserialize)]
//! struct User { age: u32 }
//!
//! let result: Result<User, Error> = from_flat_map(&map);
//! assert!(matches!(result, Err(Error::Parse { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while flattening a record
/// or rebuilding one from a flat map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A field's kind cannot be represented in a flat string map.
    #[error("unsupported kind `{kind}` at key `{key}`")]
    UnsupportedType { key: String, kind: String },

    /// A map value cannot be coerced to the target scalar kind.
    #[error("cannot parse value `{value}` at key `{key}` as {expected}")]
    Parse {
        key: String,
        expected: String,
        value: String,
    },

    /// A required key is absent from the flat map.
    #[error("missing key `{key}`")]
    MissingKey { key: String },

    /// Invalid codec configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Generic message, used for serde-originated custom errors.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an unsupported-kind error for a field that cannot live in a
    /// flat map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::Error;
    ///
    /// let err = Error::unsupported("D.M", "map");
    /// assert!(err.to_string().contains("unsupported kind"));
    /// ```
    pub fn unsupported(key: &str, kind: &str) -> Self {
        Error::UnsupportedType {
            key: key.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Creates a parse error for a value that cannot be coerced to the
    /// target scalar kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::Error;
    ///
    /// let err = Error::parse("B", "an integer", "two");
    /// assert!(err.to_string().contains("as an integer"));
    /// ```
    pub fn parse(key: &str, expected: &str, value: &str) -> Self {
        Error::Parse {
            key: key.to_string(),
            expected: expected.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a missing-key error.
    pub fn missing_key(key: &str) -> Self {
        Error::MissingKey {
            key: key.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn config(msg: &str) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
