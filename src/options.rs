//! Configuration options for the flat-map codec.
//!
//! This module provides types to customize how flat keys are rendered and
//! how absent keys are treated:
//!
//! - [`FlatOptions`]: main configuration struct (prefix, delimiter,
//!   missing-key policy)
//! - [`MissingKeys`]: lenient vs. strict handling of absent scalar keys
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::{to_flat_map_with_options, FlatOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! // Namespace every key under "app" with ":" between segments
//! let options = FlatOptions::new()
//!     .with_prefix("app")
//!     .with_delimiter(":");
//! let map = to_flat_map_with_options(&data, options).unwrap();
//! assert_eq!(map.get("app:x"), Some("1"));
//! ```

use crate::{Error, Result};

/// Policy for scalar keys that are absent from the flat map during
/// deserialization.
///
/// - **Lenient** (default): the field is left at its zero value (`0`,
///   `0.0`, `false`, `""`)
/// - **Strict**: deserialization fails with [`Error::MissingKey`]
///
/// Fixed-size arrays are exempt from the policy: every declared slot is
/// mandatory in both modes.
///
/// [`Error::MissingKey`]: crate::Error::MissingKey
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissingKeys {
    #[default]
    Lenient,
    Strict,
}

/// Configuration for the flat-map codec.
///
/// Controls the key namespace prefix, the segment delimiter, and the
/// missing-key policy.
///
/// # Examples
///
/// ```rust
/// use serde_flatmap::{FlatOptions, MissingKeys};
///
/// // Default: no prefix, "." delimiter, lenient missing keys
/// let options = FlatOptions::new();
///
/// // Custom configuration
/// let options = FlatOptions::new()
///     .with_prefix("test")
///     .with_delimiter(":")
///     .with_missing_keys(MissingKeys::Strict);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FlatOptions {
    pub prefix: Option<String>,
    pub delimiter: String,
    pub missing_keys: MissingKeys,
}

impl Default for FlatOptions {
    fn default() -> Self {
        FlatOptions {
            prefix: None,
            delimiter: ".".to_string(),
            missing_keys: MissingKeys::default(),
        }
    }
}

impl FlatOptions {
    /// Creates default options (no prefix, `"."` delimiter, lenient
    /// missing-key policy).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::FlatOptions;
    ///
    /// let options = FlatOptions::new();
    /// assert_eq!(options.delimiter, ".");
    /// assert!(options.prefix.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a namespace prefix prepended to every key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::FlatOptions;
    ///
    /// let options = FlatOptions::new().with_prefix("test");
    /// assert_eq!(options.prefix.as_deref(), Some("test"));
    /// ```
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Sets the delimiter joining key segments.
    ///
    /// Must be non-empty; an empty delimiter fails validation when the
    /// options are used.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    /// Sets the missing-key policy for deserialization.
    #[must_use]
    pub fn with_missing_keys(mut self, policy: MissingKeys) -> Self {
        self.missing_keys = policy;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the delimiter is empty.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::config("delimiter must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_validate() {
        assert!(FlatOptions::default().validate().is_ok());
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let err = FlatOptions::new().with_delimiter("").validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
