//! Flat key construction.
//!
//! Both the serializer and the deserializer walk a record depth-first and
//! need the same deterministic rendering of "where am I" into a flat key:
//! path segments joined by the configured delimiter, optionally preceded
//! by a namespace prefix.
//!
//! ## Key shape
//!
//! For a nested field `D.DA` under prefix `test` and delimiter `:` the key
//! is `test:D:DA`. Collection elements contribute their decimal index as a
//! segment: `tags.0`, `tags.1`, ...
//!
//! No escaping is performed. If a field name itself contains the delimiter
//! the resulting key is ambiguous; pick a delimiter that cannot appear in
//! your field names.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::key::build_key;
//!
//! assert_eq!(build_key("", ".", &["D", "DA"]), "D.DA");
//! assert_eq!(build_key("test", ":", &["D", "DA"]), "test:D:DA");
//! ```

/// Joins `prefix` (if non-empty) and each path segment with `delimiter`.
///
/// Pure function with no failure modes. Integer indices should be rendered
/// as decimal digits by the caller before being passed as segments;
/// [`KeyPath::push_index`] does this.
#[must_use]
pub fn build_key(prefix: &str, delimiter: &str, segments: &[&str]) -> String {
    let mut key = String::with_capacity(
        prefix.len() + segments.iter().map(|s| s.len() + delimiter.len()).sum::<usize>(),
    );
    key.push_str(prefix);
    for segment in segments {
        if !key.is_empty() {
            key.push_str(delimiter);
        }
        key.push_str(segment);
    }
    key
}

/// A mutable stack of path segments tracking the current traversal
/// position inside a record.
///
/// The serializer pushes a segment when it descends into a field or a
/// collection element and pops it on the way back out; the deserializer
/// mirrors the same walk against the target type's shape.
#[derive(Debug, Clone, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a field-name segment.
    pub fn push(&mut self, segment: &str) {
        self.segments.push(segment.to_string());
    }

    /// Pushes a collection-index segment, rendered as decimal digits.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(index.to_string());
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// `true` when the path is at the record root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the current flat key under `(prefix, delimiter)`.
    #[must_use]
    pub fn render(&self, prefix: Option<&str>, delimiter: &str) -> String {
        let segments: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        build_key(prefix.unwrap_or(""), delimiter, &segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_segments_with_delimiter() {
        assert_eq!(build_key("", ".", &["A"]), "A");
        assert_eq!(build_key("", ".", &["D", "DA"]), "D.DA");
        assert_eq!(build_key("", ":", &["D", "DA"]), "D:DA");
    }

    #[test]
    fn prefix_leads_the_key() {
        assert_eq!(build_key("test", ":", &["A"]), "test:A");
        assert_eq!(build_key("test", ":", &["D", "DA"]), "test:D:DA");
    }

    #[test]
    fn empty_prefix_omits_leading_delimiter() {
        assert_eq!(build_key("", ".", &["D", "DA"]), "D.DA");
    }

    #[test]
    fn prefix_alone_renders_bare() {
        assert_eq!(build_key("test", ".", &[]), "test");
        assert_eq!(build_key("", ".", &[]), "");
    }

    #[test]
    fn indices_render_as_decimal() {
        let mut path = KeyPath::new();
        path.push("H");
        path.push_index(0);
        assert_eq!(path.render(None, "."), "H.0");
        path.pop();
        path.push_index(12);
        assert_eq!(path.render(None, "."), "H.12");
    }

    #[test]
    fn path_push_pop_tracks_position() {
        let mut path = KeyPath::new();
        assert!(path.is_empty());
        path.push("D");
        path.push("DA");
        assert_eq!(path.render(Some("test"), ":"), "test:D:DA");
        path.pop();
        assert_eq!(path.render(Some("test"), ":"), "test:D");
        path.pop();
        assert!(path.is_empty());
    }
}
