//! Delimited paths and the link capability tag.
//!
//! A [`LinkPath`] is the value type shared by both resolvers: the raw string,
//! its segments, and the first/last segment computed once at construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of link, used wherever a caller needs to tell link types apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `.`-delimited symbol path.
    Dotted,
    /// Directory-separator path.
    Filesystem,
    /// Shared-namespace endpoint.
    Bridge,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Dotted => "dotted",
            LinkKind::Filesystem => "filesystem",
            LinkKind::Bridge => "bridge",
        }
    }

    /// True for the two path resolvers.
    pub fn is_resolver(&self) -> bool {
        matches!(self, LinkKind::Dotted | LinkKind::Filesystem)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every linklib handle.
pub trait Link {
    fn kind(&self) -> LinkKind;
}

/// An immutable delimited path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkPath {
    raw: String,
    delimiter: char,
    segments: Vec<String>,
    first: String,
    last: String,
}

impl LinkPath {
    /// Split `raw` on `delimiter`.
    ///
    /// Empty segments are kept, so `"a/"` has the segments `["a", ""]` and the
    /// empty string has the single segment `""`.
    pub fn new(raw: impl Into<String>, delimiter: char) -> Self {
        let raw = raw.into();
        let segments: Vec<String> = raw.split(delimiter).map(str::to_string).collect();
        // str::split always yields at least one item
        let first = segments[0].clone();
        let last = segments[segments.len() - 1].clone();
        Self {
            raw,
            delimiter,
            segments,
            first,
            last,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a path has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split at the last delimiter into `(container, final_name)`.
    ///
    /// Returns `None` when the raw string contains no delimiter.
    pub fn split_last(&self) -> Option<(&str, &str)> {
        self.raw
            .rfind(self.delimiter)
            .map(|idx| (&self.raw[..idx], &self.raw[idx + self.delimiter.len_utf8()..]))
    }
}

impl fmt::Display for LinkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_and_ends() {
        let path = LinkPath::new("pkg.sub.name", '.');
        assert_eq!(path.segments(), &["pkg", "sub", "name"]);
        assert_eq!(path.first(), "pkg");
        assert_eq!(path.last(), "name");
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
    }

    #[test]
    fn test_display_round_trips() {
        let path = LinkPath::new("os.path", '.');
        assert_eq!(path.to_string(), "os.path");
    }

    #[test]
    fn test_empty_and_trailing_segments() {
        let empty = LinkPath::new("", '.');
        assert_eq!(empty.segments(), &[""]);
        assert_eq!(empty.first(), "");

        let trailing = LinkPath::new("a/b/", '/');
        assert_eq!(trailing.segments(), &["a", "b", ""]);
        assert_eq!(trailing.last(), "");
    }

    #[test]
    fn test_split_last() {
        let path = LinkPath::new("a.b.c", '.');
        assert_eq!(path.split_last(), Some(("a.b", "c")));
        assert_eq!(LinkPath::new("single", '.').split_last(), None);
    }

    #[test]
    fn test_kind_tags() {
        assert!(LinkKind::Dotted.is_resolver());
        assert!(LinkKind::Filesystem.is_resolver());
        assert!(!LinkKind::Bridge.is_resolver());
        assert_eq!(LinkKind::Bridge.to_string(), "bridge");
    }
}
