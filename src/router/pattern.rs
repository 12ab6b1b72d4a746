//! Route pattern compilation.
//!
//! Patterns are split into `/`-delimited segments once, at startup. A segment
//! starting with `:` is a named parameter; everything else is a literal that
//! must match exactly.

use smallvec::SmallVec;
use std::sync::Arc;

/// Patterns in this crate are short; segments beyond this spill to the heap.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// One compiled pattern segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment byte for byte
    Literal(Arc<str>),
    /// Binds any single non-empty path segment under this name
    Param(Arc<str>),
}

/// A compiled route pattern such as `/students/name/:name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: Arc<str>,
    segments: SmallVec<[Segment; MAX_INLINE_SEGMENTS]>,
}

impl RoutePattern {
    /// Compile a pattern. A bare `:` is treated as a literal.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(Arc::from(name)),
                _ => Segment::Literal(Arc::from(segment)),
            })
            .collect();
        Self {
            raw: Arc::from(pattern),
            segments,
        }
    }

    /// The pattern as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all parameter segments, in order
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_ref()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

/// Tokenise a path on `/`.
///
/// One leading and one trailing slash are ignored, so `/`, `` and `//` all
/// have zero segments and `/about/` has the single segment `about`. Interior
/// empty segments are preserved so `/a//b` never matches `/a/:x/b`.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let mut parts = trimmed.split('/');
    if trimmed.is_empty() {
        // `"".split('/')` yields one empty item; skip it.
        parts.next();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_root() {
        assert_eq!(split_segments("/").count(), 0);
        assert_eq!(split_segments("").count(), 0);
        assert_eq!(split_segments("//").count(), 0);
    }

    #[test]
    fn test_split_trailing_slash() {
        let segs: Vec<_> = split_segments("/students/name/").collect();
        assert_eq!(segs, vec!["students", "name"]);
    }

    #[test]
    fn test_split_interior_empty() {
        let segs: Vec<_> = split_segments("/a//b").collect();
        assert_eq!(segs, vec!["a", "", "b"]);
    }

    #[test]
    fn test_parse_params() {
        let pattern = RoutePattern::parse("/students/name/:name");
        assert_eq!(pattern.segments().len(), 3);
        assert_eq!(pattern.param_names(), vec!["name"]);
        assert_eq!(pattern.as_str(), "/students/name/:name");
    }

    #[test]
    fn test_bare_colon_is_literal() {
        let pattern = RoutePattern::parse("/a/:");
        assert_eq!(pattern.segments()[1], Segment::Literal(Arc::from(":")));
    }
}
