//! Router core - the pure matching function and the route table.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;

use super::pattern::{split_segments, RoutePattern, Segment};
use crate::location::Location;

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter storage for a match.
///
/// Names are shared with the compiled pattern (`Arc<str>`); values are
/// per-location data decoded from the path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of matching a pattern against a location path.
///
/// Derived on every render and never cached. Serialises as
/// `{"path", "url", "isExact", "params"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
    /// The pattern that matched (e.g. `/students/name/:name`)
    pub path: String,
    /// The portion of the location path the pattern consumed
    pub url: String,
    /// Whether the pattern consumed the whole location path
    pub is_exact: bool,
    /// Named segment bindings, in pattern order
    #[serde(serialize_with = "serialize_params")]
    pub params: ParamVec,
}

impl RouteMatch {
    /// Get a parameter by name
    ///
    /// Uses "last write wins" semantics if a pattern repeats a name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

fn serialize_params<S: Serializer>(params: &ParamVec, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (name, value) in params {
        map.serialize_entry(name.as_ref(), value)?;
    }
    map.end()
}

/// Test `pathname` against a compiled pattern.
///
/// Literal segments compare by exact string equality; a `:name` segment
/// matches any single non-empty segment and binds its percent-decoded value.
/// Exact mode requires equal segment counts, prefix mode lets the path carry
/// extra trailing segments.
#[must_use]
pub fn match_pattern(pattern: &RoutePattern, exact: bool, pathname: &str) -> Option<RouteMatch> {
    let mut path_segments = split_segments(pathname);
    let mut params = ParamVec::new();
    let mut consumed: SmallVec<[&str; MAX_INLINE_PARAMS]> = SmallVec::new();

    for segment in pattern.segments() {
        let actual = path_segments.next()?;
        match segment {
            Segment::Literal(lit) => {
                if lit.as_ref() != actual {
                    return None;
                }
            }
            Segment::Param(name) => {
                if actual.is_empty() {
                    return None;
                }
                params.push((Arc::clone(name), decode_segment(actual).into_owned()));
            }
        }
        consumed.push(actual);
    }

    let is_exact = path_segments.next().is_none();
    if exact && !is_exact {
        return None;
    }

    Some(RouteMatch {
        path: pattern.as_str().to_string(),
        url: format!("/{}", consumed.join("/")),
        is_exact,
        params,
    })
}

/// Convenience over [`match_pattern`] for an uncompiled pattern string.
#[must_use]
pub fn match_path(pattern: &str, exact: bool, pathname: &str) -> Option<RouteMatch> {
    match_pattern(&RoutePattern::parse(pattern), exact, pathname)
}

fn decode_segment(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// A static rule mapping a pattern to a target.
///
/// The router does not care what the target is; the dispatcher stores views
/// here, tests and benches store plain names.
#[derive(Debug, Clone)]
pub struct RouteEntry<V> {
    pattern: RoutePattern,
    exact: bool,
    name: &'static str,
    target: V,
}

impl<V> RouteEntry<V> {
    /// Prefix-mode entry
    pub fn new(pattern: &str, name: &'static str, target: V) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            exact: false,
            name,
            target,
        }
    }

    /// Exact-mode entry
    pub fn exact(pattern: &str, name: &'static str, target: V) -> Self {
        Self {
            exact: true,
            ..Self::new(pattern, name, target)
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn target(&self) -> &V {
        &self.target
    }

    /// Match this entry against a location
    #[must_use]
    pub fn matches(&self, location: &Location) -> Option<RouteMatch> {
        match_pattern(&self.pattern, self.exact, &location.pathname)
    }
}

/// Immutable, ordered sequence of route entries.
///
/// Entries are not exclusive: every entry that matches a location is
/// reported, in table order.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> RouteTable<V> {
    #[must_use]
    pub fn new(entries: Vec<RouteEntry<V>>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry<V>] {
        &self.entries
    }

    /// Every entry matching `location`, with its derived match
    pub fn matches<'a>(
        &'a self,
        location: &'a Location,
    ) -> impl Iterator<Item = (&'a RouteEntry<V>, RouteMatch)> + 'a {
        self.entries
            .iter()
            .filter_map(move |entry| entry.matches(location).map(|m| (entry, m)))
    }

    /// One line per entry, e.g. `"/about (prefix) -> about"`
    #[must_use]
    pub fn dump_routes(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{} ({}) -> {}",
                    e.pattern.as_str(),
                    if e.exact { "exact" } else { "prefix" },
                    e.name
                )
            })
            .collect()
    }
}
