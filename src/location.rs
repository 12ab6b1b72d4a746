//! Navigation state.
//!
//! A [`Location`] is the value every route table is evaluated against. It is
//! never mutated in place: navigation replaces it wholesale (see
//! [`crate::history::History`]).

use serde::Serialize;
use ulid::Ulid;
use url::Url;

/// Length of the generated location keys (matches the browser history API).
const KEY_LEN: usize = 6;

/// Current navigation path, query and fragment.
///
/// Serialises with the same field names the browser history API exposes, so
/// the student view can dump it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Path component, always starting with `/`
    pub pathname: String,
    /// Query string including the leading `?`, or empty
    pub search: String,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
    /// Unique key for locations created by navigation; the initial location has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
            key: None,
        }
    }
}

impl Location {
    /// Parse a location from a relative reference (`/a/b?x=1#y`) or an absolute URL.
    ///
    /// Never fails: anything that is not an absolute URL is split by hand on
    /// `#` and `?`, and a missing leading slash is added.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if let Ok(url) = Url::parse(input) {
            if url.has_host() {
                return Self::from_url(&url);
            }
        }

        let (rest, hash) = match input.find('#') {
            Some(pos) => (&input[..pos], &input[pos..]),
            None => (input, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };

        Self {
            pathname: normalize_pathname(path),
            search: strip_lone_marker(search, '?'),
            hash: strip_lone_marker(hash, '#'),
            key: None,
        }
    }

    /// Build a location from the path, query and fragment of an absolute URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self {
            pathname: normalize_pathname(url.path()),
            search: url.query().map(|q| format!("?{q}")).unwrap_or_default(),
            hash: url.fragment().map(|f| format!("#{f}")).unwrap_or_default(),
            key: None,
        }
    }

    /// Same location with a freshly generated key.
    #[must_use]
    pub fn with_new_key(mut self) -> Self {
        self.key = Some(generate_key());
        self
    }

    /// `pathname + search + hash`
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Escapes `decode_pathname` leaves encoded: URI delimiters and `%` itself,
/// so segment boundaries hold and parameters are never decoded twice.
const KEEP_ENCODED: &[u8] = b";/?:@&=+$,#%";

fn normalize_pathname(path: &str) -> String {
    let path = decode_pathname(path);
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Percent-decode a path the way the browser history API does (`decodeURI`).
///
/// Input whose escapes do not form valid UTF-8 is returned unchanged.
fn decode_pathname(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| bytes.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(b) if !KEEP_ENCODED.contains(&b) => {
                out.push(b);
                i += 3;
            }
            _ => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| path.to_string())
}

// `?` or `#` alone carries nothing.
fn strip_lone_marker(part: &str, marker: char) -> String {
    if part.len() == marker.len_utf8() {
        String::new()
    } else {
        part.to_string()
    }
}

fn generate_key() -> String {
    let id = Ulid::new().to_string().to_lowercase();
    id[id.len() - KEY_LEN..].to_string()
}
