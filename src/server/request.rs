use http::Method;
use may_minihttp::Request;
use std::collections::HashMap;
use tracing::debug;

/// Parsed HTTP request data used by `DevService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request path without query string or fragment
    pub path: String,
    /// Full request target as sent, query string included
    pub target: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
}

impl ParsedRequest {
    /// Whether the method is one the dev server answers
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.method == Method::GET.as_str() || self.is_head()
    }

    #[must_use]
    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD.as_str()
    }
}

/// Split a request target into its path and the query string (without `?`).
#[must_use]
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let target = target.split('#').next().unwrap_or(target);
    match target.split_once('?') {
        Some((path, query)) => (if path.is_empty() { "/" } else { path }, Some(query)),
        None => (if target.is_empty() { "/" } else { target }, None),
    }
}

/// Extract useful information from a `may_minihttp::Request`.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let target = req.path().to_string();
    let (path, query) = split_target(&target);
    let path = path.to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    debug!(
        method = %method,
        path = %path,
        query = query.unwrap_or(""),
        headers_count = headers.len(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        target,
        headers,
    }
}
