use http::StatusCode;
use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("OK")
}

/// `Content-Type` header line for a content type produced by `StaticFiles`.
///
/// `may_minihttp` only accepts `'static` header lines, so every type the
/// server can emit is spelled out here.
#[must_use]
pub fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        "text/html" => "Content-Type: text/html; charset=utf-8",
        "text/css" => "Content-Type: text/css",
        "application/javascript" => "Content-Type: application/javascript",
        "application/json" => "Content-Type: application/json",
        "text/plain" => "Content-Type: text/plain",
        "image/svg+xml" => "Content-Type: image/svg+xml",
        "image/png" => "Content-Type: image/png",
        "image/jpeg" => "Content-Type: image/jpeg",
        "image/gif" => "Content-Type: image/gif",
        "image/x-icon" => "Content-Type: image/x-icon",
        _ => "Content-Type: application/octet-stream",
    }
}

/// Write a body with the given status and content type.
///
/// HEAD requests get the headers only.
pub fn write_body(res: &mut Response, status: u16, content_type: &str, body: Vec<u8>, head: bool) {
    res.status_code(status as usize, status_reason(status));
    res.header(content_type_header(content_type));
    if !head {
        res.body_vec(body);
    }
}

pub fn write_json(res: &mut Response, status: u16, body: &Value, head: bool) {
    write_body(res, status, "application/json", body.to_string().into_bytes(), head);
}

pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    write_json(res, status, &body, false);
}
