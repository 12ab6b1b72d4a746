use spa_router::bundler;
use spa_router::config::BuildConfig;
use spa_router::server::Shell;
use std::sync::Arc;

mod common;
use common::temp_project;
use common::test_server::{get, parse_parts, send_request, start};

fn static_config(fallback: bool) -> BuildConfig {
    let mut cfg = BuildConfig::default();
    cfg.root = std::env::current_dir().unwrap();
    cfg.dev_server.content_base = Some("tests/staticdata".into());
    cfg.dev_server.history_api_fallback = fallback;
    cfg
}

#[test]
fn test_health_endpoint() {
    let (handle, addr, _) = start(&static_config(true), Shell::default());
    let resp = get(&addr, "/health");
    handle.stop();
    let (status, ct, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(ct, "application/json");
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[test]
fn test_health_answers_head_without_body() {
    let (handle, addr, _) = start(&static_config(true), Shell::default());
    let resp = send_request(&addr, "HEAD /health HTTP/1.1\r\nHost: localhost\r\n\r\n");
    handle.stop();
    let (status, ct, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(ct, "application/json");
    assert!(body.is_empty());
}

#[test]
fn test_static_file_under_public_path_and_root() {
    let (handle, addr, _) = start(&static_config(true), Shell::default());
    let under_public = get(&addr, "/src/bundle.js");
    let at_root = get(&addr, "/bundle.js");
    let nested = get(&addr, "/nested/data.json");
    handle.stop();

    let (status, ct, body) = parse_parts(&under_public);
    assert_eq!(status, 200);
    assert_eq!(ct, "application/javascript");
    assert_eq!(body, "console.log('bundled');\n");

    let (status, _, body) = parse_parts(&at_root);
    assert_eq!(status, 200);
    assert_eq!(body, "console.log('bundled');\n");

    let (status, ct, _) = parse_parts(&nested);
    assert_eq!(status, 200);
    assert_eq!(ct, "application/json");
}

#[test]
fn test_fallback_renders_requested_route() {
    let shell = Shell::new(
        r#"<html><body><div id="root"></div><script src="/src/bundle.js"></script></body></html>"#,
    );
    let (handle, addr, _) = start(&static_config(true), shell);
    let about = get(&addr, "/about");
    let student = get(&addr, "/students/name/craig?x=1");
    handle.stop();

    let (status, ct, body) = parse_parts(&about);
    assert_eq!(status, 200);
    assert_eq!(ct, "text/html; charset=utf-8");
    assert!(body.starts_with(r#"<html><body><div id="root"><div><h1>Hello, world!</h1>"#));
    assert!(body.contains("<h1>About</h1>"));
    assert!(!body.contains("<h1>Home</h1>"));
    assert!(body.ends_with(r#"</div><script src="/src/bundle.js"></script></body></html>"#));

    let (status, _, body) = parse_parts(&student);
    assert_eq!(status, 200);
    assert!(body.contains("<h3>Student Info For craig</h3>"));
    assert!(body.contains("&quot;name&quot;: &quot;craig&quot;"));
    assert!(body.contains("&quot;search&quot;: &quot;?x=1&quot;"));
}

#[test]
fn test_root_is_rendered_with_fallback() {
    let (handle, addr, _) = start(&static_config(true), Shell::default());
    let resp = get(&addr, "/");
    handle.stop();
    let (status, _, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert!(body.contains("<h1>Home</h1>"));
}

#[test]
fn test_no_fallback_returns_404() {
    let (handle, addr, _) = start(&static_config(false), Shell::default());
    let missing = get(&addr, "/about");
    let root = get(&addr, "/");
    handle.stop();

    let (status, ct, body) = parse_parts(&missing);
    assert_eq!(status, 404);
    assert_eq!(ct, "application/json");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Not Found");
    assert_eq!(json["path"], "/about");

    // The entry document is still served as a plain file.
    let (status, ct, body) = parse_parts(&root);
    assert_eq!(status, 200);
    assert_eq!(ct, "text/html; charset=utf-8");
    assert!(body.contains(r#"<div id="root"></div>"#));
}

#[test]
fn test_traversal_blocked() {
    let (handle, addr, _) = start(&static_config(false), Shell::default());
    let resp = get(&addr, "/../Cargo.toml");
    handle.stop();
    let (status, _, _) = parse_parts(&resp);
    assert_eq!(status, 404);
}

#[test]
fn test_other_methods_not_allowed() {
    let (handle, addr, _) = start(&static_config(true), Shell::default());
    let resp = send_request(
        &addr,
        "POST /about HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n",
    );
    handle.stop();
    let (status, ct, _) = parse_parts(&resp);
    assert_eq!(status, 405);
    assert_eq!(ct, "application/json");
}

#[test]
fn test_head_has_no_body() {
    let (handle, addr, _) = start(&static_config(true), Shell::default());
    let resp = send_request(&addr, "HEAD /about HTTP/1.1\r\nHost: localhost\r\n\r\n");
    handle.stop();
    let (status, ct, body) = parse_parts(&resp);
    assert_eq!(status, 200);
    assert_eq!(ct, "text/html; charset=utf-8");
    assert!(body.is_empty());
}

#[test]
fn test_serves_built_project() {
    let dir = temp_project::create();
    let cfg = temp_project::config(&dir);
    let out = bundler::build(&cfg).unwrap();
    let shell = Shell::from_build(&out).unwrap();
    let (handle, addr, _) = start(&cfg, shell);
    let bundle = get(&addr, "/src/bundle.js");
    let page = get(&addr, "/contact");
    handle.stop();

    let (status, _, body) = parse_parts(&bundle);
    assert_eq!(status, 200);
    assert!(body.contains("/* module: index.js */"));

    let (status, _, body) = parse_parts(&page);
    assert_eq!(status, 200);
    assert!(body.contains("<title>Student Directory</title>"));
    assert!(body.contains("<h1>Contact Us</h1>"));
    assert!(body.contains(r#"<script src="/src/bundle.js"></script>"#));
}

#[test]
fn test_shell_swap_is_visible_to_next_request() {
    let (handle, addr, service) = start(&static_config(true), Shell::default());
    service
        .shell()
        .store(Arc::new(Shell::new(r#"<main><div id="root"></div></main>"#)));
    let resp = get(&addr, "/about");
    handle.stop();
    let (_, _, body) = parse_parts(&resp);
    assert!(body.starts_with(r#"<main><div id="root"><div><h1>Hello, world!</h1>"#));
}
