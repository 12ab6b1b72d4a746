use spa_router::static_files::StaticFiles;

#[test]
fn test_js_bundle() {
    let sf = StaticFiles::new("tests/staticdata");
    let (bytes, ct) = sf.load("bundle.js").unwrap();
    assert_eq!(ct, "application/javascript");
    assert_eq!(String::from_utf8(bytes).unwrap(), "console.log('bundled');\n");
}

#[test]
fn test_leading_slash_and_nested() {
    let sf = StaticFiles::new("tests/staticdata");
    let (bytes, ct) = sf.load("/nested/data.json").unwrap();
    assert_eq!(ct, "application/json");
    assert_eq!(String::from_utf8(bytes).unwrap(), "{\"ok\":true}\n");
}

#[test]
fn test_html_is_served_verbatim() {
    let sf = StaticFiles::new("tests/staticdata");
    let (bytes, ct) = sf.load("index.html").unwrap();
    assert_eq!(ct, "text/html");
    assert!(String::from_utf8(bytes).unwrap().contains("<div id=\"root\"></div>"));
}

#[test]
fn test_traversal_prevented() {
    let sf = StaticFiles::new("tests/staticdata");
    assert!(sf.load("../Cargo.toml").is_err());
    assert!(sf.load("..\\Cargo.toml").is_err());
    assert!(sf.load("nested/../../Cargo.toml").is_err());
    assert!(!sf.exists("../Cargo.toml"));
}

#[test]
fn test_missing_file() {
    let sf = StaticFiles::new("tests/staticdata");
    assert!(!sf.exists("about"));
    assert_eq!(
        sf.load("about").unwrap_err().kind(),
        std::io::ErrorKind::NotFound
    );
}
