#![allow(dead_code)]

pub mod temp_project {
    use spa_router::config::{load_config, BuildConfig};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    pub const CONFIG_YAML: &str = r#"entry: src/index
source_dir: src
output:
  path: dist
  filename: bundle.js
  public_path: /src/
html:
  template: src/index.html
  filename: index.html
  title: Student Directory
dev_server:
  content_base: dist
  history_api_fallback: true
"#;

    pub const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>{{ title }}</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

    pub const INDEX_JS: &str = "// entry\nimport App from './App';\nApp.mount(document.getElementById('root'));\n";
    pub const APP_JSX: &str = "export default { mount(root) { root.dataset.ready = '1'; } };\n";
    pub const STYLES_CSS: &str = "body { color: \"navy\"; }\n";
    pub const LOGO_SVG: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>";

    /// Write a small project (config, template, scripts, stylesheet, image)
    /// into a fresh temporary directory.
    pub fn create() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "spa.yaml", CONFIG_YAML.as_bytes());
        write_file(dir.path(), "src/index.html", TEMPLATE.as_bytes());
        write_file(dir.path(), "src/index.js", INDEX_JS.as_bytes());
        write_file(dir.path(), "src/App.jsx", APP_JSX.as_bytes());
        write_file(dir.path(), "src/styles.css", STYLES_CSS.as_bytes());
        write_file(dir.path(), "src/img/logo.svg", LOGO_SVG);
        write_file(dir.path(), "src/README.md", b"not an asset\n");
        dir
    }

    pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }

    /// Load the project's config
    pub fn config(dir: &TempDir) -> BuildConfig {
        load_config(&dir.path().join("spa.yaml")).unwrap()
    }
}

pub mod test_server {
    use arc_swap::ArcSwap;
    use spa_router::config::BuildConfig;
    use spa_router::server::{DevService, HttpServer, ServerHandle, Shell};
    use spa_router::views;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener, TcpStream};
    use std::sync::{Arc, Once};
    use std::time::Duration;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Start a dev server for `config` on a free local port.
    pub fn start(config: &BuildConfig, shell: Shell) -> (ServerHandle, SocketAddr, DevService) {
        setup_may_runtime();
        let service = DevService::new(
            views::dispatcher(),
            config,
            Arc::new(ArcSwap::from_pointee(shell)),
        );
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let handle = HttpServer(service.clone()).start(addr).unwrap();
        handle.wait_ready().unwrap();
        (handle, addr, service)
    }

    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 4096];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    pub fn get(addr: &SocketAddr, path: &str) -> String {
        send_request(
            addr,
            &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
        )
    }

    /// `(status, content type, body)` of a raw response
    pub fn parse_parts(resp: &str) -> (u16, String, String) {
        let (headers, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut status = 0;
        let mut content_type = String::new();
        for line in headers.lines() {
            if line.starts_with("HTTP/1.1") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, val)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-type") {
                    content_type = val.trim().to_string();
                }
            }
        }
        (status, content_type, body.to_string())
    }
}
