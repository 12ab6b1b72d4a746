use super::request::{parse_request, ParsedRequest};
use super::response::{write_body, write_json, write_json_error};
use crate::bundler::{BuildOutput, MOUNT_POINT};
use crate::config::BuildConfig;
use crate::dispatcher::Dispatcher;
use crate::location::Location;
use crate::static_files::StaticFiles;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const BARE_SHELL: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8"></head><body><div id="root"></div></body></html>"#;

/// Entry document the fallback renders into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    html: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            html: BARE_SHELL.to_string(),
        }
    }
}

impl Shell {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Read the entry document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read shell {}", path.display()))?;
        Ok(Self { html })
    }

    /// The shell a build wrote, or the bare shell when it wrote none.
    ///
    /// # Errors
    ///
    /// Returns an error if the emitted shell cannot be read back.
    pub fn from_build(output: &BuildOutput) -> Result<Self> {
        match output.shell_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Place `app_html` inside the mount point.
    #[must_use]
    pub fn render(&self, app_html: &str) -> String {
        let mounted = format!(r#"<div id="root">{app_html}</div>"#);
        if self.html.contains(MOUNT_POINT) {
            self.html.replacen(MOUNT_POINT, &mounted, 1)
        } else {
            match self.html.rfind("</body>") {
                Some(pos) => format!("{}{mounted}{}", &self.html[..pos], &self.html[pos..]),
                None => format!("{}{mounted}", self.html),
            }
        }
    }
}

/// Shell shared between the server and the rebuild watcher
pub type SharedShell = Arc<ArcSwap<Shell>>;

/// Dev server: static files from the content base, history-API fallback for
/// everything else.
#[derive(Clone)]
pub struct DevService {
    dispatcher: Dispatcher,
    static_files: StaticFiles,
    public_path: String,
    history_api_fallback: bool,
    shell: SharedShell,
}

impl DevService {
    pub fn new(dispatcher: Dispatcher, config: &BuildConfig, shell: SharedShell) -> Self {
        Self {
            dispatcher,
            static_files: StaticFiles::new(config.content_base()),
            public_path: config.public_path(),
            history_api_fallback: config.dev_server.history_api_fallback,
            shell,
        }
    }

    /// Handle through which the shell can be replaced while serving
    #[must_use]
    pub fn shell(&self) -> SharedShell {
        Arc::clone(&self.shell)
    }

    /// Path relative to the content base for a request path.
    ///
    /// Both `{public_path}file` and `/file` resolve to `file`.
    fn static_candidate<'a>(&self, path: &'a str) -> &'a str {
        let rel = path
            .strip_prefix(self.public_path.as_str())
            .unwrap_or_else(|| path.trim_start_matches('/'));
        rel.trim_start_matches('/')
    }

    fn try_static(&self, req: &ParsedRequest, res: &mut Response) -> bool {
        let decoded = urlencoding::decode(&req.path)
            .map_or_else(|_| req.path.clone(), |p| p.into_owned());
        let rel = self.static_candidate(&decoded);
        if rel.is_empty() {
            return false;
        }
        match self.static_files.load(rel) {
            Ok((bytes, content_type)) => {
                debug!(path = %req.path, file = rel, content_type, "Static file served");
                write_body(res, 200, content_type, bytes, req.is_head());
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!(path = %req.path, error = %e, "Static file unreadable");
                false
            }
        }
    }

    fn render_fallback(&self, req: &ParsedRequest, res: &mut Response) {
        let location = Location::parse(&req.target);
        let app_html = self.dispatcher.render_html(&location);
        let page = self.shell.load().render(&app_html);
        debug!(pathname = %location.pathname, bytes = page.len(), "History fallback rendered");
        write_body(res, 200, "text/html", page.into_bytes(), req.is_head());
    }

    /// Route one parsed request.
    pub fn respond(&self, req: &ParsedRequest, res: &mut Response) {
        if !req.is_read() {
            write_json_error(
                res,
                405,
                json!({"error": "Method Not Allowed", "method": req.method, "path": req.path}),
            );
            return;
        }
        if req.path == "/health" {
            write_json(res, 200, &json!({ "status": "ok" }), req.is_head());
            return;
        }
        if self.try_static(req, res) {
            return;
        }
        if self.history_api_fallback {
            self.render_fallback(req, res);
            return;
        }
        if req.path == "/" {
            if let Ok((bytes, content_type)) = self.static_files.load("index.html") {
                write_body(res, 200, content_type, bytes, req.is_head());
                return;
            }
        }
        write_json_error(
            res,
            404,
            json!({"error": "Not Found", "method": req.method, "path": req.path}),
        );
    }
}

impl std::fmt::Debug for DevService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevService")
            .field("content_base", &self.static_files.base_dir())
            .field("public_path", &self.public_path)
            .field("history_api_fallback", &self.history_api_fallback)
            .finish_non_exhaustive()
    }
}

impl HttpService for DevService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        self.respond(&parsed, res);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_render_into_mount_point() {
        let shell =
            Shell::new(r#"<body><div id="root"></div><script src="/src/bundle.js"></script></body>"#);
        assert_eq!(
            shell.render("<h2>About</h2>"),
            r#"<body><div id="root"><h2>About</h2></div><script src="/src/bundle.js"></script></body>"#
        );
    }

    #[test]
    fn test_shell_without_mount_point() {
        let shell = Shell::new("<html><body><p>x</p></body></html>");
        assert_eq!(
            shell.render("<h2>Home</h2>"),
            r#"<html><body><p>x</p><div id="root"><h2>Home</h2></div></body></html>"#
        );
    }

    #[test]
    fn test_default_shell_has_mount_point() {
        assert!(Shell::default().html().contains(MOUNT_POINT));
    }

    #[test]
    fn test_static_candidate() {
        let svc = DevService::new(
            crate::views::dispatcher(),
            &BuildConfig::default(),
            Arc::new(ArcSwap::from_pointee(Shell::default())),
        );
        assert_eq!(svc.static_candidate("/src/bundle.js"), "bundle.js");
        assert_eq!(svc.static_candidate("/bundle.js"), "bundle.js");
        assert_eq!(svc.static_candidate("/"), "");
        assert_eq!(svc.static_candidate("/about"), "about");
    }
}
