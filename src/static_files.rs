use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Serves files from a base directory, refusing anything that escapes it.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base_dir: base.into() }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => {
                    // Backslash separators would be honoured on Windows.
                    if s.to_string_lossy().contains('\\') {
                        return None;
                    }
                    pb.push(s);
                }
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    /// Content type by file extension
    #[must_use]
    pub fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => "text/html",
            "css" => "text/css",
            "js" | "jsx" => "application/javascript",
            "json" => "application/json",
            "txt" => "text/plain",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "ico" => "image/x-icon",
            _ => "application/octet-stream",
        }
    }

    /// Whether `url_path` names an existing file under the base directory
    #[must_use]
    pub fn exists(&self, url_path: &str) -> bool {
        self.map_path(url_path).is_some_and(|p| p.is_file())
    }

    /// Read a file and its content type.
    ///
    /// # Errors
    ///
    /// `NotFound` for traversal attempts, missing files and directories;
    /// other I/O errors are passed through.
    pub fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}
