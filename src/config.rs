//! # Build Configuration
//!
//! Describes what the bundler reads and writes and how the dev server serves
//! it. Loaded from YAML (`.yaml`/`.yml`) or TOML (`.toml`); every key has a
//! default, so an empty file (or no file at all) is a valid configuration.
//!
//! Relative paths resolve against the directory containing the config file.
//!
//! ```yaml
//! entry: src/index.js
//! mode: development
//! output:
//!   path: dist
//!   filename: bundle.js
//!   public_path: /src/
//! html:
//!   template: src/index.html
//!   filename: index.html
//! rules:
//!   - test: '\.(js|jsx)$'
//!     exclude: node_modules
//!     kind: script
//!   - test: '\.(css)$'
//!     kind: stylesheet
//!   - test: '\.html$'
//!     kind: markup
//!     minimize: true
//!   - test: '\.(png|svg|jpg|gif)$'
//!     kind: image
//! dev_server:
//!   addr: 127.0.0.1:8080
//!   content_base: dist
//!   history_api_fallback: true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::runtime_config::RuntimeConfig;

/// Development or production-equivalent build
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Parse `development`/`production` (case-insensitive, `dev`/`prod` accepted)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Mode::Development),
            "production" | "prod" => Some(Mode::Production),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

/// What a rule does with the files it claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Concatenated into the output script
    Script,
    /// Injected into the page by the output script
    Stylesheet,
    /// HTML, minified when the rule asks for it
    Markup,
    /// Copied under a content-hashed name
    Image,
}

/// A file-type handling rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Regex tested against the file's path relative to the source directory
    pub test: String,
    /// Regex that, when it matches, excludes the file from this rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    pub kind: AssetKind,
    /// Minify regardless of mode
    #[serde(default)]
    pub minimize: bool,
}

impl RuleConfig {
    fn new(test: &str, kind: AssetKind) -> Self {
        Self {
            test: test.to_string(),
            exclude: None,
            kind,
            minimize: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub filename: String,
    /// URL prefix the output is served under
    pub public_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dist"),
            filename: "bundle.js".to_string(),
            public_path: "/src/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub template: PathBuf,
    pub filename: String,
    pub title: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("src/index.html"),
            filename: "index.html".to_string(),
            title: "Student Directory".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Suffixes tried, in order, when the entry does not exist as written
    pub extensions: Vec<String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: vec![String::new(), ".js".to_string(), ".jsx".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerConfig {
    pub addr: String,
    /// Directory served; defaults to the output directory
    pub content_base: Option<PathBuf>,
    /// Serve the entry document for unknown paths
    pub history_api_fallback: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            content_base: None,
            history_api_fallback: true,
        }
    }
}

/// Complete build and dev-server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub entry: PathBuf,
    pub source_dir: PathBuf,
    pub mode: Mode,
    pub output: OutputConfig,
    pub html: HtmlConfig,
    pub rules: Vec<RuleConfig>,
    pub resolve: ResolveConfig,
    pub dev_server: DevServerConfig,
    /// Directory relative paths resolve against
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("src/index.js"),
            source_dir: PathBuf::from("src"),
            mode: Mode::Development,
            output: OutputConfig::default(),
            html: HtmlConfig::default(),
            rules: default_rules(),
            resolve: ResolveConfig::default(),
            dev_server: DevServerConfig::default(),
            root: PathBuf::from("."),
        }
    }
}

/// Script, stylesheet, markup and image rules
#[must_use]
pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig {
            exclude: Some("node_modules".to_string()),
            ..RuleConfig::new(r"\.(js|jsx)$", AssetKind::Script)
        },
        RuleConfig::new(r"\.(css)$", AssetKind::Stylesheet),
        RuleConfig {
            minimize: true,
            ..RuleConfig::new(r"\.html$", AssetKind::Markup)
        },
        RuleConfig::new(r"\.(png|svg|jpg|gif)$", AssetKind::Image),
    ]
}

impl BuildConfig {
    /// Parse a config document; `format_hint` is the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML/TOML for this schema.
    pub fn from_str_with_format(content: &str, format_hint: &str) -> Result<Self> {
        let cfg: BuildConfig = match format_hint {
            "toml" => toml::from_str(content).context("invalid TOML build config")?,
            _ if content.trim().is_empty() => BuildConfig::default(),
            _ => serde_yaml::from_str(content).context("invalid YAML build config")?,
        };
        Ok(cfg)
    }

    /// Apply environment overrides (currently the build mode)
    #[must_use]
    pub fn with_runtime(mut self, runtime: &RuntimeConfig) -> Self {
        if let Some(mode) = runtime.mode {
            self.mode = mode;
        }
        self
    }

    /// Resolve a configured path against [`BuildConfig::root`]
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.resolve_path(&self.source_dir)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.output.path)
    }

    #[must_use]
    pub fn template_path(&self) -> PathBuf {
        self.resolve_path(&self.html.template)
    }

    /// Directory the dev server serves
    #[must_use]
    pub fn content_base(&self) -> PathBuf {
        match &self.dev_server.content_base {
            Some(dir) => self.resolve_path(dir),
            None => self.output_dir(),
        }
    }

    /// Public path normalised to start and end with `/`
    #[must_use]
    pub fn public_path(&self) -> String {
        let trimmed = self.output.public_path.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        }
    }
}

/// Load a build config from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read build config {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    let mut cfg = BuildConfig::from_str_with_format(&content, ext)
        .with_context(|| format!("failed to parse build config {}", path.display()))?;
    cfg.root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    debug!(
        path = %path.display(),
        mode = cfg.mode.as_str(),
        rules = cfg.rules.len(),
        "Build config loaded"
    );
    Ok(cfg)
}

/// Load `path` if given, otherwise defaults rooted at the working directory,
/// then apply environment overrides.
///
/// # Errors
///
/// Returns an error if an explicitly given file cannot be loaded.
pub fn load_or_default(path: Option<&Path>) -> Result<BuildConfig> {
    let cfg = match path {
        Some(p) => load_config(p)?,
        None => BuildConfig::default(),
    };
    Ok(cfg.with_runtime(&RuntimeConfig::from_env()))
}
