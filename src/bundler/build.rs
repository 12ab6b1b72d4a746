use anyhow::{bail, Context, Result};
use minijinja::{context, Environment};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::minify::{minify_html, minify_script};
use super::modules::{lower_module, RUNTIME};
use super::rules::Rules;
use crate::config::{AssetKind, BuildConfig, Mode};

/// Element the dev server renders the application into
pub const MOUNT_POINT: &str = r#"<div id="root"></div>"#;

/// Name of the manifest written next to the bundle
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Hex characters of the content hash kept in image names
const HASH_LEN: usize = 32;

/// Used when the configured template does not exist
const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

/// What an emitted file is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmittedKind {
    Bundle,
    Shell,
    Markup,
    Image,
}

/// One file written to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    /// Path relative to the output directory, `/`-separated
    pub path: String,
    pub kind: EmittedKind,
    pub size: u64,
    /// Source path relative to the source directory, for copied assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Summary of a completed build
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    pub mode: Mode,
    pub public_path: String,
    pub files: Vec<EmittedFile>,
    #[serde(skip)]
    pub output_dir: PathBuf,
}

impl BuildOutput {
    /// The emitted file of the given kind, if any
    #[must_use]
    pub fn file(&self, kind: EmittedKind) -> Option<&EmittedFile> {
        self.files.iter().find(|f| f.kind == kind)
    }

    /// Absolute path of the entry document
    #[must_use]
    pub fn shell_path(&self) -> Option<PathBuf> {
        self.file(EmittedKind::Shell)
            .map(|f| self.output_dir.join(&f.path))
    }
}

/// Find the entry file, trying each configured extension in turn.
///
/// # Errors
///
/// Returns an error listing every candidate when none exists.
pub fn resolve_entry(config: &BuildConfig) -> Result<PathBuf> {
    let base = config.resolve_path(&config.entry);
    let candidates: Vec<PathBuf> = config
        .resolve
        .extensions
        .iter()
        .map(|ext| {
            let mut name = OsString::from(base.as_os_str());
            name.push(ext);
            PathBuf::from(name)
        })
        .collect();
    match candidates.iter().find(|c| c.is_file()) {
        Some(found) => Ok(found.clone()),
        None => bail!(
            "entry {} not found (tried {})",
            config.entry.display(),
            candidates
                .iter()
                .map(|c| c.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Run a full build for `config`.
///
/// # Errors
///
/// Returns an error if the entry cannot be resolved, a rule regex is invalid,
/// or any file cannot be read or written.
pub fn build(config: &BuildConfig) -> Result<BuildOutput> {
    let started = Instant::now();
    let rules = Rules::compile(&config.rules)?;
    let entry = resolve_entry(config)?;
    let source_dir = config.source_dir();
    let output_dir = config.output_dir();
    let template_path = config.template_path();
    let production = config.mode == Mode::Production;

    let mut scripts: Vec<(String, String)> = Vec::new();
    let mut styles: Vec<(String, String)> = Vec::new();
    // Nothing touches the output directory until the shell has rendered.
    let mut pending: Vec<PendingFile> = Vec::new();

    let walker = WalkDir::new(&source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != output_dir.as_path());
    for dir_entry in walker {
        let dir_entry = dir_entry
            .with_context(|| format!("failed to walk source dir {}", source_dir.display()))?;
        if !dir_entry.file_type().is_file() {
            continue;
        }
        let path = dir_entry.path();
        if path == entry.as_path() || path == template_path.as_path() {
            continue;
        }
        let rel = relative_slash_path(path, &source_dir);
        let Some(rule) = rules.classify(&rel) else {
            debug!(file = %rel, "No rule applies, skipping");
            continue;
        };

        match rule.kind {
            AssetKind::Script => scripts.push((rel, read_text(path)?)),
            AssetKind::Stylesheet => styles.push((rel, read_text(path)?)),
            AssetKind::Markup => {
                let mut html = read_text(path)?;
                if rule.minimize || production {
                    html = minify_html(&html);
                }
                pending.push(PendingFile {
                    path: rel.clone(),
                    bytes: html.into_bytes(),
                    kind: EmittedKind::Markup,
                    source: Some(rel),
                });
            }
            AssetKind::Image => {
                let bytes = fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                pending.push(PendingFile {
                    path: hashed_name(&bytes, path),
                    bytes,
                    kind: EmittedKind::Image,
                    source: Some(rel),
                });
            }
        }
    }

    let entry_rel = relative_slash_path(&entry, &source_dir);
    scripts.insert(0, (entry_rel, read_text(&entry)?));
    let bundle = assemble_bundle(&scripts, &styles, &config.resolve.extensions, config.mode);

    let shell_minimize = production
        || rules
            .classify(&relative_slash_path(&template_path, &source_dir))
            .is_some_and(|r| r.kind == AssetKind::Markup && r.minimize);
    let shell = render_shell(config, &template_path, shell_minimize)?;

    pending.insert(
        0,
        PendingFile {
            path: config.html.filename.clone(),
            bytes: shell.into_bytes(),
            kind: EmittedKind::Shell,
            source: None,
        },
    );
    pending.insert(
        0,
        PendingFile {
            path: config.output.filename.clone(),
            bytes: bundle.into_bytes(),
            kind: EmittedKind::Bundle,
            source: None,
        },
    );

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;
    let files = pending
        .into_iter()
        .map(|file| file.write(&output_dir))
        .collect::<Result<Vec<_>>>()?;

    let output = BuildOutput {
        mode: config.mode,
        public_path: config.public_path(),
        files,
        output_dir: output_dir.clone(),
    };
    let manifest = serde_json::to_vec_pretty(&output).context("failed to serialise manifest")?;
    fs::write(output_dir.join(MANIFEST_FILENAME), manifest)
        .with_context(|| format!("failed to write {MANIFEST_FILENAME}"))?;

    info!(
        mode = config.mode.as_str(),
        output_dir = %output_dir.display(),
        scripts = scripts.len(),
        stylesheets = styles.len(),
        files = output.files.len(),
        duration_ms = started.elapsed().as_millis(),
        "Build complete"
    );
    Ok(output)
}

/// Concatenate scripts as registry modules, append one style-injection
/// snippet per stylesheet, then run the first script (the entry).
///
/// `import`/`export` statements are lowered so the bundle runs from a plain
/// `<script>` tag.
#[must_use]
pub fn assemble_bundle(
    scripts: &[(String, String)],
    styles: &[(String, String)],
    extensions: &[String],
    mode: Mode,
) -> String {
    let known: Vec<&str> = scripts.iter().map(|(rel, _)| rel.as_str()).collect();
    let mut out = String::new();
    out.push_str(&format!("/* spa-router bundle ({}) */\n", mode.as_str()));
    out.push_str(RUNTIME);
    for (rel, source) in scripts {
        out.push_str(&format!("/* module: {rel} */\n"));
        out.push_str(&lower_module(rel, source, &known, extensions));
    }
    for (rel, css) in styles {
        // serde_json string escaping is valid JS string escaping.
        let literal = serde_json::Value::String(css.clone()).to_string();
        out.push_str(&format!("/* style: {rel} */\n"));
        out.push_str(&format!(
            "(function () {{ var s = document.createElement(\"style\"); \
             s.textContent = {literal}; document.head.appendChild(s); }})();\n"
        ));
    }
    if let Some((entry, _)) = scripts.first() {
        out.push_str(&format!(
            "__spa_require({});\n",
            serde_json::Value::String(entry.clone())
        ));
    }
    match mode {
        Mode::Production => minify_script(&out),
        Mode::Development => out,
    }
}

/// Render the HTML template and inject the bundle's script tag.
fn render_shell(config: &BuildConfig, template_path: &Path, minimize: bool) -> Result<String> {
    let source = match fs::read_to_string(template_path) {
        Ok(s) => s,
        Err(e) => {
            warn!(
                template = %template_path.display(),
                error = %e,
                "HTML template not readable, using built-in shell"
            );
            DEFAULT_TEMPLATE.to_string()
        }
    };

    let mut env = Environment::new();
    env.add_template("shell", &source)
        .with_context(|| format!("invalid HTML template {}", template_path.display()))?;
    let rendered = env
        .get_template("shell")
        .and_then(|tpl| {
            tpl.render(context! {
                title => &config.html.title,
                public_path => config.public_path(),
                mode => config.mode.as_str(),
            })
        })
        .with_context(|| {
            format!("failed to render HTML template {}", template_path.display())
        })?;

    let src = format!("{}{}", config.public_path(), config.output.filename);
    let html = inject_script(&rendered, &src);
    Ok(if minimize { minify_html(&html) } else { html })
}

/// Insert `<script src=..>` before `</body>`, or append it when there is none.
#[must_use]
pub fn inject_script(html: &str, src: &str) -> String {
    let tag = format!(r#"<script src="{src}"></script>"#);
    match html.rfind("</body>") {
        Some(pos) => format!("{}{tag}{}", &html[..pos], &html[pos..]),
        None => format!("{html}{tag}"),
    }
}

/// A file held in memory until the whole build has succeeded
struct PendingFile {
    path: String,
    bytes: Vec<u8>,
    kind: EmittedKind,
    source: Option<String>,
}

impl PendingFile {
    fn write(self, output_dir: &Path) -> Result<EmittedFile> {
        let dest = output_dir.join(&self.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&dest, &self.bytes)
            .with_context(|| format!("failed to write {}", dest.display()))?;
        debug!(file = %self.path, size = self.bytes.len(), kind = ?self.kind, "Emitted");
        Ok(EmittedFile {
            size: self.bytes.len() as u64,
            path: self.path,
            kind: self.kind,
            source: self.source,
        })
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// `<first 32 hex chars of sha256>.<ext>`
#[must_use]
pub fn hashed_name(bytes: &[u8], path: &Path) -> String {
    let digest = Sha256::digest(bytes);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    let stem = &hex[..HASH_LEN];
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

fn relative_slash_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
