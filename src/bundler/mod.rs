//! # Bundler Module
//!
//! Turns a source directory into something the dev server (or any static
//! host) can serve: one output script and an HTML shell that loads it.
//!
//! ## Build steps
//!
//! 1. Resolve the entry, trying each `resolve.extensions` suffix.
//! 2. Walk the source directory in file-name order and classify every file
//!    with the first applicable [rule](crate::config::RuleConfig).
//! 3. Scripts are concatenated behind the entry, each under a
//!    `/* module: path */` banner. Their `import`/`export` statements are
//!    lowered onto a small module registry, so the bundle runs from a plain
//!    `<script>` tag; the entry module is required last.
//! 4. Stylesheets become style-injection snippets at the end of the bundle.
//! 5. Images are copied as `<sha256 prefix>.<ext>`; markup files are copied,
//!    minified when their rule or the mode asks for it.
//! 6. The HTML template is rendered with minijinja (`title`, `public_path`,
//!    `mode`) and the bundle's `<script>` tag is injected before `</body>`.
//! 7. `manifest.json` records every emitted file.
//!
//! Production mode additionally minifies the bundle and the shell.
//!
//! ```rust,no_run
//! use spa_router::{bundler, config};
//!
//! let cfg = config::load_config(std::path::Path::new("demos/student_directory/spa.yaml"))?;
//! let out = bundler::build(&cfg)?;
//! println!("wrote {} files", out.files.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod build;
mod minify;
mod modules;
mod rules;

pub use build::{
    assemble_bundle, build, hashed_name, inject_script, resolve_entry, BuildOutput, EmittedFile,
    EmittedKind, MANIFEST_FILENAME, MOUNT_POINT,
};
pub use minify::{minify_html, minify_script};
pub use rules::{CompiledRule, Rules};
