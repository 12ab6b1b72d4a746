//! # Hot Reload Module
//!
//! Rebuilds the bundle whenever a file under the source directory changes and
//! swaps the freshly built shell into the running dev server.
//!
//! ```rust,ignore
//! use spa_router::hot_reload::watch_sources;
//!
//! let watcher = watch_sources(config.clone(), service.shell(), |out| {
//!     println!("rebuilt {} files", out.files.len());
//! })?;
//! // The watcher stops when dropped.
//! ```
//!
//! A failed rebuild (syntax in the template, missing entry, ...) is logged and
//! the previous shell stays in place, so the server keeps answering.
//! Changes inside the output directory are ignored, which matters when the
//! output directory lives under the source directory.

use crate::bundler::{self, BuildOutput};
use crate::config::BuildConfig;
use crate::server::{SharedShell, Shell};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Whether a filesystem event should trigger a rebuild
#[must_use]
pub fn is_relevant(event: &Event, output_dir: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| !p.starts_with(output_dir))
}

/// Run one rebuild and publish the new shell.
///
/// Returns the build output on success; on failure the shell is untouched.
pub fn rebuild(config: &BuildConfig, shell: &SharedShell) -> Option<BuildOutput> {
    let output = match bundler::build(config) {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "hot-reload: rebuild failed, keeping previous build");
            return None;
        }
    };
    match Shell::from_build(&output) {
        Ok(new_shell) => {
            shell.store(Arc::new(new_shell));
            info!(files = output.files.len(), "hot-reload: build swapped in");
            Some(output)
        }
        Err(e) => {
            warn!(
                error = %format!("{e:#}"),
                "hot-reload: shell unreadable, keeping previous build"
            );
            None
        }
    }
}

/// Watch the configured source directory and rebuild on change.
///
/// `on_rebuild` runs after every successful rebuild.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created or the source directory
/// cannot be watched.
pub fn watch_sources<F>(
    config: BuildConfig,
    shell: SharedShell,
    mut on_rebuild: F,
) -> notify::Result<RecommendedWatcher>
where
    F: FnMut(&BuildOutput) + Send + 'static,
{
    let source_dir = config.source_dir();
    let output_dir = config.output_dir();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if !is_relevant(&event, &output_dir) {
                    return;
                }
                info!(paths = ?event.paths, "hot-reload: source change detected");
                if let Some(output) = rebuild(&config, &shell) {
                    on_rebuild(&output);
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&source_dir, RecursiveMode::Recursive)?;
    info!(source_dir = %source_dir.display(), "hot-reload: watching sources");
    Ok(watcher)
}
