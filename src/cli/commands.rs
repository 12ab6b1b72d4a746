use crate::{
    bundler,
    config::{load_or_default, BuildConfig, Mode},
    hot_reload::watch_sources,
    location::Location,
    runtime_config::RuntimeConfig,
    server::{DevService, HttpServer, ServerHandle, SharedShell, Shell},
    views,
};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line interface for spa-router
///
/// Bundles the student directory, serves it with history-API fallback and
/// inspects its routes.
#[derive(Parser)]
#[command(name = "spa-router")]
#[command(
    about = "Student directory SPA: bundler, dev server and route inspector",
    long_about = None
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bundle the sources into the output directory
    Build {
        /// Build configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },
    /// Build, then run the dev server
    Serve {
        /// Build configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address and port to bind the server to (default: dev_server.addr)
        #[arg(long)]
        addr: Option<String>,

        /// Rebuild when a source file changes
        #[arg(long, default_value_t = false)]
        watch: bool,

        /// Serve the existing output without building first
        #[arg(long, default_value_t = false)]
        no_build: bool,
    },
    /// Print the route tables
    Routes,
    /// Print the markup rendered for a location
    Render {
        /// Location to render, e.g. `/students/name/craig?x=1#top`
        url: String,
    },
}

/// Parse the process arguments and execute the command
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the build fails, or the
/// server cannot be started.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Execute an already parsed command
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build { config, mode } => {
            let mut cfg = load_or_default(config.as_deref())?;
            if let Some(mode) = mode {
                cfg.mode = mode;
            }
            let output = bundler::build(&cfg)?;
            for file in &output.files {
                println!("{:>8}  {}", file.size, file.path);
            }
            Ok(())
        }
        Commands::Serve {
            config,
            addr,
            watch,
            no_build,
        } => {
            let cfg = load_or_default(config.as_deref())?;
            let addr = addr.unwrap_or_else(|| cfg.dev_server.addr.clone());
            let runtime = RuntimeConfig::from_env();
            may::config().set_stack_size(runtime.stack_size);

            let shell: SharedShell =
                Arc::new(ArcSwap::from_pointee(initial_shell(&cfg, no_build)?));
            let service = DevService::new(views::dispatcher(), &cfg, Arc::clone(&shell));

            let _watcher = if watch {
                Some(
                    watch_sources(cfg.clone(), Arc::clone(&shell), |_| {})
                        .context("failed to watch source directory")?,
                )
            } else {
                None
            };

            let handle = HttpServer(service)
                .start(addr.as_str())
                .with_context(|| format!("failed to bind dev server to {addr}"))?;
            info!(
                addr = %handle.addr(),
                content_base = %cfg.content_base().display(),
                public_path = %cfg.public_path(),
                history_api_fallback = cfg.dev_server.history_api_fallback,
                stack_size = runtime.stack_size,
                "Dev server listening"
            );
            wait_for_shutdown(handle)
        }
        Commands::Routes => {
            print!("{}", routes_listing());
            Ok(())
        }
        Commands::Render { url } => {
            println!("{}", render_url(&url));
            Ok(())
        }
    }
}

/// Build (unless told not to) and load the shell the server starts with.
fn initial_shell(cfg: &BuildConfig, no_build: bool) -> Result<Shell> {
    if !no_build {
        let output = bundler::build(cfg)?;
        return Shell::from_build(&output);
    }
    let existing = cfg.content_base().join(&cfg.html.filename);
    match Shell::load(&existing) {
        Ok(shell) => Ok(shell),
        Err(e) => {
            warn!(error = %format!("{e:#}"), "No built shell found, serving a bare document");
            Ok(Shell::default())
        }
    }
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("failed to install signal handlers")?;
    if let Some(sig) = signals.forever().next() {
        info!(signal = sig, "Shutting down dev server");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("dev server panicked: {e:?}"))
}

/// One line per route entry, grouped by table
#[must_use]
pub fn routes_listing() -> String {
    let mut out = String::new();
    for (name, table) in views::route_tables() {
        out.push_str(name);
        out.push_str(":\n");
        for line in table.dump_routes() {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Markup the application renders for `url`
#[must_use]
pub fn render_url(url: &str) -> String {
    views::dispatcher().render_html(&Location::parse(url))
}
